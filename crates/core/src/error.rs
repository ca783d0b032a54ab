// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for events and dispatch wiring

use thiserror::Error;

/// Errors raised by event accessors and dispatcher wiring
#[derive(Debug, Error)]
pub enum EventError {
    #[error("invalid event name {name:?}: {reason}")]
    InvalidName { name: String, reason: &'static str },
    #[error("argument not found: {0}")]
    ArgumentNotFound(String),
    #[error("argument {key} has unexpected type: {source}")]
    ArgumentType {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("no dispatcher has been set")]
    DispatcherNotSet,
}
