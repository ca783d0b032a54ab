// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! relay-core: in-process event dispatch
//!
//! This crate provides:
//! - `Event` values with a validated name, optional target and arguments
//! - `Dispatcher`, a registry invoking listeners by descending priority
//!   until one stops propagation
//! - `DispatcherAware` for explicit dispatcher injection
//! - Subscribers, read-only and traced dispatcher wrappers, dispatch taps

mod aware;
mod config;
mod dispatcher;
mod error;
mod event;
mod immutable;
mod listener;
mod subscriber;
mod tap;
mod traced;

pub use aware::{DispatcherAware, DispatcherHandle, SharedDispatcher};
pub use config::{ConfigError, DispatcherConfig};
pub use dispatcher::{Dispatcher, EventDispatcher, DEFAULT_PRIORITY};
pub use error::EventError;
pub use event::{Event, EventName, Target};
pub use immutable::ImmutableDispatcher;
pub use listener::{DispatchContext, Listener};
pub use subscriber::{EventSubscriber, Subscription};
pub use tap::{BoundedDispatchReceiver, DispatchReceiver, DispatchRecord, DispatchSender};
pub use traced::TracedDispatcher;
