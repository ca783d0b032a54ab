// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Explicit dispatcher injection
//!
//! Components that emit events receive their dispatcher through
//! [`DispatcherAware::set_dispatcher`]; nothing is looked up globally.

use crate::dispatcher::EventDispatcher;
use crate::error::EventError;
use crate::event::Event;
use std::fmt;
use std::sync::Arc;

/// A dispatcher shared between the wiring code and its consumers
pub type SharedDispatcher = Arc<dyn EventDispatcher>;

/// Implemented by anything that can be handed a dispatcher
pub trait DispatcherAware {
    fn set_dispatcher(&mut self, dispatcher: SharedDispatcher);
}

/// Slot for an injected dispatcher, meant to be embedded as a field
#[derive(Clone, Default)]
pub struct DispatcherHandle {
    dispatcher: Option<SharedDispatcher>,
}

impl DispatcherHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<&SharedDispatcher> {
        self.dispatcher.as_ref()
    }

    pub fn is_set(&self) -> bool {
        self.dispatcher.is_some()
    }

    /// Dispatch through the injected dispatcher
    pub fn dispatch(&self, event: Event) -> Result<Event, EventError> {
        let dispatcher = self.dispatcher.as_ref().ok_or(EventError::DispatcherNotSet)?;
        Ok(dispatcher.dispatch(event))
    }
}

impl DispatcherAware for DispatcherHandle {
    fn set_dispatcher(&mut self, dispatcher: SharedDispatcher) {
        self.dispatcher = Some(dispatcher);
    }
}

impl fmt::Debug for DispatcherHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatcherHandle")
            .field("is_set", &self.is_set())
            .finish()
    }
}

#[cfg(test)]
#[path = "aware_tests.rs"]
mod tests;
