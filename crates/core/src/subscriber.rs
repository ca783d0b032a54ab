// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subscribers: components that declare their listeners in one place

use crate::dispatcher::DEFAULT_PRIORITY;
use crate::event::EventName;
use crate::listener::Listener;

/// One listener registration requested by a subscriber
#[derive(Clone, Debug)]
pub struct Subscription {
    pub event: EventName,
    pub listener: Listener,
    pub priority: i32,
}

impl Subscription {
    pub fn new(event: EventName, listener: Listener) -> Self {
        Self {
            event,
            listener,
            priority: DEFAULT_PRIORITY,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// A component that knows which events it wants to hear about
///
/// Return the same [`Listener`] handles on every call (keep them in a
/// field) or `remove_subscriber` will not find them again.
pub trait EventSubscriber {
    fn subscriptions(&self) -> Vec<Subscription>;
}

#[cfg(test)]
#[path = "subscriber_tests.rs"]
mod tests;
