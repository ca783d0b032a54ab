// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-only view over a dispatcher

use crate::dispatcher::EventDispatcher;
use crate::event::{Event, EventName};
use crate::listener::Listener;

/// Dispatches through `D` but refuses every registration change
///
/// Hand this to code that may emit events but must not rewire listeners.
#[derive(Clone, Debug)]
pub struct ImmutableDispatcher<D> {
    inner: D,
}

impl<D> ImmutableDispatcher<D> {
    pub fn new(inner: D) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }
}

impl<D: EventDispatcher> EventDispatcher for ImmutableDispatcher<D> {
    fn add_listener(&self, event_name: &str, listener: Listener, priority: i32) -> bool {
        tracing::warn!(
            event = event_name,
            listener = listener.label(),
            priority,
            "dispatcher is immutable, listener not added"
        );
        false
    }

    fn remove_listener(&self, event_name: &str, listener: &Listener) {
        tracing::warn!(
            event = event_name,
            listener = listener.label(),
            "dispatcher is immutable, listener not removed"
        );
    }

    fn dispatch_named(&self, name: &EventName, event: Option<Event>) -> Event {
        self.inner.dispatch_via(name, event, self)
    }

    fn dispatch_via(
        &self,
        name: &EventName,
        event: Option<Event>,
        via: &dyn EventDispatcher,
    ) -> Event {
        self.inner.dispatch_via(name, event, via)
    }

    fn listeners(&self, event_name: &str) -> Vec<Listener> {
        self.inner.listeners(event_name)
    }

    fn listener_priority(&self, event_name: &str, listener: &Listener) -> Option<i32> {
        self.inner.listener_priority(event_name, listener)
    }

    fn event_names(&self) -> Vec<EventName> {
        self.inner.event_names()
    }

    fn listener_count(&self, event_name: &str) -> usize {
        self.inner.listener_count(event_name)
    }
}
