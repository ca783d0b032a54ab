// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced dispatcher wrapper for consistent observability

use crate::dispatcher::EventDispatcher;
use crate::event::{Event, EventName};
use crate::listener::Listener;

/// Wrapper that adds tracing spans to any EventDispatcher
#[derive(Clone, Debug)]
pub struct TracedDispatcher<D> {
    inner: D,
}

impl<D> TracedDispatcher<D> {
    pub fn new(inner: D) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }
}

impl<D: EventDispatcher> TracedDispatcher<D> {
    fn traced_dispatch(
        &self,
        name: &EventName,
        event: Option<Event>,
        via: &dyn EventDispatcher,
    ) -> Event {
        let span = tracing::info_span!("dispatcher.dispatch", event = %name);
        let _guard = span.enter();

        tracing::info!(
            listeners = self.inner.listener_count(name.as_str()),
            default_event = event.is_none(),
            "starting"
        );

        let start = std::time::Instant::now();
        let event = self.inner.dispatch_via(name, event, via);
        let elapsed = start.elapsed();

        tracing::info!(
            stopped = event.is_propagation_stopped(),
            has_result = event.result().is_some(),
            elapsed_us = elapsed.as_micros() as u64,
            "dispatched"
        );

        event
    }
}

impl<D: EventDispatcher> EventDispatcher for TracedDispatcher<D> {
    fn add_listener(&self, event_name: &str, listener: Listener, priority: i32) -> bool {
        let span = tracing::info_span!("dispatcher.add_listener", event = event_name);
        let _guard = span.enter();

        let label = listener.label().to_string();
        let added = self.inner.add_listener(event_name, listener, priority);

        if added {
            tracing::info!(listener = %label, priority, added, "listener added");
        } else {
            tracing::warn!(listener = %label, priority, added, "listener refused");
        }

        added
    }

    fn remove_listener(&self, event_name: &str, listener: &Listener) {
        let span = tracing::info_span!("dispatcher.remove_listener", event = event_name);
        let _guard = span.enter();

        let before = self.inner.listener_count(event_name);
        self.inner.remove_listener(event_name, listener);
        let after = self.inner.listener_count(event_name);

        tracing::info!(
            listener = listener.label(),
            removed = before.saturating_sub(after),
            "removed"
        );
    }

    fn dispatch_named(&self, name: &EventName, event: Option<Event>) -> Event {
        self.traced_dispatch(name, event, self)
    }

    fn dispatch_via(
        &self,
        name: &EventName,
        event: Option<Event>,
        via: &dyn EventDispatcher,
    ) -> Event {
        self.traced_dispatch(name, event, via)
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

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
