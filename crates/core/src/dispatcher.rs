// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listener registry and priority-ordered dispatch

use crate::config::DispatcherConfig;
use crate::event::{Event, EventName};
use crate::listener::{DispatchContext, Listener};
use crate::subscriber::EventSubscriber;
use crate::tap::{BoundedDispatchReceiver, DispatchReceiver, DispatchRecord, TapSender};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc;

/// Priority used when the caller has no preference
pub const DEFAULT_PRIORITY: i32 = 0;

/// Registers listeners and dispatches events to them
///
/// Listeners for a name run highest priority first; listeners sharing a
/// priority run in the order they were added. Dispatch stops as soon as the
/// event reports that propagation was stopped.
pub trait EventDispatcher: Send + Sync {
    /// Register `listener` for `event_name`
    ///
    /// Returns false, registering nothing, if the registration is refused.
    fn add_listener(&self, event_name: &str, listener: Listener, priority: i32) -> bool;

    /// Remove every registration of `listener` under `event_name`
    fn remove_listener(&self, event_name: &str, listener: &Listener);

    /// Dispatch under an explicit name, creating an empty event if none is given
    fn dispatch_named(&self, name: &EventName, event: Option<Event>) -> Event;

    /// Like `dispatch_named`, but listeners see `via` as the running dispatcher
    ///
    /// Wrappers forward here with themselves as `via` so that nested
    /// dispatch from a listener goes back through the wrapper.
    fn dispatch_via(
        &self,
        name: &EventName,
        event: Option<Event>,
        via: &dyn EventDispatcher,
    ) -> Event;

    /// Dispatch under the event's own name
    fn dispatch(&self, event: Event) -> Event {
        let name = event.name().clone();
        self.dispatch_named(&name, Some(event))
    }

    /// Listeners for `event_name` in invocation order
    fn listeners(&self, event_name: &str) -> Vec<Listener>;

    /// Priority of the first registration of `listener` under `event_name`
    fn listener_priority(&self, event_name: &str, listener: &Listener) -> Option<i32>;

    /// Names with at least one listener, sorted
    fn event_names(&self) -> Vec<EventName>;

    fn listener_count(&self, event_name: &str) -> usize {
        self.listeners(event_name).len()
    }

    fn has_listeners(&self, event_name: &str) -> bool {
        self.listener_count(event_name) > 0
    }

    /// Register everything a subscriber asks for
    ///
    /// Returns true only if every registration was accepted.
    fn add_subscriber(&self, subscriber: &dyn EventSubscriber) -> bool {
        let mut all_added = true;
        for subscription in subscriber.subscriptions() {
            let added = self.add_listener(
                subscription.event.as_str(),
                subscription.listener,
                subscription.priority,
            );
            all_added &= added;
        }
        all_added
    }

    fn remove_subscriber(&self, subscriber: &dyn EventSubscriber) {
        for subscription in subscriber.subscriptions() {
            self.remove_listener(subscription.event.as_str(), &subscription.listener);
        }
    }
}

struct Registration {
    priority: i32,
    listener: Listener,
}

type Registry = HashMap<EventName, Vec<Registration>>;

/// The in-process dispatcher
///
/// Clones share the same registry, so a clone handed to another component
/// sees every listener added through any handle.
#[derive(Clone, Default)]
pub struct Dispatcher {
    registry: Arc<RwLock<Registry>>,
    taps: Arc<RwLock<Vec<TapSender>>>,
    sequence: Arc<AtomicU64>,
    config: DispatcherConfig,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DispatcherConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Observe every finished dispatch
    ///
    /// The receiver gets one [`DispatchRecord`] per dispatch made after this
    /// call. Dropping it detaches the tap. The channel is unbounded: a
    /// receiver that is kept alive but never drained grows by one record per
    /// dispatch. Use [`tap_bounded`](Self::tap_bounded) when the observer
    /// may fall behind.
    pub fn tap(&self) -> DispatchReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        self.attach(TapSender::Unbounded(tx));
        rx
    }

    /// Observe dispatches through a channel holding at most `capacity` records
    ///
    /// Records that arrive while the channel is full are dropped; the
    /// receiver sees a gap in `sequence`. A `capacity` of 0 is treated as 1.
    pub fn tap_bounded(&self, capacity: usize) -> BoundedDispatchReceiver {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        self.attach(TapSender::Bounded(tx));
        rx
    }

    fn attach(&self, tap: TapSender) {
        let mut taps = self.taps.write().unwrap_or_else(|e| e.into_inner());
        taps.push(tap);
    }

    /// Number of attached taps, including ones whose receiver was dropped
    /// since the last dispatch
    pub fn tap_count(&self) -> usize {
        self.taps.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    fn publish(&self, name: &EventName, listeners: usize, invoked: usize, stopped: bool) {
        let mut taps = self.taps.write().unwrap_or_else(|e| e.into_inner());
        // Numbered under the taps lock so every tap receives records in sequence order
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        if taps.is_empty() {
            return;
        }

        let record = DispatchRecord {
            sequence,
            name: name.clone(),
            listeners,
            invoked,
            stopped,
        };
        taps.retain(|tap| tap.deliver(record.clone()));
    }
}

impl EventDispatcher for Dispatcher {
    fn add_listener(&self, event_name: &str, listener: Listener, priority: i32) -> bool {
        let name = match EventName::new(event_name) {
            Ok(name) => name,
            Err(e) => {
                tracing::warn!(event = event_name, error = %e, "rejected listener");
                return false;
            }
        };

        let mut registry = self.registry.write().unwrap_or_else(|e| e.into_inner());
        let registrations = registry.entry(name).or_default();

        if let Some(max) = self.config.max_listeners_per_event {
            if registrations.len() >= max {
                tracing::warn!(
                    event = event_name,
                    listener = listener.label(),
                    max,
                    "listener limit reached"
                );
                return false;
            }
        }

        // After every registration of equal or higher priority
        let at = registrations.partition_point(|r| r.priority >= priority);
        tracing::debug!(
            event = event_name,
            listener = listener.label(),
            priority,
            position = at,
            "listener added"
        );
        registrations.insert(at, Registration { priority, listener });
        true
    }

    fn remove_listener(&self, event_name: &str, listener: &Listener) {
        let mut registry = self.registry.write().unwrap_or_else(|e| e.into_inner());
        let Some(registrations) = registry.get_mut(event_name) else {
            return;
        };

        let before = registrations.len();
        registrations.retain(|r| !r.listener.is(listener));
        let removed = before - registrations.len();

        if registrations.is_empty() {
            registry.remove(event_name);
        }
        if removed > 0 {
            tracing::debug!(
                event = event_name,
                listener = listener.label(),
                removed,
                "listener removed"
            );
        }
    }

    fn dispatch_named(&self, name: &EventName, event: Option<Event>) -> Event {
        self.dispatch_via(name, event, self)
    }

    fn dispatch_via(
        &self,
        name: &EventName,
        event: Option<Event>,
        via: &dyn EventDispatcher,
    ) -> Event {
        let mut event = event.unwrap_or_else(|| Event::new(name.clone()));

        // Snapshot so listeners can add and remove listeners without deadlock;
        // their changes apply from the next dispatch on.
        let listeners = self.listeners(name.as_str());
        if listeners.is_empty() {
            if self.config.warn_unheard {
                tracing::warn!(event = %name, "no listeners");
            } else {
                tracing::debug!(event = %name, "no listeners");
            }
        }

        let context = DispatchContext::new(name, via);
        let mut invoked = 0;
        for listener in &listeners {
            if event.is_propagation_stopped() {
                tracing::trace!(
                    event = %name,
                    skipped = listeners.len() - invoked,
                    "propagation stopped"
                );
                break;
            }
            tracing::trace!(event = %name, listener = listener.label(), "invoking");
            listener.call(&mut event, &context);
            invoked += 1;
        }

        let stopped = event.is_propagation_stopped();
        tracing::debug!(
            event = %name,
            listeners = listeners.len(),
            invoked,
            stopped,
            "dispatched"
        );
        self.publish(name, listeners.len(), invoked, stopped);
        event
    }

    fn listeners(&self, event_name: &str) -> Vec<Listener> {
        let registry = self.registry.read().unwrap_or_else(|e| e.into_inner());
        registry
            .get(event_name)
            .map(|regs| regs.iter().map(|r| r.listener.clone()).collect())
            .unwrap_or_default()
    }

    fn listener_priority(&self, event_name: &str, listener: &Listener) -> Option<i32> {
        let registry = self.registry.read().unwrap_or_else(|e| e.into_inner());
        registry
            .get(event_name)?
            .iter()
            .find(|r| r.listener.is(listener))
            .map(|r| r.priority)
    }

    fn event_names(&self) -> Vec<EventName> {
        let registry = self.registry.read().unwrap_or_else(|e| e.into_inner());
        let mut names: Vec<EventName> = registry.keys().cloned().collect();
        names.sort();
        names
    }

    fn listener_count(&self, event_name: &str) -> usize {
        let registry = self.registry.read().unwrap_or_else(|e| e.into_inner());
        registry.get(event_name).map_or(0, |regs| regs.len())
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("events", &self.event_names())
            .field("taps", &self.tap_count())
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
