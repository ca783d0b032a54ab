// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listener callbacks and the context they are invoked with

use crate::dispatcher::EventDispatcher;
use crate::event::{Event, EventName};
use std::fmt;
use std::sync::Arc;

type Callback = dyn Fn(&mut Event, &DispatchContext<'_>) + Send + Sync;

/// What a listener sees besides the event itself
pub struct DispatchContext<'a> {
    name: &'a EventName,
    dispatcher: &'a dyn EventDispatcher,
}

impl<'a> DispatchContext<'a> {
    pub(crate) fn new(name: &'a EventName, dispatcher: &'a dyn EventDispatcher) -> Self {
        Self { name, dispatcher }
    }

    /// The name the event was dispatched under
    ///
    /// Differs from `event.name()` when the caller used `dispatch_named`
    /// with an explicit name.
    pub fn name(&self) -> &EventName {
        self.name
    }

    /// The dispatcher running this listener, for nested dispatch
    pub fn dispatcher(&self) -> &dyn EventDispatcher {
        self.dispatcher
    }
}

/// A registered callback
///
/// Cloning shares the callback. Two listeners are the same listener when
/// they share a callback allocation, which is what `remove_listener`
/// matches on.
#[derive(Clone)]
pub struct Listener {
    label: Arc<str>,
    callback: Arc<Callback>,
}

impl Listener {
    /// Wrap a callback that only needs the event
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut Event) + Send + Sync + 'static,
    {
        Self::labeled(std::any::type_name::<F>(), move |event, _| f(event))
    }

    /// Wrap a callback that also wants the dispatch context
    pub fn with_context<F>(f: F) -> Self
    where
        F: Fn(&mut Event, &DispatchContext<'_>) + Send + Sync + 'static,
    {
        Self::labeled(std::any::type_name::<F>(), f)
    }

    /// Wrap a callback under an explicit label used in logs
    pub fn labeled<F>(label: impl Into<Arc<str>>, f: F) -> Self
    where
        F: Fn(&mut Event, &DispatchContext<'_>) + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            callback: Arc::new(f),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether both handles refer to the same callback
    pub fn is(&self, other: &Listener) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.callback), Arc::as_ptr(&other.callback))
    }

    pub(crate) fn call(&self, event: &mut Event, context: &DispatchContext<'_>) {
        (self.callback)(event, context)
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
