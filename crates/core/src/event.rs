// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Events carried through the dispatcher
//!
//! An [`Event`] names an occurrence, optionally points at the object it
//! concerns, carries keyed arguments, and records whether a listener has
//! stopped its propagation.

use crate::error::EventError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::any::Any;
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Name under which listeners are registered
///
/// Non-empty, made only of ASCII letters, digits, `_` and `.`
/// (e.g. `"user.created"`, `"cache.flush_all"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EventName(String);

impl EventName {
    pub fn new(name: impl Into<String>) -> Result<Self, EventError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check a candidate name without allocating
    pub fn is_valid(name: &str) -> bool {
        validate_name(name).is_ok()
    }
}

fn validate_name(name: &str) -> Result<(), EventError> {
    if name.is_empty() {
        return Err(EventError::InvalidName {
            name: name.to_string(),
            reason: "name is empty",
        });
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
    {
        return Err(EventError::InvalidName {
            name: name.to_string(),
            reason: "only [A-Za-z0-9_.] are allowed",
        });
    }
    Ok(())
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for EventName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EventName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for EventName {
    type Err = EventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for EventName {
    type Error = EventError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for EventName {
    type Error = EventError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EventName> for String {
    fn from(name: EventName) -> Self {
        name.0
    }
}

/// Shared handle to whatever object an event concerns
pub type Target = Arc<dyn Any + Send + Sync>;

/// A dispatched occurrence
///
/// Built by the caller, handed to `dispatch`, and returned once every
/// listener has run. Listeners may only stop propagation or attach a result;
/// the name, target and arguments are fixed at construction.
#[derive(Clone)]
pub struct Event {
    name: EventName,
    target: Option<Target>,
    arguments: BTreeMap<String, Value>,
    propagation_stopped: bool,
    result: Option<Value>,
}

impl Event {
    /// Create an empty event: no target, no arguments
    pub fn new(name: EventName) -> Self {
        Self {
            name,
            target: None,
            arguments: BTreeMap::new(),
            propagation_stopped: false,
            result: None,
        }
    }

    /// Create an empty event from an unvalidated name
    pub fn named(name: &str) -> Result<Self, EventError> {
        Ok(Self::new(EventName::new(name)?))
    }

    pub fn with_target<T: Any + Send + Sync>(self, target: T) -> Self {
        self.with_shared_target(Arc::new(target))
    }

    /// Attach a target that the caller keeps a handle to
    pub fn with_shared_target(mut self, target: Target) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_argument(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    pub fn with_arguments<K, V>(mut self, arguments: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.arguments
            .extend(arguments.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn name(&self) -> &EventName {
        &self.name
    }

    /// The target downcast to `T`, if one is set and has that type
    pub fn target<T: Any>(&self) -> Option<&T> {
        self.target.as_deref().and_then(|t| t.downcast_ref::<T>())
    }

    pub fn shared_target(&self) -> Option<&Target> {
        self.target.as_ref()
    }

    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }

    /// Look up an argument by key
    pub fn argument(&self, key: &str) -> Result<&Value, EventError> {
        self.arguments
            .get(key)
            .ok_or_else(|| EventError::ArgumentNotFound(key.to_string()))
    }

    /// Look up an argument and decode it into `T`
    pub fn argument_as<T: DeserializeOwned>(&self, key: &str) -> Result<T, EventError> {
        let value = self.argument(key)?;
        T::deserialize(value).map_err(|source| EventError::ArgumentType {
            key: key.to_string(),
            source,
        })
    }

    pub fn has_argument(&self, key: &str) -> bool {
        self.arguments.contains_key(key)
    }

    pub fn arguments(&self) -> &BTreeMap<String, Value> {
        &self.arguments
    }

    /// Stop further listeners from seeing this event
    ///
    /// There is no way back: once stopped, the event stays stopped.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// Attach a result for the caller of `dispatch`, replacing any earlier one
    pub fn set_result(&mut self, result: impl Into<Value>) {
        self.result = Some(result.into());
    }

    pub fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    pub fn take_result(&mut self) -> Option<Value> {
        self.result.take()
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.name)
            .field("has_target", &self.target.is_some())
            .field("arguments", &self.arguments)
            .field("propagation_stopped", &self.propagation_stopped)
            .field("result", &self.result)
            .finish()
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
