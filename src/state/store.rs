//! Session-scoped key-value store seam.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use super::record::LiveRecord;

/// A value held in a session store slot.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreValue {
    /// Plain data, typically written by a widget.
    Data(Value),
    /// A registered record. Compared by identity.
    Record(LiveRecord),
}

impl StoreValue {
    pub fn as_data(&self) -> Option<&Value> {
        match self {
            StoreValue::Data(value) => Some(value),
            StoreValue::Record(_) => None,
        }
    }

    pub fn as_record(&self) -> Option<&LiveRecord> {
        match self {
            StoreValue::Record(record) => Some(record),
            StoreValue::Data(_) => None,
        }
    }
}

impl From<Value> for StoreValue {
    fn from(value: Value) -> Self {
        StoreValue::Data(value)
    }
}

impl From<LiveRecord> for StoreValue {
    fn from(record: LiveRecord) -> Self {
        StoreValue::Record(record)
    }
}

/// The host framework's per-session key-value store.
///
/// Implement this over the host's session state. The store lives for one
/// user session and is only touched from that session's evaluation pass.
pub trait SessionStore {
    /// Returns the value stored under `key`.
    fn get(&self, key: &str) -> Option<&StoreValue>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: String, value: StoreValue);

    /// Iterates over all keys, in no particular order.
    fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_>;

    /// Returns `true` if `key` holds a value.
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// In-memory [`SessionStore`].
///
/// Use one per user session. Dropping it (or calling [`clear`](Self::clear))
/// is the end of every record registered in it.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    entries: HashMap<String, StoreValue>,
}

impl SessionState {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes `value` and stores it as plain data under `key`.
    ///
    /// This is how a widget bound to `"<TypeName>.<field>"` writes its value.
    pub fn set_value<T: Serialize + ?Sized>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(value)?;
        self.entries.insert(key.into(), StoreValue::Data(value));
        Ok(())
    }

    /// Returns the plain data stored under `key`.
    pub fn get_value(&self, key: &str) -> Option<&Value> {
        self.entries.get(key).and_then(StoreValue::as_data)
    }

    pub fn remove(&mut self, key: &str) -> Option<StoreValue> {
        self.entries.remove(key)
    }

    /// Drops every entry, as the host does when the session ends.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SessionStore for SessionState {
    fn get(&self, key: &str) -> Option<&StoreValue> {
        self.entries.get(key)
    }

    fn set(&mut self, key: String, value: StoreValue) {
        self.entries.insert(key, value);
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.entries.keys().map(String::as_str))
    }

    fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}
