//! Session-scoped singleton records.
//!
//! This module provides:
//!
//! - [`Schema`]: a record's type name, typed fields with defaults, and behaviors
//! - [`register`]: validates a schema once per session and returns its [`LiveRecord`]
//! - [`LiveRecord`]: the singleton handle, with shadow-aware field reads
//! - [`SessionStore`] / [`SessionState`]: the session key-value store seam
//! - [`SchemaError`] / [`StateError`]: validation and access errors
//!
//! # Singletons per session
//!
//! Hosts that re-run the whole page on every interaction would rebuild any
//! state declared in page code. Registering a record instead stores it in the
//! session under its type name; the next run's registration finds it there
//! and returns it as is.
//!
//! # Widget binding
//!
//! A widget whose key is `"<TypeName>.<field>"` (see [`LiveRecord::key`])
//! writes into the session under that key. Every [`LiveRecord::get`] of the
//! field checks that key first and copies its value into the field, so the
//! widget's value is what the page reads.

mod error;
mod record;
mod schema;
mod store;

pub use error::{SchemaError, StateError};
pub use record::{register, shadow_key, LiveRecord};
pub use schema::{BehaviorFn, FieldType, Member, Receiver, Schema};
pub use store::{SessionState, SessionStore, StoreValue};
