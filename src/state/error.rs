//! Session record errors.

use thiserror::Error;

/// A schema was rejected at registration.
///
/// Each variant names the record and lists every offending member, so one
/// failed registration reports the whole problem rather than the first
/// member found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The schema declares no typed field at all.
    #[error(
        "record '{record}' must declare typed fields; every field needs a type and an initial value"
    )]
    NoFields { record: String },

    /// Typed fields without a default value.
    #[error(
        "all typed fields of record '{record}' must have an initial value; missing: {}",
        fields.join(", ")
    )]
    MissingDefault { record: String, fields: Vec<String> },

    /// Data members declared without a type.
    #[error(
        "record '{record}' admits only typed fields; missing a type: {}",
        members.join(", ")
    )]
    UnannotatedMember {
        record: String,
        members: Vec<String>,
    },

    /// Behaviors that need a bound instance.
    #[error(
        "record '{record}' admits only static or type-level behaviors; instance behaviors: {}",
        methods.join(", ")
    )]
    InstanceMethod {
        record: String,
        methods: Vec<String>,
    },
}

/// Error returned by registration and record access.
#[derive(Debug, Error)]
pub enum StateError {
    /// Registration failed validation.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The record's key already holds plain data.
    #[error("session key '{key}' is already used by a non-record value")]
    KeyOccupied { key: String },

    /// The record has no such field.
    #[error("record '{record}' has no field '{field}'")]
    UnknownField { record: String, field: String },

    /// The record has no such behavior.
    #[error("record '{record}' has no behavior '{name}'")]
    UnknownBehavior { record: String, name: String },

    /// A field value could not be converted to the requested type.
    #[error("field '{record}.{field}' could not be decoded: {source}")]
    Decode {
        record: String,
        field: String,
        #[source]
        source: serde_json::Error,
    },
}
