//! Record schemas and their validation.

use serde_json::Value;

use super::error::{SchemaError, StateError};
use super::record::LiveRecord;
use super::store::SessionStore;

/// Declared type of a record field.
///
/// The type documents intent and is reported back through
/// [`LiveRecord::field_type`]; values are not checked against it, because
/// widgets write whatever their own value type is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Bool,
    Int,
    Float,
    Str,
    List,
    Map,
    /// Any JSON value.
    Any,
}

impl FieldType {
    /// Returns a human-readable name for this type.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Bool => "bool",
            FieldType::Int => "int",
            FieldType::Float => "float",
            FieldType::Str => "str",
            FieldType::List => "list",
            FieldType::Map => "map",
            FieldType::Any => "any",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a behavior needs in order to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Receiver {
    /// Needs nothing from the record.
    Static,
    /// Works on the record as a whole (the singleton itself).
    Type,
    /// Needs a per-instance receiver. Records are singletons without
    /// instances, so schemas declaring these are rejected.
    Instance,
}

/// A behavior attached to a record.
///
/// Behaviors get the live record and the session store as explicit
/// parameters. [`Receiver::Static`] behaviors are expected to ignore the
/// record.
pub type BehaviorFn = fn(&LiveRecord, &mut dyn SessionStore) -> Result<Value, StateError>;

/// One member of a [`Schema`].
#[derive(Clone)]
pub enum Member {
    /// A data member. Only `ty: Some(_)` with `default: Some(_)` is valid.
    Field {
        name: String,
        ty: Option<FieldType>,
        default: Option<Value>,
    },
    /// A function member.
    Behavior {
        name: String,
        receiver: Receiver,
        func: BehaviorFn,
    },
}

impl Member {
    pub fn name(&self) -> &str {
        match self {
            Member::Field { name, .. } | Member::Behavior { name, .. } => name,
        }
    }
}

impl std::fmt::Debug for Member {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Member::Field { name, ty, default } => f
                .debug_struct("Field")
                .field("name", name)
                .field("ty", ty)
                .field("default", default)
                .finish(),
            Member::Behavior { name, receiver, .. } => f
                .debug_struct("Behavior")
                .field("name", name)
                .field("receiver", receiver)
                .finish_non_exhaustive(),
        }
    }
}

/// Describes a session record: its type name and its members.
///
/// A schema is plain data until it is handed to
/// [`register`](super::register), which validates it and turns it into a
/// [`LiveRecord`]. Adding a member with a name already in use replaces the
/// earlier one.
///
/// # Example
///
/// ```rust
/// use panelkit::{FieldType, Receiver, Schema};
/// use serde_json::json;
///
/// let schema = Schema::new("Filters")
///     .field("query", FieldType::Str, "")
///     .field("page", FieldType::Int, 1)
///     .behavior("reset_page", Receiver::Type, |record, _store| {
///         record.set("page", 1)?;
///         Ok(json!(null))
///     });
///
/// assert!(schema.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Schema {
    name: String,
    members: Vec<Member>,
}

impl Schema {
    /// Creates an empty schema for the given type name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Adds a typed field with its default value.
    pub fn field(
        self,
        name: impl Into<String>,
        ty: FieldType,
        default: impl Into<Value>,
    ) -> Self {
        self.member(Member::Field {
            name: name.into(),
            ty: Some(ty),
            default: Some(default.into()),
        })
    }

    /// Adds a typed field without a default. Registration rejects it.
    pub fn declare(self, name: impl Into<String>, ty: FieldType) -> Self {
        self.member(Member::Field {
            name: name.into(),
            ty: Some(ty),
            default: None,
        })
    }

    /// Adds an untyped data member.
    ///
    /// Registration rejects these unless the name starts with `__`, which
    /// marks private metadata that is neither validated nor exposed as a
    /// field.
    pub fn attribute(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.member(Member::Field {
            name: name.into(),
            ty: None,
            default: Some(value.into()),
        })
    }

    /// Adds a behavior.
    pub fn behavior(self, name: impl Into<String>, receiver: Receiver, func: BehaviorFn) -> Self {
        self.member(Member::Behavior {
            name: name.into(),
            receiver,
            func,
        })
    }

    /// Adds any member, replacing one with the same name.
    pub fn member(mut self, member: Member) -> Self {
        match self.members.iter_mut().find(|m| m.name() == member.name()) {
            Some(existing) => *existing = member,
            None => self.members.push(member),
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Checks the schema, reporting the first failing rule.
    ///
    /// Rules, in order:
    ///
    /// 1. at least one typed field ([`SchemaError::NoFields`]);
    /// 2. every typed field has a default ([`SchemaError::MissingDefault`]);
    /// 3. no untyped data members ([`SchemaError::UnannotatedMember`]);
    /// 4. no instance behaviors ([`SchemaError::InstanceMethod`]).
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut typed = 0;
        let mut missing_default = Vec::new();
        let mut unannotated = Vec::new();
        let mut instance = Vec::new();

        for member in &self.members {
            match member {
                Member::Field {
                    name,
                    ty: Some(_),
                    default,
                } => {
                    typed += 1;
                    if default.is_none() {
                        missing_default.push(name.clone());
                    }
                }
                Member::Field { name, ty: None, .. } => {
                    if !name.starts_with("__") {
                        unannotated.push(name.clone());
                    }
                }
                Member::Behavior { name, receiver, .. } => {
                    if *receiver == Receiver::Instance {
                        instance.push(name.clone());
                    }
                }
            }
        }

        let record = self.name.clone();
        if typed == 0 {
            return Err(SchemaError::NoFields { record });
        }
        if !missing_default.is_empty() {
            return Err(SchemaError::MissingDefault {
                record,
                fields: missing_default,
            });
        }
        if !unannotated.is_empty() {
            return Err(SchemaError::UnannotatedMember {
                record,
                members: unannotated,
            });
        }
        if !instance.is_empty() {
            return Err(SchemaError::InstanceMethod {
                record,
                methods: instance,
            });
        }
        Ok(())
    }
}
