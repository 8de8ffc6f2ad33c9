//! Live records and their registration.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::{debug, warn};

use super::error::StateError;
use super::schema::{BehaviorFn, FieldType, Member, Receiver, Schema};
use super::store::{SessionStore, StoreValue};
use crate::util::format_pairs;

/// Width under which a record displays on a single line.
const ONE_LINE_LIMIT: usize = 50;

/// Builds the shadow key that binds a widget to a record field.
///
/// ```rust
/// assert_eq!(panelkit::shadow_key("State", "attr"), "State.attr");
/// ```
pub fn shadow_key(record: &str, field: &str) -> String {
    format!("{}.{}", record, field)
}

/// Registers `schema` in `store` and returns its live record.
///
/// The first registration in a session validates the schema and stores a
/// new record under the schema's name. Every later registration with the
/// same name returns that stored record and discards the schema, so field
/// values survive the host re-running the page.
///
/// # Errors
///
/// - [`StateError::Schema`] if the schema fails [`Schema::validate`]
/// - [`StateError::KeyOccupied`] if the name already holds plain data
///
/// The store is left untouched on error.
pub fn register(store: &mut dyn SessionStore, schema: Schema) -> Result<LiveRecord, StateError> {
    if let Some(existing) = store.get(schema.name()) {
        return match existing {
            StoreValue::Record(record) => {
                debug!(record = %record.name(), "reusing registered session record");
                Ok(record.clone())
            }
            StoreValue::Data(_) => Err(StateError::KeyOccupied {
                key: schema.name().to_string(),
            }),
        };
    }

    schema.validate()?;
    let record = LiveRecord::from_schema(schema);
    store.set(record.name().to_string(), StoreValue::Record(record.clone()));
    debug!(
        record = %record.name(),
        fields = record.inner.fields.borrow().len(),
        "registered session record"
    );
    Ok(record)
}

struct FieldSlot {
    name: String,
    ty: FieldType,
    value: Value,
}

struct BehaviorSlot {
    name: String,
    receiver: Receiver,
    func: BehaviorFn,
}

struct RecordInner {
    name: String,
    fields: RefCell<Vec<FieldSlot>>,
    behaviors: Vec<BehaviorSlot>,
}

/// Handle to a registered session record.
///
/// Handles are cheap to clone and all clones share the same fields. Two
/// handles are equal only when they point at the same record.
///
/// Reads go through [`get`](Self::get), which first looks for a shadow key
/// `"<TypeName>.<field>"` in the store and, if present, copies its value into
/// the field. A shadow therefore wins on every read until it is removed or
/// rewritten.
#[derive(Clone)]
pub struct LiveRecord {
    inner: Rc<RecordInner>,
}

impl LiveRecord {
    fn from_schema(schema: Schema) -> Self {
        let mut fields = Vec::new();
        let mut behaviors = Vec::new();

        for member in schema.members() {
            match member {
                Member::Field {
                    name,
                    ty: Some(ty),
                    default: Some(value),
                } => fields.push(FieldSlot {
                    name: name.clone(),
                    ty: *ty,
                    value: value.clone(),
                }),
                Member::Field { .. } => {}
                Member::Behavior {
                    name,
                    receiver,
                    func,
                } => behaviors.push(BehaviorSlot {
                    name: name.clone(),
                    receiver: *receiver,
                    func: *func,
                }),
            }
        }

        Self {
            inner: Rc::new(RecordInner {
                name: schema.name().to_string(),
                fields: RefCell::new(fields),
                behaviors,
            }),
        }
    }

    /// Returns the record's type name, which is also its store key.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Returns the shadow key a widget should use to bind to `field`.
    pub fn key(&self, field: &str) -> String {
        shadow_key(&self.inner.name, field)
    }

    /// Returns `true` if both handles point at the same record.
    pub fn same(&self, other: &LiveRecord) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Reads a field, applying its shadow key first.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::UnknownField`] if the record has no such field.
    pub fn get(&self, store: &dyn SessionStore, field: &str) -> Result<Value, StateError> {
        let mut fields = self.inner.fields.borrow_mut();
        let slot = fields
            .iter_mut()
            .find(|slot| slot.name == field)
            .ok_or_else(|| self.unknown_field(field))?;

        let shadow = shadow_key(&self.inner.name, field);
        match store.get(&shadow) {
            Some(StoreValue::Data(value)) => {
                debug!(key = %shadow, "applying shadow value");
                slot.value = value.clone();
            }
            Some(StoreValue::Record(_)) => {
                warn!(key = %shadow, "ignoring shadow key that holds a record");
            }
            None => {}
        }

        Ok(slot.value.clone())
    }

    /// Reads a field and deserializes it into `T`.
    pub fn get_as<T: DeserializeOwned>(
        &self,
        store: &dyn SessionStore,
        field: &str,
    ) -> Result<T, StateError> {
        let value = self.get(store, field)?;
        serde_json::from_value(value).map_err(|source| StateError::Decode {
            record: self.inner.name.clone(),
            field: field.to_string(),
            source,
        })
    }

    /// Writes a field.
    ///
    /// A shadow key for the field, if present, still wins on the next read.
    pub fn set(&self, field: &str, value: impl Into<Value>) -> Result<(), StateError> {
        let mut fields = self.inner.fields.borrow_mut();
        let slot = fields
            .iter_mut()
            .find(|slot| slot.name == field)
            .ok_or_else(|| self.unknown_field(field))?;
        slot.value = value.into();
        Ok(())
    }

    /// Returns the declared type of a field.
    pub fn field_type(&self, field: &str) -> Option<FieldType> {
        self.inner
            .fields
            .borrow()
            .iter()
            .find(|slot| slot.name == field)
            .map(|slot| slot.ty)
    }

    /// Returns the field names in declaration order.
    pub fn field_names(&self) -> Vec<String> {
        self.inner
            .fields
            .borrow()
            .iter()
            .map(|slot| slot.name.clone())
            .collect()
    }

    /// Returns `(field, value)` pairs in declaration order.
    ///
    /// This is a snapshot of the stored values; shadow keys are not applied.
    pub fn attrs(&self) -> Vec<(String, Value)> {
        self.inner
            .fields
            .borrow()
            .iter()
            .map(|slot| (slot.name.clone(), slot.value.clone()))
            .collect()
    }

    /// Runs a behavior with this record and `store` as its arguments.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::UnknownBehavior`] if there is no behavior named
    /// `name`, otherwise whatever the behavior returns.
    pub fn call(&self, store: &mut dyn SessionStore, name: &str) -> Result<Value, StateError> {
        let behavior = self
            .inner
            .behaviors
            .iter()
            .find(|b| b.name == name)
            .ok_or_else(|| StateError::UnknownBehavior {
                record: self.inner.name.clone(),
                name: name.to_string(),
            })?;

        debug!(
            record = %self.inner.name,
            behavior = name,
            receiver = ?behavior.receiver,
            "calling record behavior"
        );
        (behavior.func)(self, store)
    }

    fn unknown_field(&self, field: &str) -> StateError {
        StateError::UnknownField {
            record: self.inner.name.clone(),
            field: field.to_string(),
        }
    }
}

impl PartialEq for LiveRecord {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

/// Values render in their JSON form, so strings show double quotes.
impl fmt::Display for LiveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self.inner.fields.borrow();
        let pairs = fields
            .iter()
            .map(|slot| (slot.name.as_str(), slot.value.to_string()));
        f.write_str(&format_pairs(&self.inner.name, pairs, ONE_LINE_LIMIT))
    }
}

impl fmt::Debug for LiveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Serializes as a map of field names to their stored values.
impl Serialize for LiveRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = self.inner.fields.borrow();
        let mut map = serializer.serialize_map(Some(fields.len()))?;
        for slot in fields.iter() {
            map.serialize_entry(&slot.name, &slot.value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::store::SessionState;
    use crate::state::SchemaError;
    use serde_json::json;

    fn state_schema() -> Schema {
        Schema::new("State").field("attr", FieldType::Int, 0)
    }

    #[test]
    fn test_register_stores_record_under_name() {
        let mut session = SessionState::new();
        let record = register(&mut session, state_schema()).unwrap();

        assert_eq!(record.name(), "State");
        assert_eq!(
            session.get("State"),
            Some(&StoreValue::Record(record.clone()))
        );
    }

    #[test]
    fn test_register_twice_returns_same_record() {
        let mut session = SessionState::new();
        let first = register(&mut session, state_schema()).unwrap();
        first.set("attr", 1).unwrap();

        let second = register(&mut session, state_schema()).unwrap();
        assert!(second.same(&first));
        assert_eq!(second.get(&session, "attr").unwrap(), json!(1));
    }

    #[test]
    fn test_reregistration_ignores_new_schema() {
        let mut session = SessionState::new();
        register(&mut session, state_schema()).unwrap();

        let again = register(
            &mut session,
            Schema::new("State").declare("other", FieldType::Str),
        )
        .unwrap();
        assert_eq!(again.field_names(), vec!["attr".to_string()]);
    }

    #[test]
    fn test_invalid_schema_leaves_store_untouched() {
        let mut session = SessionState::new();
        let err = register(
            &mut session,
            Schema::new("State").declare("attr", FieldType::Int),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            StateError::Schema(SchemaError::MissingDefault { .. })
        ));
        assert!(!session.contains("State"));
        assert!(session.is_empty());
    }

    #[test]
    fn test_key_occupied_by_data() {
        let mut session = SessionState::new();
        session.set_value("State", "not a record").unwrap();

        let err = register(&mut session, state_schema()).unwrap_err();
        assert!(matches!(err, StateError::KeyOccupied { ref key } if key == "State"));
        assert_eq!(session.get_value("State"), Some(&json!("not a record")));
    }

    #[test]
    fn test_shadow_applied_on_every_read() {
        let mut session = SessionState::new();
        let record = register(&mut session, state_schema()).unwrap();
        assert_eq!(record.get(&session, "attr").unwrap(), json!(0));

        session.set_value("State.attr", &5).unwrap();
        assert_eq!(record.get(&session, "attr").unwrap(), json!(5));

        record.set("attr", 9).unwrap();
        assert_eq!(record.get(&session, "attr").unwrap(), json!(5));

        session.set_value("State.attr", &7).unwrap();
        assert_eq!(record.get(&session, "attr").unwrap(), json!(7));
    }

    #[test]
    fn test_shadow_sticks_after_removal() {
        let mut session = SessionState::new();
        let record = register(&mut session, state_schema()).unwrap();

        session.set_value("State.attr", &3).unwrap();
        record.get(&session, "attr").unwrap();
        session.remove("State.attr");

        assert_eq!(record.get(&session, "attr").unwrap(), json!(3));
    }

    #[test]
    fn test_shadow_holding_record_is_ignored() {
        let mut session = SessionState::new();
        let record = register(&mut session, state_schema()).unwrap();
        let other = register(
            &mut session,
            Schema::new("Other").field("x", FieldType::Int, 0),
        )
        .unwrap();
        session.set("State.attr".into(), StoreValue::Record(other));

        assert_eq!(record.get(&session, "attr").unwrap(), json!(0));
    }

    #[test]
    fn test_unknown_field() {
        let mut session = SessionState::new();
        let record = register(&mut session, state_schema()).unwrap();

        assert!(matches!(
            record.get(&session, "nope"),
            Err(StateError::UnknownField { .. })
        ));
        assert!(matches!(
            record.set("nope", 1),
            Err(StateError::UnknownField { .. })
        ));
    }

    #[test]
    fn test_get_as_decodes() {
        let mut session = SessionState::new();
        let record = register(
            &mut session,
            Schema::new("Prefs").field("tags", FieldType::List, json!(["a", "b"])),
        )
        .unwrap();

        let tags: Vec<String> = record.get_as(&session, "tags").unwrap();
        assert_eq!(tags, vec!["a".to_string(), "b".to_string()]);

        let err = record.get_as::<u32>(&session, "tags").unwrap_err();
        assert!(matches!(err, StateError::Decode { .. }));
    }

    #[test]
    fn test_call_behavior() {
        fn bump(record: &LiveRecord, store: &mut dyn SessionStore) -> Result<Value, StateError> {
            let current: i64 = record.get_as(store, "attr")?;
            record.set("attr", current + 1)?;
            Ok(json!(current + 1))
        }

        let mut session = SessionState::new();
        let record = register(
            &mut session,
            state_schema().behavior("bump", Receiver::Type, bump),
        )
        .unwrap();

        assert_eq!(record.call(&mut session, "bump").unwrap(), json!(1));
        assert_eq!(record.call(&mut session, "bump").unwrap(), json!(2));
        assert!(matches!(
            record.call(&mut session, "missing"),
            Err(StateError::UnknownBehavior { .. })
        ));
    }

    #[test]
    fn test_display_one_line() {
        let mut session = SessionState::new();
        let record = register(
            &mut session,
            Schema::new("State")
                .field("attr", FieldType::Int, 0)
                .field("name", FieldType::Str, "x"),
        )
        .unwrap();

        assert_eq!(record.to_string(), r#"State(attr=0, name="x")"#);
        assert_eq!(format!("{:?}", record), record.to_string());
    }

    #[test]
    fn test_display_multi_line() {
        let mut session = SessionState::new();
        let record = register(
            &mut session,
            Schema::new("Settings")
                .field("title", FieldType::Str, "A fairly long title")
                .field("subtitle", FieldType::Str, "and more"),
        )
        .unwrap();

        assert_eq!(
            record.to_string(),
            "Settings(\n    title=\"A fairly long title\",\n    subtitle=\"and more\",\n)"
        );
    }

    #[test]
    fn test_display_switches_at_fifty_columns() {
        let mut session = SessionState::new();
        // `State(label="")` is 15 columns before the value.
        let record = register(
            &mut session,
            Schema::new("State").field("label", FieldType::Str, "a".repeat(34)),
        )
        .unwrap();
        assert_eq!(record.to_string().chars().count(), 49);
        assert!(!record.to_string().contains('\n'));

        record.set("label", "a".repeat(35)).unwrap();
        assert_eq!(
            record.to_string(),
            format!("State(\n    label=\"{}\",\n)", "a".repeat(35))
        );
    }

    #[test]
    fn test_display_measures_wide_chars_in_columns() {
        let mut session = SessionState::new();
        // 17 wide chars plus one ASCII char fill 35 columns with 18 chars.
        let value = format!("{}a", "日".repeat(17));
        let record = register(
            &mut session,
            Schema::new("State").field("label", FieldType::Str, value.clone()),
        )
        .unwrap();

        let one_line = format!("State(label=\"{}\")", value);
        assert_eq!(one_line.chars().count(), 33);
        assert_eq!(
            record.to_string(),
            format!("State(\n    label=\"{}\",\n)", value)
        );
    }

    #[test]
    fn test_attrs_skip_shadows() {
        let mut session = SessionState::new();
        let record = register(&mut session, state_schema()).unwrap();
        session.set_value("State.attr", &8).unwrap();

        assert_eq!(record.attrs(), vec![("attr".to_string(), json!(0))]);
        record.get(&session, "attr").unwrap();
        assert_eq!(record.attrs(), vec![("attr".to_string(), json!(8))]);
    }

    #[test]
    fn test_serialize_as_map() {
        let mut session = SessionState::new();
        let record = register(&mut session, state_schema()).unwrap();
        assert_eq!(serde_json::to_value(&record).unwrap(), json!({"attr": 0}));
    }

    #[test]
    fn test_private_attribute_not_a_field() {
        let mut session = SessionState::new();
        let record = register(&mut session, state_schema().attribute("__version", 1)).unwrap();
        assert_eq!(record.field_names(), vec!["attr".to_string()]);
        assert_eq!(record.field_type("attr"), Some(FieldType::Int));
        assert_eq!(record.field_type("__version"), None);
    }
}
