//! Runtime instances of schema-bearing types and the typed-wrapper trait.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value as JsonValue};
use tracing::trace;

use crate::conf::{Conf, ParentRef};
use crate::error::{ModelError, ModelResult};
use crate::schema::Schema;
use crate::value::{Value, ValueMap, native_hash, structural_hash};

/// A runtime instance of a schema-bearing type.
///
/// Values are keyed by wire alias. Keys the schema does not know are kept
/// verbatim when supplied at construction so payload fields that are not
/// modeled yet survive a round trip; item-style writes after construction
/// only accept declared fields.
///
/// Not internally synchronized: share behind a lock if mutated across threads.
#[derive(Debug, Clone)]
pub struct StructuredObject {
    schema: Arc<Schema>,
    conf: Conf,
    values: ValueMap,
}

impl StructuredObject {
    /// Builds an instance from keyed values.
    ///
    /// Declared fields route through their descriptor (nested mappings become
    /// nested objects with this instance as parent), unknown keys are stored
    /// as given, then defaults fill every declared field still missing.
    pub fn new<I, K, V>(schema: Arc<Schema>, conf: Conf, values: I) -> ModelResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut object = Self {
            schema: Arc::clone(&schema),
            conf,
            values: ValueMap::new(),
        };
        let parent = object.parent_link();

        for (key, value) in values {
            let key = key.into();
            let value = value.into();
            match schema.field(&key) {
                Some(field) => field.set_value(&mut object, value, Some(parent.clone()))?,
                None => {
                    trace!(type_name = %schema.name(), key = %key, "Passing through unknown key");
                    object.values.insert(key, value);
                }
            }
        }

        for field in schema.fields() {
            if let Some(default) = field.default_value()
                && !object.values.contains_key(field.alias())
            {
                object.values.insert(field.alias().to_owned(), default.clone());
            }
        }

        Ok(object)
    }

    /// Builds an instance from an already decoded JSON object.
    pub fn from_mapping(schema: Arc<Schema>, map: Map<String, JsonValue>) -> ModelResult<Self> {
        Self::new(schema, Conf::default(), map)
    }

    /// Like [`from_mapping`](Self::from_mapping), rejecting anything but a JSON object.
    pub fn from_json(schema: Arc<Schema>, value: JsonValue) -> ModelResult<Self> {
        match value {
            JsonValue::Object(map) => Self::from_mapping(schema, map),
            other => Err(ModelError::NotAMapping {
                type_name: schema.name().to_owned(),
                found: json_kind(&other),
            }),
        }
    }

    #[must_use]
    pub const fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        self.schema.name()
    }

    #[must_use]
    pub const fn conf(&self) -> &Conf {
        &self.conf
    }

    /// Raw value map, keyed by alias. May still hold absence markers.
    #[must_use]
    pub const fn values(&self) -> &ValueMap {
        &self.values
    }

    pub(crate) const fn values_mut(&mut self) -> &mut ValueMap {
        &mut self.values
    }

    /// Link handed to nested objects built by this instance.
    #[must_use]
    pub fn parent_link(&self) -> ParentRef {
        ParentRef::new(self.schema.name(), self.conf.parent.clone())
    }

    /// Reads a declared field, falling back to its default.
    ///
    /// `Ok(None)` means the field is declared but unset.
    pub fn get(&self, key: &str) -> ModelResult<Option<&Value>> {
        self.schema
            .field(key)
            .map(|field| field.get_value(self))
            .ok_or_else(|| ModelError::KeyNotFound(key.to_owned()))
    }

    /// Declared field value, `None` when unset or undeclared.
    #[must_use]
    pub fn value_of(&self, key: &str) -> Option<&Value> {
        self.get(key).ok().flatten()
    }

    /// Writes a declared field through its descriptor.
    ///
    /// Nested values built here get this object as their parent, the same
    /// link construction records, not this object's own parent.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> ModelResult<()> {
        let schema = Arc::clone(&self.schema);
        let field = schema
            .field(key)
            .ok_or_else(|| ModelError::KeyNotFound(key.to_owned()))?;
        let parent = self.parent_link();
        field.set_value(self, value.into(), Some(parent))
    }

    /// Cleans, then checks whether `key` holds a value.
    pub fn contains(&mut self, key: &str) -> bool {
        self.clean();
        self.values.contains_key(key)
    }

    /// Drops every entry holding the absence marker.
    pub fn clean(&mut self) {
        self.values.retain(|_, value| !value.is_absent());
    }

    /// Cleans, then exports every entry as a JSON primitive.
    pub fn to_primitive(&mut self) -> Map<String, JsonValue> {
        self.clean();
        self.primitive()
    }

    /// Export without mutating: absence markers are skipped, not removed.
    #[must_use]
    pub fn primitive(&self) -> Map<String, JsonValue> {
        self.values
            .iter()
            .filter(|(_, value)| !value.is_absent())
            .map(|(key, value)| {
                let exported = match self.schema.field(key) {
                    Some(field) => field.export(self),
                    None => value.export(),
                };
                (key.clone(), exported)
            })
            .collect()
    }

    /// Canonical compact JSON text of [`to_primitive`](Self::to_primitive).
    pub fn as_text(&mut self) -> ModelResult<String> {
        self.clean();
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON text.
    pub fn as_pretty_text(&mut self) -> ModelResult<String> {
        self.clean();
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// (alias, exported value) pairs, recomputed on every call.
    pub fn iter(&mut self) -> impl Iterator<Item = (String, JsonValue)> + use<> {
        self.to_primitive().into_iter()
    }

    pub fn iter_keys(&mut self) -> impl Iterator<Item = String> + use<> {
        self.iter().map(|(key, _)| key)
    }

    pub fn iter_values(&mut self) -> impl Iterator<Item = JsonValue> + use<> {
        self.iter().map(|(_, value)| value)
    }

    /// Sum over present entries of `hash(key) + structural_hash(value)`.
    ///
    /// Independent of insertion order. Absence markers are ignored so the
    /// hash is that of the cleaned value set.
    #[must_use]
    pub fn structural_hash(&self) -> u64 {
        self.values
            .iter()
            .filter(|(_, value)| !value.is_absent())
            .fold(0u64, |acc, (key, value)| {
                acc.wrapping_add(native_hash(key.as_str()))
                    .wrapping_add(structural_hash(value))
            })
    }
}

/// Same concrete type and same structural hash.
///
/// Being a sum of hashes, this is weaker than field-wise equality: swapping
/// the values of two keys keeps the sum, so `{"offset": 2, "length": 3}` and
/// `{"offset": 3, "length": 2}` compare equal and collapse in a `HashSet`.
impl PartialEq for StructuredObject {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.schema, &other.schema) && self.structural_hash() == other.structural_hash()
    }
}

impl Eq for StructuredObject {}

impl Hash for StructuredObject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.structural_hash());
    }
}

impl fmt::Display for StructuredObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

/// Serializes as [`primitive`](StructuredObject::primitive).
impl Serialize for StructuredObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.primitive().serialize(serializer)
    }
}

const fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// Typed wrapper around a [`StructuredObject`] of one fixed schema.
pub trait ObjectType: Sized {
    /// The shared schema of this type.
    fn schema() -> Arc<Schema>;

    /// Wraps an object without checking its schema.
    fn from_object(object: StructuredObject) -> Self;

    fn as_object(&self) -> &StructuredObject;

    fn as_object_mut(&mut self) -> &mut StructuredObject;

    /// Wraps an object after checking it is of this type or a subtype.
    fn cast(object: StructuredObject) -> ModelResult<Self> {
        let expected = Self::schema();
        if object.schema().is_a(&expected) {
            Ok(Self::from_object(object))
        } else {
            Err(ModelError::WrongType {
                expected: expected.name().to_owned(),
                found: object.type_name().to_owned(),
            })
        }
    }

    fn new<I, K, V>(values: I) -> ModelResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        StructuredObject::new(Self::schema(), Conf::default(), values).map(Self::from_object)
    }

    fn from_mapping(map: Map<String, JsonValue>) -> ModelResult<Self> {
        StructuredObject::from_mapping(Self::schema(), map).map(Self::from_object)
    }

    fn from_json(value: JsonValue) -> ModelResult<Self> {
        StructuredObject::from_json(Self::schema(), value).map(Self::from_object)
    }

    fn to_primitive(&mut self) -> Map<String, JsonValue> {
        self.as_object_mut().to_primitive()
    }

    fn as_text(&mut self) -> ModelResult<String> {
        self.as_object_mut().as_text()
    }
}
