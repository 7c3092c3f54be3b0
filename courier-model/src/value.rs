//! Runtime values held by structured objects.
//!
//! [`Value`] is the tagged sum type every field resolves to. Raw payloads
//! arrive as `serde_json::Value` and are converted on the way in; exports go
//! back out as `serde_json::Value` so any JSON encoder can take them as-is.

use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::{Number, Value as JsonValue};

use crate::object::StructuredObject;

/// Insertion-ordered mapping from key to value.
pub type ValueMap = IndexMap<String, Value>;

/// A resolved field value.
///
/// `Null` is the absence marker: entries holding it are dropped by
/// [`StructuredObject::clean`] and never exported.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    /// Unsigned integers that do not fit `i64`.
    UInt(u64),
    Float(f64),
    Text(String),
    List(Vec<Value>),
    Map(ValueMap),
    Object(Box<StructuredObject>),
    Lazy(LazyText),
}

impl Value {
    /// Returns true for the absence marker.
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short name of the variant, used in error messages.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) | Self::UInt(_) => "integer",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Object(_) => "object",
            Self::Lazy(_) => "lazy text",
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::UInt(u) if *u <= i64::MAX as u64 => Some(*u as i64),
            _ => None,
        }
    }

    /// Integers widen to floats.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            Self::UInt(u) => Some(*u as f64),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&StructuredObject> {
        match self {
            Self::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut StructuredObject> {
        match self {
            Self::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Converts to a JSON-primitive form.
    ///
    /// Nested objects export their cleaned primitive mapping, lazy text is
    /// evaluated, and non-finite floats fall back to their string form since
    /// JSON has no representation for them.
    #[must_use]
    pub fn export(&self) -> JsonValue {
        match self {
            Self::Null => JsonValue::Null,
            Self::Bool(b) => JsonValue::Bool(*b),
            Self::Int(i) => JsonValue::Number((*i).into()),
            Self::UInt(u) => JsonValue::Number((*u).into()),
            Self::Float(f) => {
                Number::from_f64(*f).map_or_else(|| JsonValue::String(f.to_string()), JsonValue::Number)
            }
            Self::Text(s) => JsonValue::String(s.clone()),
            Self::List(items) => JsonValue::Array(items.iter().map(Self::export).collect()),
            Self::Map(map) => JsonValue::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.export()))
                    .collect(),
            ),
            Self::Object(obj) => JsonValue::Object(obj.primitive()),
            Self::Lazy(text) => JsonValue::String(text.eval()),
        }
    }

    /// See [`structural_hash`].
    #[must_use]
    pub fn structural_hash(&self) -> u64 {
        structural_hash(self)
    }
}

/// Serializes as the exported primitive form.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.export().serialize(serializer)
    }
}

impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(b) => Self::Bool(b),
            JsonValue::Number(n) => n
                .as_i64()
                .map(Self::Int)
                .or_else(|| n.as_u64().map(Self::UInt))
                .or_else(|| n.as_f64().map(Self::Float))
                .unwrap_or(Self::Null),
            JsonValue::String(s) => Self::Text(s),
            JsonValue::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            JsonValue::Object(map) => Self::Map(
                map.into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(Self::UInt(value), Self::Int)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<ValueMap> for Value {
    fn from(map: ValueMap) -> Self {
        Self::Map(map)
    }
}

impl From<StructuredObject> for Value {
    fn from(obj: StructuredObject) -> Self {
        Self::Object(Box::new(obj))
    }
}

impl From<LazyText> for Value {
    fn from(text: LazyText) -> Self {
        Self::Lazy(text)
    }
}

/// Text computed on demand, e.g. a localized string resolved at export time.
#[derive(Clone)]
pub struct LazyText(Arc<dyn Fn() -> String + Send + Sync>);

impl LazyText {
    pub fn new(f: impl Fn() -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Evaluates the wrapped function.
    #[must_use]
    pub fn eval(&self) -> String {
        (self.0)()
    }
}

impl fmt::Debug for LazyText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LazyText").field(&self.eval()).finish()
    }
}

impl fmt::Display for LazyText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.eval())
    }
}

impl PartialEq for LazyText {
    fn eq(&self, other: &Self) -> bool {
        self.eval() == other.eval()
    }
}

// =============================================================================
// STRUCTURAL HASH
// =============================================================================

/// Hashes a value with the process-stable default hasher.
pub(crate) fn native_hash<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Order-independent hash of an arbitrarily nested value.
///
/// Lists sum their element hashes, maps sum `hash(key) + structural_hash(value)`
/// over their entries, nested objects contribute their own structural hash and
/// everything else its native hash. Additions wrap. Hashing is blind to the
/// numeric variant: `true`, `1`, `1.0` and `UInt(1)` all hash alike.
///
/// This is a sum of hashes: it is neither collision resistant nor sensitive to
/// element order, and distinct values can collide. NaN has no stable hash and
/// contributes zero.
#[must_use]
pub fn structural_hash(value: &Value) -> u64 {
    match value {
        Value::Null => native_hash(&()),
        // Bools hash as 0/1 so `true` and `1` agree, like integral floats.
        Value::Bool(b) => native_hash(&i64::from(*b)),
        Value::Int(i) => native_hash(i),
        Value::UInt(u) => i64::try_from(*u).map_or_else(|_| native_hash(u), |i| native_hash(&i)),
        Value::Float(f) => float_hash(*f),
        Value::Text(s) => native_hash(s.as_str()),
        Value::List(items) => items
            .iter()
            .fold(0u64, |acc, item| acc.wrapping_add(structural_hash(item))),
        Value::Map(map) => map.iter().fold(0u64, |acc, (key, item)| {
            acc.wrapping_add(native_hash(key.as_str()))
                .wrapping_add(structural_hash(item))
        }),
        Value::Object(obj) => obj.structural_hash(),
        Value::Lazy(text) => native_hash(text.eval().as_str()),
    }
}

/// Integral floats hash like the equal integer so `2.0` and `2` agree.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn float_hash(f: f64) -> u64 {
    if f.is_nan() {
        return 0;
    }
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        return native_hash(&(f as i64));
    }
    native_hash(&f.to_bits())
}
