//! Field descriptors: one declared, aliased attribute of a structured type.

use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::conf::{Conf, ParentRef};
use crate::error::{ModelError, ModelResult};
use crate::object::StructuredObject;
use crate::schema::Schema;
use crate::value::Value;

/// Lazy reference to another type's schema.
///
/// A function rather than an `Arc` so that types can refer to each other
/// (or to themselves) before either is finalized. The function must hand out
/// the same shared instance on every call, typically from a `LazyLock`.
pub type SchemaRef = fn() -> Arc<Schema>;

/// Specification of one field: local name, wire alias, default and an
/// optional nested type binding.
///
/// Descriptors are built once when a schema is declared and are immutable
/// afterwards.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    name: String,
    alias: String,
    default: Option<Value>,
    nested: Option<SchemaRef>,
}

impl FieldDescriptor {
    /// Creates a field whose alias equals its local name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            alias: name.clone(),
            name,
            default: None,
            nested: None,
        }
    }

    /// Sets the wire name.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }

    /// Sets the default installed when a payload omits this field.
    /// A `Null` default means no default.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        let default = default.into();
        self.default = (!default.is_absent()).then_some(default);
        self
    }

    /// Binds the field to a nested structured type.
    #[must_use]
    pub fn with_nested(mut self, schema: SchemaRef) -> Self {
        self.nested = Some(schema);
        self
    }

    /// Local declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wire name, the key used in the owner's value map.
    #[must_use]
    pub fn alias(&self) -> &str {
        &self.alias
    }

    #[must_use]
    pub const fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Resolves the nested type, if any.
    #[must_use]
    pub fn nested_schema(&self) -> Option<Arc<Schema>> {
        self.nested.map(|schema| schema())
    }

    /// Stored value for this field on `owner`, falling back to the default.
    #[must_use]
    pub fn get_value<'a>(&'a self, owner: &'a StructuredObject) -> Option<&'a Value> {
        owner.values().get(&self.alias).or(self.default.as_ref())
    }

    /// Converts `value` and stores it under this field's alias.
    pub fn set_value(
        &self,
        owner: &mut StructuredObject,
        value: Value,
        parent: Option<ParentRef>,
    ) -> ModelResult<()> {
        let converted = self.convert(value, parent.as_ref())?;
        owner.values_mut().insert(self.alias.clone(), converted);
        Ok(())
    }

    /// Builds nested objects out of raw mappings.
    ///
    /// Mappings become instances of the nested type with `parent` recorded in
    /// their configuration. Lists convert element-wise, keeping order. Objects
    /// already of the nested type (or a subtype) are kept. Without a nested
    /// binding the value passes through untouched.
    pub fn convert(&self, value: Value, parent: Option<&ParentRef>) -> ModelResult<Value> {
        let Some(nested) = self.nested else {
            return Ok(value);
        };
        match value {
            Value::Map(map) => {
                let conf = parent.map_or_else(Conf::default, |p| {
                    Conf::with_parent(p.clone().under(&self.alias))
                });
                let object = StructuredObject::new(nested(), conf, map)?;
                Ok(Value::Object(Box::new(object)))
            }
            Value::List(items) => items
                .into_iter()
                .map(|item| self.convert(item, parent))
                .collect::<ModelResult<Vec<_>>>()
                .map(Value::List),
            Value::Object(object) => {
                let expected = nested();
                if object.schema().is_a(&expected) {
                    Ok(Value::Object(object))
                } else {
                    Err(ModelError::TypeMismatch {
                        alias: self.alias.clone(),
                        expected: expected.name().to_owned(),
                        found: object.schema().name().to_owned(),
                    })
                }
            }
            other => Ok(other),
        }
    }

    /// Primitive form of the stored value; `Null` when the field is unset.
    #[must_use]
    pub fn export(&self, owner: &StructuredObject) -> JsonValue {
        self.get_value(owner).map_or(JsonValue::Null, Value::export)
    }
}
