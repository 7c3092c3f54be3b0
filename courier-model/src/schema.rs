//! Per-type schemas and the builder that finalizes them.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::field::FieldDescriptor;
use crate::registry;
use crate::value::Value;

/// Finalized field table of a structured type.
///
/// Built once by [`SchemaBuilder`] and immutable afterwards. Identity is the
/// allocation: two schemas are the same type only if they are the same `Arc`.
#[derive(Debug)]
pub struct Schema {
    name: String,
    bases: Vec<Arc<Schema>>,
    /// alias -> descriptor, inherited entries first.
    fields: IndexMap<String, FieldDescriptor>,
    /// local name -> alias.
    aliases: IndexMap<String, String>,
    /// alias -> default, derived from the merged field table.
    defaults: IndexMap<String, Value>,
}

impl Schema {
    /// Starts a new schema declaration.
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder::new(name)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn bases(&self) -> &[Arc<Self>] {
        &self.bases
    }

    /// Descriptor registered under `alias`.
    #[must_use]
    pub fn field(&self, alias: &str) -> Option<&FieldDescriptor> {
        self.fields.get(alias)
    }

    /// Descriptor declared under the local name `name`.
    #[must_use]
    pub fn field_by_name(&self, name: &str) -> Option<&FieldDescriptor> {
        self.alias_for(name).and_then(|alias| self.field(alias))
    }

    #[must_use]
    pub fn is_field(&self, alias: &str) -> bool {
        self.fields.contains_key(alias)
    }

    /// All descriptors in alias order (inherited first).
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.values()
    }

    #[must_use]
    pub const fn aliases(&self) -> &IndexMap<String, String> {
        &self.aliases
    }

    #[must_use]
    pub fn alias_for(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    #[must_use]
    pub const fn defaults(&self) -> &IndexMap<String, Value> {
        &self.defaults
    }

    /// True if `self` is `other` or derives from it.
    #[must_use]
    pub fn is_a(&self, other: &Arc<Self>) -> bool {
        std::ptr::eq(self, Arc::as_ptr(other)) || self.bases.iter().any(|base| base.is_a(other))
    }
}

/// Declares a schema: bases first, then own fields in declaration order.
#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    bases: Vec<Arc<Schema>>,
    fields: Vec<FieldDescriptor>,
}

impl SchemaBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bases: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Inherits every field of `base`. Bases merge in the order given.
    #[must_use]
    pub fn extends(mut self, base: Arc<Schema>) -> Self {
        self.bases.push(base);
        self
    }

    #[must_use]
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Finalizes the schema without touching the process-wide registry.
    #[must_use]
    pub fn finish(self) -> Schema {
        let mut fields = IndexMap::new();
        let mut aliases = IndexMap::new();

        for base in &self.bases {
            fields.extend(base.fields.iter().map(|(k, v)| (k.clone(), v.clone())));
            aliases.extend(base.aliases.iter().map(|(k, v)| (k.clone(), v.clone())));
        }

        // Same alias declared twice: the later declaration wins, and a
        // subclass field replaces the inherited descriptor outright.
        for field in self.fields {
            aliases.insert(field.name().to_owned(), field.alias().to_owned());
            fields.insert(field.alias().to_owned(), field);
        }

        let defaults = fields
            .iter()
            .filter_map(|(alias, field)| {
                field
                    .default_value()
                    .map(|value| (alias.clone(), value.clone()))
            })
            .collect();

        debug!(
            type_name = %self.name,
            fields = fields.len(),
            bases = self.bases.len(),
            "Schema finalized"
        );

        Schema {
            name: self.name,
            bases: self.bases,
            fields,
            aliases,
            defaults,
        }
    }

    /// Finalizes the schema and records it in the type registry.
    #[must_use]
    pub fn build(self) -> Arc<Schema> {
        let schema = Arc::new(self.finish());
        registry::register(Arc::clone(&schema));
        schema
    }
}
