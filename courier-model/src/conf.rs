//! Per-object configuration and the upward parent link.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value as JsonValue};

/// Non-owning link from a nested object to the object that built it.
///
/// Carries identity only: the parent's type name, the field the child sits
/// under, and the parent's own link. Children never keep their parent alive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentRef {
    type_name: String,
    field: Option<String>,
    up: Option<Arc<ParentRef>>,
}

impl ParentRef {
    pub fn new(type_name: impl Into<String>, up: Option<Self>) -> Self {
        Self {
            type_name: type_name.into(),
            field: None,
            up: up.map(Arc::new),
        }
    }

    /// Records the field alias the child is stored under.
    #[must_use]
    pub fn under(mut self, alias: &str) -> Self {
        self.field = Some(alias.to_owned());
        self
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// The parent's own parent, if it was nested too.
    #[must_use]
    pub fn parent(&self) -> Option<&Self> {
        self.up.as_deref()
    }

    /// Walks from this link up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = &Self> {
        std::iter::successors(Some(self), |link| link.parent())
    }
}

impl fmt::Display for ParentRef {
    /// Renders root first, e.g. `Message.entities > MessageEntity.user`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut chain: Vec<&Self> = self.ancestors().collect();
        chain.reverse();
        for (i, link) in chain.iter().enumerate() {
            if i > 0 {
                f.write_str(" > ")?;
            }
            f.write_str(&link.type_name)?;
            if let Some(field) = &link.field {
                write!(f, ".{field}")?;
            }
        }
        Ok(())
    }
}

/// Opaque key-value context attached to a structured object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conf {
    pub parent: Option<ParentRef>,
    pub entries: Map<String, JsonValue>,
}

impl Conf {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_parent(parent: ParentRef) -> Self {
        Self {
            parent: Some(parent),
            entries: Map::new(),
        }
    }

    /// Adds an opaque context entry.
    #[must_use]
    pub fn entry(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.entries.get(key)
    }

    #[must_use]
    pub const fn parent(&self) -> Option<&ParentRef> {
        self.parent.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_root_first() {
        let root = ParentRef::new("Message", None).under("entities");
        let child = ParentRef::new("MessageEntity", Some(root)).under("user");
        assert_eq!(child.to_string(), "Message.entities > MessageEntity.user");
        assert_eq!(child.parent().map(ParentRef::type_name), Some("Message"));
    }

    #[test]
    fn conf_entries() {
        let conf = Conf::new().entry("k", 1);
        assert_eq!(conf.get("k"), Some(&JsonValue::from(1)));
        assert!(conf.parent().is_none());
    }
}
