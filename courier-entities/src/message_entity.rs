//! Special entities inside message text: hashtags, links, mentions and so on.

use std::sync::{Arc, LazyLock};

use courier_model::{
    FieldDescriptor, ModelResult, ObjectType, Schema, StructuredObject, Value, context,
};

use crate::bot::Bot;
use crate::entity_type::MessageEntityType;
use crate::user::User;

static SCHEMA: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::builder("MessageEntity")
        .field(FieldDescriptor::new("type"))
        .field(FieldDescriptor::new("offset").with_default(0))
        .field(FieldDescriptor::new("length").with_default(0))
        .field(FieldDescriptor::new("url"))
        .field(FieldDescriptor::new("user").with_nested(<User as ObjectType>::schema))
        .build()
});

/// One entity in a text message, located by UTF-16 offset and length.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageEntity(StructuredObject);

impl MessageEntity {
    /// Raw type tag as sent by the API.
    #[must_use]
    pub fn kind(&self) -> Option<&str> {
        self.0.value_of("type").and_then(Value::as_str)
    }

    /// Parsed type tag; `None` for tags this crate does not know yet.
    #[must_use]
    pub fn entity_type(&self) -> Option<MessageEntityType> {
        self.kind().and_then(|kind| kind.parse().ok())
    }

    #[must_use]
    pub fn offset(&self) -> i64 {
        self.0.value_of("offset").and_then(Value::as_i64).unwrap_or(0)
    }

    #[must_use]
    pub fn length(&self) -> i64 {
        self.0.value_of("length").and_then(Value::as_i64).unwrap_or(0)
    }

    /// Target of a `text_link`.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.0.value_of("url").and_then(Value::as_str)
    }

    /// Mentioned user of a `text_mention`.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.0
            .value_of("user")
            .and_then(Value::as_object)
            .cloned()
            .map(User::from_object)
    }

    /// The part of `text` this entity covers.
    ///
    /// Offsets count UTF-16 code units, so characters outside the BMP take
    /// two. Out-of-range bounds are clamped to the text.
    #[must_use]
    pub fn get_text(&self, text: &str) -> String {
        let units: Vec<u16> = text.encode_utf16().collect();
        let clamp = |n: i64| usize::try_from(n).unwrap_or(0).min(units.len());
        let start = clamp(self.offset());
        let end = clamp(self.offset().saturating_add(self.length())).max(start);
        String::from_utf16_lossy(&units[start..end])
    }

    /// Client to act with: `explicit` if given, otherwise the current one.
    pub fn bot(&self, explicit: Option<Arc<Bot>>) -> ModelResult<Arc<Bot>> {
        context::resolve(explicit)
    }
}

impl ObjectType for MessageEntity {
    fn schema() -> Arc<Schema> {
        Arc::clone(&SCHEMA)
    }

    fn from_object(object: StructuredObject) -> Self {
        Self(object)
    }

    fn as_object(&self) -> &StructuredObject {
        &self.0
    }

    fn as_object_mut(&mut self) -> &mut StructuredObject {
        &mut self.0
    }
}
