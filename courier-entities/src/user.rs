use std::sync::{Arc, LazyLock};

use courier_model::{FieldDescriptor, ObjectType, Schema, StructuredObject, Value};

static SCHEMA: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Schema::builder("User")
        .field(FieldDescriptor::new("id"))
        .field(FieldDescriptor::new("is_bot"))
        .field(FieldDescriptor::new("first_name"))
        .field(FieldDescriptor::new("last_name"))
        .field(FieldDescriptor::new("username"))
        .field(FieldDescriptor::new("language_code"))
        .build()
});

/// A user or bot account.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct User(StructuredObject);

impl User {
    #[must_use]
    pub fn id(&self) -> Option<i64> {
        self.0.value_of("id").and_then(Value::as_i64)
    }

    #[must_use]
    pub fn is_bot(&self) -> bool {
        self.0
            .value_of("is_bot")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    #[must_use]
    pub fn first_name(&self) -> Option<&str> {
        self.0.value_of("first_name").and_then(Value::as_str)
    }

    #[must_use]
    pub fn last_name(&self) -> Option<&str> {
        self.0.value_of("last_name").and_then(Value::as_str)
    }

    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.0.value_of("username").and_then(Value::as_str)
    }

    #[must_use]
    pub fn language_code(&self) -> Option<&str> {
        self.0.value_of("language_code").and_then(Value::as_str)
    }

    /// First and last name joined by a space.
    #[must_use]
    pub fn full_name(&self) -> String {
        match (self.first_name(), self.last_name()) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(name), None) | (None, Some(name)) => name.to_owned(),
            (None, None) => String::new(),
        }
    }

    /// Deep link that opens this user's profile.
    #[must_use]
    pub fn url(&self) -> Option<String> {
        self.id().map(|id| format!("tg://user?id={id}"))
    }
}

impl ObjectType for User {
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
