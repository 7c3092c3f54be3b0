//! Concrete messaging API types built on `courier-model`.
//!
//! - [`User`] and [`MessageEntity`] — schema-backed entity wrappers
//! - [`MessageEntityType`] — the closed set of entity tags
//! - [`Bot`] — client handle, available as an ambient current instance

mod bot;
mod entity_type;
mod error;
mod message_entity;
mod user;

pub use bot::Bot;
pub use entity_type::MessageEntityType;
pub use error::{EntityError, EntityResult};
pub use message_entity::MessageEntity;
pub use user::User;

use courier_model::ObjectType;

/// Finalizes every entity schema so each is visible in the type registry.
pub fn register_all() {
    let _ = User::schema();
    let _ = MessageEntity::schema();
}
