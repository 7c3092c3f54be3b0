//! Schema-driven object mapping for messaging API payloads.
//!
//! Entity types returned by the remote API are declared as tables of fields
//! rather than hand-written structs:
//! - [`FieldDescriptor`] — one aliased attribute with an optional default and
//!   nested type binding
//! - [`Schema`] / [`SchemaBuilder`] — a type's merged field table, built once
//!   and recorded in the process-wide [`registry`]
//! - [`StructuredObject`] — a runtime instance holding values keyed by alias,
//!   with export, item access and order-independent structural equality
//! - [`context`] — explicit-or-ambient lookup of collaborator handles
//!
//! Payloads come in and go out as `serde_json` values; this crate never
//! parses bytes itself.

pub mod context;
pub mod registry;

mod conf;
mod error;
mod field;
mod object;
mod schema;
mod value;

pub use conf::{Conf, ParentRef};
pub use context::{ContextInstance, CurrentSlot};
pub use error::{ModelError, ModelResult};
pub use field::{FieldDescriptor, SchemaRef};
pub use object::{ObjectType, StructuredObject};
pub use schema::{Schema, SchemaBuilder};
pub use value::{LazyText, Value, ValueMap, structural_hash};
