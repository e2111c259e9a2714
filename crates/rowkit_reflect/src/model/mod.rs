//! Field trees of structures.
//!
//! A [`StructModel`] lists every reachable field of a structure, nested and
//! embedded ones included, in a deterministic order, and indexes them by
//! flattened name and by index path. [`Mapper`] builds models and keeps one
//! per type for the rest of the process.
//!
//! ## Naming
//!
//! A field's flattened name is its parent's name, a `.`, then its own tag
//! name. An embedded structure (`#[reflect(embed)]`) without an explicit tag
//! name adds no segment: its fields are promoted into the parent.
//!
//! ```
//! use rowkit_reflect::derive::Reflect;
//! use rowkit_reflect::model::Mapper;
//!
//! #[derive(Reflect, Default)]
//! struct Audit { pub created_by: String }
//!
//! #[derive(Reflect, Default)]
//! struct Address { pub city: String }
//!
//! #[derive(Reflect, Default)]
//! struct User {
//!     pub id: i64,
//!     #[reflect(embed)]
//!     pub audit: Audit,
//!     pub address: Address,
//! }
//!
//! let model = Mapper::global().model_of::<User>().unwrap();
//! let properties: Vec<&str> = model.properties().map(|f| f.name()).collect();
//! assert_eq!(properties, ["id", "created_by", "address"]);
//! assert!(model.lookup("address.city").is_some());
//! ```

// -----------------------------------------------------------------------------
// Modules

mod builder;
mod field;
mod mapper;
mod struct_model;

// -----------------------------------------------------------------------------
// Exports

pub use field::{FieldId, StructField};
pub use mapper::{DEFAULT_TAG_KEY, Mapper};
pub use struct_model::StructModel;
