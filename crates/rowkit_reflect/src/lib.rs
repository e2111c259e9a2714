//! Reflection driven mapping between record structures, relational rows and
//! JSON documents.
//!
//! ## Menu
//!
//! - [`info`]: static type descriptors ([`TypeInfo`](info::TypeInfo)) and capabilities.
//! - [`ops`]: dynamic access to values by kind, and index-path traversal.
//! - [`tag`]: the field annotation mini-language.
//! - [`model`]: per-type field trees ([`StructModel`](model::StructModel)) and their cache.
//! - [`select`]: which fields take part in a write.
//! - [`codec`]: the codec registry and its lookup priority.
//! - [`jsonb`]: the JSON format.
//! - [`row`]: the relational row format.
//!
//! ## Example
//!
//! ```
//! use rowkit_reflect::derive::Reflect;
//!
//! #[derive(Reflect, Default, Debug, PartialEq)]
//! struct User {
//!     #[reflect(tag = "id")]
//!     pub id: i64,
//!     #[reflect(tag = "name")]
//!     pub name: String,
//! }
//!
//! let user = User { id: 7, name: "ann".into() };
//! let text = rowkit_reflect::jsonb::to_string(&user).unwrap();
//! assert_eq!(text, r#"{"id":7,"name":"ann"}"#);
//!
//! let mut back = User::default();
//! rowkit_reflect::jsonb::from_str(&text, &mut back).unwrap();
//! assert_eq!(back, user);
//! ```

// -----------------------------------------------------------------------------
// Extern Self

// The derive macro emits `::rowkit_reflect` paths, which must also resolve
// inside this crate.
extern crate self as rowkit_reflect;

// -----------------------------------------------------------------------------
// Modules

mod reflection;

pub mod codec;
pub mod impls;
pub mod info;
pub mod jsonb;
pub mod model;
pub mod ops;
pub mod row;
pub mod select;
pub mod tag;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use reflection::Reflect;
pub use rowkit_reflect_derive as derive;
