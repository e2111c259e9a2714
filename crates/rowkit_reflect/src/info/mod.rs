//! Static type descriptors.
//!
//! ## Menu
//!
//! - [`Typed`] / [`DynamicTyped`]: access a type's [`TypeInfo`].
//! - [`TypeInfo`]: one variant per [`ReflectKind`].
//! - [`NamedField`]: a declared structure field, with its raw annotations.
//! - [`Capabilities`]: serialization protocols a type was derived with.

// -----------------------------------------------------------------------------
// Modules

mod capabilities;
mod container_info;
mod field_info;
mod scalar_info;
mod struct_info;
mod type_info;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use capabilities::{Capabilities, FromType};
pub use capabilities::{TraitDeserialize, TraitMarshal, TraitSerialize, TraitText, TraitUnmarshal};
pub use container_info::{ListInfo, MapInfo, OptionalInfo};
pub use field_info::NamedField;
pub use scalar_info::{OpaqueInfo, ScalarInfo};
pub use struct_info::StructInfo;
pub use type_info::{ReflectKind, TypeInfo};
pub use typed::{DynamicTyped, Type, Typed};
