//! Dynamic access to reflected values.
//!
//! ## Menu
//!
//! - [`ReflectRef`] / [`ReflectMut`]: a value viewed through its kind trait.
//! - [`Struct`], [`List`], [`Map`], [`Optional`], [`Scalar`]: the kind traits.
//! - [`value_at_path`] / [`value_at_path_mut`]: follow a field index path.
//! - [`ApplyError`]: a scalar assignment failed.

// -----------------------------------------------------------------------------
// Modules

mod apply_error;
mod kind;
mod list_ops;
mod map_ops;
mod optional_ops;
mod path;
mod scalar_ops;
mod struct_ops;

// -----------------------------------------------------------------------------
// Exports

pub use apply_error::ApplyError;
pub use kind::{ReflectMut, ReflectRef};
pub use list_ops::List;
pub use map_ops::Map;
pub use optional_ops::Optional;
pub use path::{value_at_path, value_at_path_mut};
pub use scalar_ops::{Scalar, ScalarRef, ScalarValue};
pub use struct_ops::Struct;
