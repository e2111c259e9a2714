//! [`Reflect`](crate::Reflect) impls for primitives and std containers, and
//! the static cells used to store [`TypeInfo`](crate::info::TypeInfo).

// -----------------------------------------------------------------------------
// Modules

mod boxed;
mod cell;
mod collections;
mod option;
mod scalar;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, NonGenericTypeInfoCell};
