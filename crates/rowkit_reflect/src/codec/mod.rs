//! Codec dispatch.
//!
//! A [`CodecRegistry`] chooses the routine that encodes a value, or decodes
//! into a target type, for one wire [`Format`]. Encoder lookup tries, in
//! order:
//!
//! 1. the null routine, for null-like values such as `None`;
//! 2. the type's [`Marshal`] capability;
//! 3. its `serde::Serialize` capability;
//! 4. its text (`Display`) capability;
//! 5. the exact-type table;
//! 6. the category ([`ReflectKind`](crate::info::ReflectKind)) table.
//!
//! Decoder lookup tries [`Unmarshal`], `serde::Deserialize`, the exact-type
//! table, then the category table. Nothing matching is an error:
//! [`CodecError::NoEncoder`] / [`CodecError::NoDecoder`].
//!
//! ## Menu
//!
//! - [`Format`], [`ValueWriter`], [`ValueReader`]: a wire format.
//! - [`Marshal`], [`Unmarshal`]: the library specific capability.
//! - [`CodecRegistry`], [`CodecRegistryArc`]: the dispatch tables.
//! - [`routines`]: format independent codecs for scalars and optionals.
//! - [`AutoRegister`]: codecs submitted with [`auto_register_codecs!`](crate::auto_register_codecs).

// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod capability;
mod error;
mod format;
mod registry;

pub mod routines;

// -----------------------------------------------------------------------------
// Exports

pub use auto_register::AutoRegister;
pub use capability::{Marshal, Unmarshal};
pub use error::CodecError;
pub use format::{Format, ValueReader, ValueWriter};
pub use registry::{CodecRegistry, CodecRegistryArc, Decoder, Encoder};
