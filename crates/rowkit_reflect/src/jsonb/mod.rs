//! The JSON format.
//!
//! Structures become objects keyed by the flattened names of their
//! properties, lists become arrays, string keyed maps become objects,
//! `Vec<u8>` becomes a base64 string and `None` becomes `null`.
//!
//! ```
//! use rowkit_reflect::derive::Reflect;
//! use rowkit_reflect::jsonb;
//!
//! #[derive(Reflect, Default, Debug, PartialEq)]
//! struct Tagged {
//!     pub labels: Vec<String>,
//!     pub parent: Option<u32>,
//! }
//!
//! let value = Tagged { labels: vec!["a".into()], parent: None };
//! let json = jsonb::to_value(&value).unwrap();
//! assert_eq!(json, serde_json::json!({ "labels": ["a"], "parent": null }));
//!
//! let mut back = Tagged::default();
//! jsonb::from_value(json, &mut back).unwrap();
//! assert_eq!(back, value);
//! ```

// -----------------------------------------------------------------------------
// Modules

mod codecs;
mod reader;
mod writer;

// -----------------------------------------------------------------------------
// Exports

pub use reader::Reader;
pub use writer::Writer;

use std::sync::{Arc, OnceLock};

use serde_json::Value;

use crate::Reflect;
use crate::codec::{CodecError, CodecRegistry, Format};
use crate::model::Mapper;

// -----------------------------------------------------------------------------
// Format

/// The JSON [`Format`], over [`serde_json::Value`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Jsonb;

#[cfg(feature = "auto_register")]
inventory::collect!(crate::codec::AutoRegister<Jsonb>);

impl Format for Jsonb {
    type Writer = Writer;
    type Reader = Reader;

    fn install_defaults(registry: &mut CodecRegistry<Self>) {
        codecs::install(registry);
    }

    fn registry() -> &'static CodecRegistry<Self> {
        static REGISTRY: OnceLock<CodecRegistry<Jsonb>> = OnceLock::new();
        REGISTRY.get_or_init(|| {
            let registry = Self::registry_with_mapper(Mapper::global().clone());
            log::debug!("built the global json registry: {registry:?}");
            registry
        })
    }
}

impl Jsonb {
    /// A registry with the default and auto-registered codecs that lays out
    /// structures with `mapper`.
    pub fn registry_with_mapper(mapper: Arc<Mapper>) -> CodecRegistry<Jsonb> {
        #[cfg_attr(not(feature = "auto_register"), expect(unused_mut, reason = "no installers"))]
        let mut registry = CodecRegistry::new().with_mapper(mapper);
        #[cfg(feature = "auto_register")]
        for entry in inventory::iter::<crate::codec::AutoRegister<Jsonb>> {
            entry.apply(&mut registry);
        }
        registry
    }
}

// -----------------------------------------------------------------------------
// Helpers

/// Encodes `value` with the global registry.
pub fn to_value(value: &dyn Reflect) -> Result<Value, CodecError> {
    to_value_with(Jsonb::registry(), value)
}

pub fn to_value_with(registry: &CodecRegistry<Jsonb>, value: &dyn Reflect) -> Result<Value, CodecError> {
    let mut writer = Writer::new();
    registry.encode(&mut writer, Some(value))?;
    Ok(writer.into_value())
}

/// Encodes `value` to JSON text with the global registry.
pub fn to_string(value: &dyn Reflect) -> Result<String, CodecError> {
    to_string_with(Jsonb::registry(), value)
}

pub fn to_string_with(registry: &CodecRegistry<Jsonb>, value: &dyn Reflect) -> Result<String, CodecError> {
    Ok(serde_json::to_string(&to_value_with(registry, value)?)?)
}

/// Decodes `value` into `target` with the global registry.
pub fn from_value(value: Value, target: &mut dyn Reflect) -> Result<(), CodecError> {
    from_value_with(Jsonb::registry(), value, target)
}

pub fn from_value_with(
    registry: &CodecRegistry<Jsonb>,
    value: Value,
    target: &mut dyn Reflect,
) -> Result<(), CodecError> {
    registry.decode(&mut Reader::new(value), target)
}

/// Decodes JSON text into `target` with the global registry.
pub fn from_str(input: &str, target: &mut dyn Reflect) -> Result<(), CodecError> {
    from_str_with(Jsonb::registry(), input, target)
}

pub fn from_str_with(
    registry: &CodecRegistry<Jsonb>,
    input: &str,
    target: &mut dyn Reflect,
) -> Result<(), CodecError> {
    registry.decode(&mut Reader::from_str(input)?, target)
}
