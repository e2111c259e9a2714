use crate::codec::{CodecError, CodecRegistry};
use crate::info::TraitDeserialize;
use crate::Reflect;

/// Writes one value of a wire format, token by token.
pub trait ValueWriter {
    fn write_null(&mut self);

    fn write_bool(&mut self, value: bool);

    fn write_i64(&mut self, value: i64);

    fn write_u64(&mut self, value: u64);

    fn write_f64(&mut self, value: f64) -> Result<(), CodecError>;

    fn write_str(&mut self, value: &str);

    fn write_bytes(&mut self, value: &[u8]);

    /// Writes a value through its `serde::Serialize` impl.
    fn write_serialize(&mut self, value: &dyn erased_serde::Serialize) -> Result<(), CodecError>;
}

/// Reads one value of a wire format.
///
/// Each `read_*` consumes the value; calling a second one is unspecified.
pub trait ValueReader {
    /// Returns `true` if the incoming value is the null token.
    fn is_null(&self) -> bool;

    fn read_bool(&mut self) -> Result<bool, CodecError>;

    fn read_i64(&mut self) -> Result<i64, CodecError>;

    fn read_u64(&mut self) -> Result<u64, CodecError>;

    fn read_f64(&mut self) -> Result<f64, CodecError>;

    fn read_string(&mut self) -> Result<String, CodecError>;

    fn read_bytes(&mut self) -> Result<Vec<u8>, CodecError>;

    /// Deserializes the incoming value into `target` through its
    /// `serde::Deserialize` capability.
    fn read_deserialize(
        &mut self,
        capability: &TraitDeserialize,
        target: &mut dyn Reflect,
    ) -> Result<(), CodecError>;
}

/// A wire format: its writer and reader, and its default codecs.
pub trait Format: Sized + Send + Sync + 'static {
    type Writer: ValueWriter;
    type Reader: ValueReader;

    /// Registers the built-in codecs of this format.
    fn install_defaults(registry: &mut CodecRegistry<Self>);

    /// The process wide registry of this format.
    ///
    /// Built on first use from the defaults and the auto registered codecs,
    /// and never modified afterwards.
    fn registry() -> &'static CodecRegistry<Self>;
}
