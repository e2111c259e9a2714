use crate::Reflect;
use crate::codec::{CodecError, CodecRegistry, Format, ValueReader, ValueWriter};

/// Writes a value itself, ahead of any registered codec.
///
/// Enabled on a type with `#[reflect(marshal)]`.
///
/// ```
/// use rowkit_reflect::codec::{CodecError, Marshal, ValueWriter};
/// use rowkit_reflect::derive::Reflect;
///
/// #[derive(Reflect)]
/// #[reflect(opaque, marshal)]
/// struct Celsius(f64);
///
/// impl Marshal for Celsius {
///     fn marshal(&self, writer: &mut dyn ValueWriter) -> Result<(), CodecError> {
///         writer.write_str(&format!("{}C", self.0));
///         Ok(())
///     }
/// }
///
/// let text = rowkit_reflect::jsonb::to_string(&Celsius(21.5)).unwrap();
/// assert_eq!(text, r#""21.5C""#);
/// ```
pub trait Marshal {
    fn marshal(&self, writer: &mut dyn ValueWriter) -> Result<(), CodecError>;
}

/// Reads a value itself, ahead of any registered codec.
///
/// Enabled on a type with `#[reflect(unmarshal)]`.
pub trait Unmarshal {
    fn unmarshal(&mut self, reader: &mut dyn ValueReader) -> Result<(), CodecError>;
}

// -----------------------------------------------------------------------------
// Routines returned by lookups

pub(crate) fn encode_null<F: Format>(
    _: &CodecRegistry<F>,
    writer: &mut F::Writer,
    _: &dyn Reflect,
) -> Result<(), CodecError> {
    writer.write_null();
    Ok(())
}

pub(crate) fn encode_marshal<F: Format>(
    _: &CodecRegistry<F>,
    writer: &mut F::Writer,
    value: &dyn Reflect,
) -> Result<(), CodecError> {
    let info = value.reflect_type_info();
    let marshal = info
        .capabilities()
        .marshal()
        .and_then(|handle| handle.get(value))
        .ok_or(CodecError::MissingCapability {
            ty: *info.ty(),
            capability: "marshal",
        })?;
    marshal.marshal(writer)
}

pub(crate) fn encode_serialize<F: Format>(
    _: &CodecRegistry<F>,
    writer: &mut F::Writer,
    value: &dyn Reflect,
) -> Result<(), CodecError> {
    let info = value.reflect_type_info();
    let serialize = info
        .capabilities()
        .serialize()
        .and_then(|handle| handle.get(value))
        .ok_or(CodecError::MissingCapability {
            ty: *info.ty(),
            capability: "serialize",
        })?;
    writer.write_serialize(serialize)
}

pub(crate) fn encode_text<F: Format>(
    _: &CodecRegistry<F>,
    writer: &mut F::Writer,
    value: &dyn Reflect,
) -> Result<(), CodecError> {
    let info = value.reflect_type_info();
    let text = info
        .capabilities()
        .text()
        .and_then(|handle| handle.get(value))
        .ok_or(CodecError::MissingCapability {
            ty: *info.ty(),
            capability: "text",
        })?;
    writer.write_str(&text.to_string());
    Ok(())
}

pub(crate) fn decode_unmarshal<F: Format>(
    _: &CodecRegistry<F>,
    reader: &mut F::Reader,
    target: &mut dyn Reflect,
) -> Result<(), CodecError> {
    let info = target.reflect_type_info();
    let handle = info.capabilities().unmarshal().copied();
    let unmarshal = handle
        .and_then(|handle| handle.get(target))
        .ok_or(CodecError::MissingCapability {
            ty: *info.ty(),
            capability: "unmarshal",
        })?;
    unmarshal.unmarshal(reader)
}

pub(crate) fn decode_deserialize<F: Format>(
    _: &CodecRegistry<F>,
    reader: &mut F::Reader,
    target: &mut dyn Reflect,
) -> Result<(), CodecError> {
    let info = target.reflect_type_info();
    let handle = info
        .capabilities()
        .deserialize()
        .ok_or(CodecError::MissingCapability {
            ty: *info.ty(),
            capability: "deserialize",
        })?;
    reader.read_deserialize(handle, target)
}
