//! Codecs that only rely on [`ValueWriter`] and [`ValueReader`], shared by
//! every format.

use crate::Reflect;
use crate::codec::{CodecError, CodecRegistry, Format, ValueReader, ValueWriter};
use crate::info::ReflectKind;
use crate::ops::{ReflectMut, ReflectRef, ScalarRef, ScalarValue};

pub(crate) fn kind_mismatch(expected: &'static str, value: &dyn Reflect) -> CodecError {
    CodecError::unexpected(expected, value.reflect_kind().as_str())
}

/// Encodes booleans, numbers and strings.
pub fn encode_scalar<F: Format>(
    _: &CodecRegistry<F>,
    writer: &mut F::Writer,
    value: &dyn Reflect,
) -> Result<(), CodecError> {
    let ReflectRef::Scalar(scalar) = value.reflect_ref() else {
        return Err(kind_mismatch("scalar", value));
    };
    match scalar.scalar() {
        ScalarRef::Bool(v) => writer.write_bool(v),
        ScalarRef::Int(v) => writer.write_i64(v),
        ScalarRef::Uint(v) => writer.write_u64(v),
        ScalarRef::Float(v) => writer.write_f64(v)?,
        ScalarRef::Str(v) => writer.write_str(v),
    }
    Ok(())
}

/// Decodes booleans, numbers and strings. A null token resets the target.
pub fn decode_scalar<F: Format>(
    _: &CodecRegistry<F>,
    reader: &mut F::Reader,
    target: &mut dyn Reflect,
) -> Result<(), CodecError> {
    let kind = target.reflect_kind();
    let ReflectMut::Scalar(scalar) = target.reflect_mut() else {
        return Err(CodecError::unexpected("scalar", kind.as_str()));
    };
    if reader.is_null() {
        scalar.reset();
        return Ok(());
    }
    let value = match kind {
        ReflectKind::Bool => ScalarValue::Bool(reader.read_bool()?),
        ReflectKind::Int => ScalarValue::Int(reader.read_i64()?),
        ReflectKind::Uint => ScalarValue::Uint(reader.read_u64()?),
        ReflectKind::Float => ScalarValue::Float(reader.read_f64()?),
        _ => ScalarValue::String(reader.read_string()?),
    };
    scalar.set_scalar(value)?;
    Ok(())
}

/// Encodes the inner value, or the null token.
pub fn encode_optional<F: Format>(
    registry: &CodecRegistry<F>,
    writer: &mut F::Writer,
    value: &dyn Reflect,
) -> Result<(), CodecError> {
    match value.reflect_ref() {
        ReflectRef::Optional(optional) => registry.encode(writer, optional.value()),
        _ => Err(kind_mismatch("optional", value)),
    }
}

/// Clears the target on a null token, otherwise decodes into its inner value.
pub fn decode_optional<F: Format>(
    registry: &CodecRegistry<F>,
    reader: &mut F::Reader,
    target: &mut dyn Reflect,
) -> Result<(), CodecError> {
    let kind = target.reflect_kind();
    let ReflectMut::Optional(optional) = target.reflect_mut() else {
        return Err(CodecError::unexpected("optional", kind.as_str()));
    };
    if reader.is_null() {
        optional.set_none();
        return Ok(());
    }
    registry.decode(reader, optional.get_or_insert_default())
}

/// Encodes `Vec<u8>` as a binary payload.
pub fn encode_bytes<F: Format>(
    _: &CodecRegistry<F>,
    writer: &mut F::Writer,
    value: &dyn Reflect,
) -> Result<(), CodecError> {
    let bytes = value
        .downcast_ref::<Vec<u8>>()
        .ok_or_else(|| kind_mismatch("bytes", value))?;
    writer.write_bytes(bytes);
    Ok(())
}

/// Decodes a binary payload into `Vec<u8>`. A null token empties it.
pub fn decode_bytes<F: Format>(
    _: &CodecRegistry<F>,
    reader: &mut F::Reader,
    target: &mut dyn Reflect,
) -> Result<(), CodecError> {
    let kind = target.reflect_kind();
    let bytes = target
        .downcast_mut::<Vec<u8>>()
        .ok_or(CodecError::unexpected("bytes", kind.as_str()))?;
    if reader.is_null() {
        bytes.clear();
    } else {
        *bytes = reader.read_bytes()?;
    }
    Ok(())
}

/// Registers the routines of this module for the kinds they handle.
pub fn install_common<F: Format>(registry: &mut CodecRegistry<F>) {
    for kind in [
        ReflectKind::Bool,
        ReflectKind::Int,
        ReflectKind::Uint,
        ReflectKind::Float,
        ReflectKind::String,
    ] {
        registry.set_kind_encoder(kind, encode_scalar::<F>);
        registry.set_kind_decoder(kind, decode_scalar::<F>);
    }
    registry.set_kind_encoder(ReflectKind::Optional, encode_optional::<F>);
    registry.set_kind_decoder(ReflectKind::Optional, decode_optional::<F>);
    registry.set_type_encoder::<Vec<u8>>(encode_bytes::<F>);
    registry.set_type_decoder::<Vec<u8>>(decode_bytes::<F>);
}
