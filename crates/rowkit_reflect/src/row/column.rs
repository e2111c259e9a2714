use std::sync::OnceLock;

use serde_json::Value;

use crate::Reflect;
use crate::codec::routines::install_common;
use crate::codec::{CodecError, CodecRegistry, Format, ValueReader, ValueWriter};
use crate::info::{ReflectKind, TraitDeserialize};
use crate::jsonb;
use crate::row::SqlValue;

/// The relational column [`Format`], over [`SqlValue`].
///
/// Scalars map to the matching [`SqlValue`] and `Vec<u8>` to
/// [`SqlValue::Bytes`]. Structures, lists and maps are stored as JSON text,
/// encoded with the registry's [`documents`](CodecRegistry::documents).
#[derive(Debug, Clone, Copy, Default)]
pub struct Column;

#[cfg(feature = "auto_register")]
inventory::collect!(crate::codec::AutoRegister<Column>);

impl Format for Column {
    type Writer = ColumnWriter;
    type Reader = ColumnReader;

    fn install_defaults(registry: &mut CodecRegistry<Self>) {
        install_common(registry);
        for kind in [ReflectKind::Struct, ReflectKind::List, ReflectKind::Map] {
            registry.set_kind_encoder(kind, encode_document);
            registry.set_kind_decoder(kind, decode_document);
        }
    }

    fn registry() -> &'static CodecRegistry<Self> {
        static REGISTRY: OnceLock<CodecRegistry<Column>> = OnceLock::new();
        REGISTRY.get_or_init(|| {
            #[cfg_attr(not(feature = "auto_register"), expect(unused_mut, reason = "no installers"))]
            let mut registry = CodecRegistry::new();
            #[cfg(feature = "auto_register")]
            for entry in inventory::iter::<crate::codec::AutoRegister<Column>> {
                entry.apply(&mut registry);
            }
            log::debug!("built the global column registry: {registry:?}");
            registry
        })
    }
}

fn encode_document(
    registry: &CodecRegistry<Column>,
    writer: &mut ColumnWriter,
    value: &dyn Reflect,
) -> Result<(), CodecError> {
    writer.write_str(&jsonb::to_string_with(registry.documents(), value)?);
    Ok(())
}

fn decode_document(
    registry: &CodecRegistry<Column>,
    reader: &mut ColumnReader,
    target: &mut dyn Reflect,
) -> Result<(), CodecError> {
    let document = match reader.take() {
        SqlValue::Null => Value::Null,
        SqlValue::Text(text) => serde_json::from_str(&text)?,
        SqlValue::Bytes(bytes) => serde_json::from_slice(&bytes)?,
        other => return Err(CodecError::unexpected("json text", other.kind_name())),
    };
    jsonb::from_value_with(registry.documents(), document, target)
}

// -----------------------------------------------------------------------------
// ColumnWriter

/// Produces one [`SqlValue`].
#[derive(Debug, Default)]
pub struct ColumnWriter {
    value: SqlValue,
}

impl ColumnWriter {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn into_value(self) -> SqlValue {
        self.value
    }
}

impl ValueWriter for ColumnWriter {
    fn write_null(&mut self) {
        self.value = SqlValue::Null;
    }

    fn write_bool(&mut self, value: bool) {
        self.value = SqlValue::Bool(value);
    }

    fn write_i64(&mut self, value: i64) {
        self.value = SqlValue::Int(value);
    }

    fn write_u64(&mut self, value: u64) {
        self.value = SqlValue::UInt(value);
    }

    fn write_f64(&mut self, value: f64) -> Result<(), CodecError> {
        self.value = SqlValue::Float(value);
        Ok(())
    }

    fn write_str(&mut self, value: &str) {
        self.value = SqlValue::Text(value.to_owned());
    }

    fn write_bytes(&mut self, value: &[u8]) {
        self.value = SqlValue::Bytes(value.to_vec());
    }

    /// Serialized scalars keep their type, anything else is stored as JSON
    /// text.
    fn write_serialize(&mut self, value: &dyn erased_serde::Serialize) -> Result<(), CodecError> {
        self.value = match serde_json::to_value(value)? {
            Value::Null => SqlValue::Null,
            Value::Bool(v) => SqlValue::Bool(v),
            Value::Number(n) => match (n.as_i64(), n.as_u64()) {
                (Some(v), _) => SqlValue::Int(v),
                (None, Some(v)) => SqlValue::UInt(v),
                _ => SqlValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(v) => SqlValue::Text(v),
            document => SqlValue::Text(document.to_string()),
        };
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// ColumnReader

/// Reads one [`SqlValue`].
///
/// Conversions are lenient, the way drivers report values: integers are
/// accepted for booleans, and numeric text for numbers.
#[derive(Debug, Default)]
pub struct ColumnReader {
    value: SqlValue,
}

impl ColumnReader {
    #[inline]
    pub fn new(value: SqlValue) -> Self {
        Self { value }
    }

    #[inline]
    pub fn value(&self) -> &SqlValue {
        &self.value
    }

    /// Takes the value, leaving [`SqlValue::Null`] behind.
    #[inline]
    pub fn take(&mut self) -> SqlValue {
        core::mem::take(&mut self.value)
    }

    fn mismatch(&self, expected: &'static str) -> CodecError {
        CodecError::unexpected(expected, self.value.kind_name())
    }

    fn parse_text<T: core::str::FromStr>(&self, expected: &'static str) -> Result<T, CodecError> {
        match &self.value {
            SqlValue::Text(text) => text.trim().parse().map_err(|_| self.mismatch(expected)),
            _ => Err(self.mismatch(expected)),
        }
    }
}

impl ValueReader for ColumnReader {
    #[inline]
    fn is_null(&self) -> bool {
        self.value.is_null()
    }

    fn read_bool(&mut self) -> Result<bool, CodecError> {
        match self.value {
            SqlValue::Bool(v) => Ok(v),
            SqlValue::Int(v) => Ok(v != 0),
            SqlValue::UInt(v) => Ok(v != 0),
            _ => self.parse_text("bool"),
        }
    }

    fn read_i64(&mut self) -> Result<i64, CodecError> {
        match self.value {
            SqlValue::Int(v) => Ok(v),
            SqlValue::UInt(v) => i64::try_from(v).map_err(|_| self.mismatch("int")),
            SqlValue::Bool(v) => Ok(i64::from(v)),
            _ => self.parse_text("int"),
        }
    }

    fn read_u64(&mut self) -> Result<u64, CodecError> {
        match self.value {
            SqlValue::UInt(v) => Ok(v),
            SqlValue::Int(v) => u64::try_from(v).map_err(|_| self.mismatch("uint")),
            SqlValue::Bool(v) => Ok(u64::from(v)),
            _ => self.parse_text("uint"),
        }
    }

    fn read_f64(&mut self) -> Result<f64, CodecError> {
        match self.value {
            SqlValue::Float(v) => Ok(v),
            SqlValue::Int(v) => Ok(v as f64),
            SqlValue::UInt(v) => Ok(v as f64),
            _ => self.parse_text("float"),
        }
    }

    fn read_string(&mut self) -> Result<String, CodecError> {
        match self.take() {
            SqlValue::Text(v) => Ok(v),
            SqlValue::Bytes(v) => String::from_utf8(v).map_err(CodecError::custom),
            other => Err(CodecError::unexpected("text", other.kind_name())),
        }
    }

    fn read_bytes(&mut self) -> Result<Vec<u8>, CodecError> {
        match self.take() {
            SqlValue::Bytes(v) => Ok(v),
            SqlValue::Text(v) => Ok(v.into_bytes()),
            other => Err(CodecError::unexpected("bytes", other.kind_name())),
        }
    }

    fn read_deserialize(
        &mut self,
        capability: &TraitDeserialize,
        target: &mut dyn Reflect,
    ) -> Result<(), CodecError> {
        let value = match self.take() {
            SqlValue::Null => Value::Null,
            SqlValue::Bool(v) => Value::Bool(v),
            SqlValue::Int(v) => Value::from(v),
            SqlValue::UInt(v) => Value::from(v),
            SqlValue::Float(v) => Value::from(v),
            SqlValue::Text(v) if is_document(&v) => serde_json::from_str(&v)?,
            SqlValue::Text(v) => Value::String(v),
            SqlValue::Bytes(v) => serde_json::from_slice(&v)?,
        };
        let mut erased = <dyn erased_serde::Deserializer>::erase(value);
        capability.deserialize_into(&mut erased, target)?;
        Ok(())
    }
}

fn is_document(text: &str) -> bool {
    let text = text.trim_start();
    text.starts_with('{') || text.starts_with('[')
}
