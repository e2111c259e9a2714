use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

use crate::Reflect;
use crate::codec::{CodecError, ValueReader};
use crate::info::TraitDeserialize;

/// Reads one [`Value`].
#[derive(Debug, Default)]
pub struct Reader {
    value: Value,
}

/// Names the JSON type of `value`, for error messages.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl Reader {
    #[inline]
    pub fn new(value: Value) -> Self {
        Self { value }
    }

    /// Parses JSON text.
    #[allow(clippy::should_implement_trait, reason = "returns a codec error")]
    pub fn from_str(input: &str) -> Result<Self, CodecError> {
        Ok(Self::new(serde_json::from_str(input)?))
    }

    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Takes the value, leaving `null` behind.
    #[inline]
    pub fn take(&mut self) -> Value {
        self.value.take()
    }

    fn mismatch(&self, expected: &'static str) -> CodecError {
        CodecError::unexpected(expected, json_kind(&self.value))
    }
}

impl ValueReader for Reader {
    #[inline]
    fn is_null(&self) -> bool {
        self.value.is_null()
    }

    fn read_bool(&mut self) -> Result<bool, CodecError> {
        self.value.as_bool().ok_or_else(|| self.mismatch("boolean"))
    }

    fn read_i64(&mut self) -> Result<i64, CodecError> {
        self.value.as_i64().ok_or_else(|| self.mismatch("signed integer"))
    }

    fn read_u64(&mut self) -> Result<u64, CodecError> {
        self.value.as_u64().ok_or_else(|| self.mismatch("unsigned integer"))
    }

    fn read_f64(&mut self) -> Result<f64, CodecError> {
        self.value.as_f64().ok_or_else(|| self.mismatch("number"))
    }

    fn read_string(&mut self) -> Result<String, CodecError> {
        match self.take() {
            Value::String(value) => Ok(value),
            other => Err(CodecError::unexpected("string", json_kind(&other))),
        }
    }

    fn read_bytes(&mut self) -> Result<Vec<u8>, CodecError> {
        let encoded = self.read_string()?;
        Ok(STANDARD.decode(encoded)?)
    }

    fn read_deserialize(
        &mut self,
        capability: &TraitDeserialize,
        target: &mut dyn Reflect,
    ) -> Result<(), CodecError> {
        let mut erased = <dyn erased_serde::Deserializer>::erase(self.take());
        capability.deserialize_into(&mut erased, target)?;
        Ok(())
    }
}
