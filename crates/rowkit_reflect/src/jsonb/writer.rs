use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Number, Value};

use crate::codec::{CodecError, ValueWriter};

/// Builds one [`Value`].
#[derive(Debug, Default)]
pub struct Writer {
    value: Value,
}

impl Writer {
    #[inline]
    pub fn new() -> Self {
        Self { value: Value::Null }
    }

    /// Replaces the written value, used for arrays and objects.
    #[inline]
    pub fn write_value(&mut self, value: Value) {
        self.value = value;
    }

    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    #[inline]
    pub fn into_value(self) -> Value {
        self.value
    }
}

impl ValueWriter for Writer {
    fn write_null(&mut self) {
        self.value = Value::Null;
    }

    fn write_bool(&mut self, value: bool) {
        self.value = Value::Bool(value);
    }

    fn write_i64(&mut self, value: i64) {
        self.value = Value::from(value);
    }

    fn write_u64(&mut self, value: u64) {
        self.value = Value::from(value);
    }

    fn write_f64(&mut self, value: f64) -> Result<(), CodecError> {
        let number = Number::from_f64(value).ok_or(CodecError::NonFiniteFloat(value))?;
        self.value = Value::Number(number);
        Ok(())
    }

    fn write_str(&mut self, value: &str) {
        self.value = Value::String(value.to_owned());
    }

    fn write_bytes(&mut self, value: &[u8]) {
        self.value = Value::String(STANDARD.encode(value));
    }

    fn write_serialize(&mut self, value: &dyn erased_serde::Serialize) -> Result<(), CodecError> {
        self.value = serde_json::to_value(value)?;
        Ok(())
    }
}
