use crate::Reflect;
use crate::ops::ApplyError;

/// A borrowed primitive value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarRef<'a> {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(&'a str),
}

/// An owned primitive value, as produced by a decoder.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    String(String),
}

impl ScalarValue {
    /// A short name of the variant, used in error messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Int(_) => "signed integer",
            Self::Uint(_) => "unsigned integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
        }
    }
}

impl ScalarRef<'_> {
    pub fn to_owned_value(self) -> ScalarValue {
        match self {
            Self::Bool(v) => ScalarValue::Bool(v),
            Self::Int(v) => ScalarValue::Int(v),
            Self::Uint(v) => ScalarValue::Uint(v),
            Self::Float(v) => ScalarValue::Float(v),
            Self::Str(v) => ScalarValue::String(v.to_owned()),
        }
    }
}

/// A primitive value: booleans, numbers and strings.
pub trait Scalar: Reflect {
    fn scalar(&self) -> ScalarRef<'_>;

    /// Stores `value`, converting between numeric variants when it fits.
    fn set_scalar(&mut self, value: ScalarValue) -> Result<(), ApplyError>;

    /// Resets to the zero value.
    fn reset(&mut self);
}
