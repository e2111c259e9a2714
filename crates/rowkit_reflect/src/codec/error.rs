use thiserror::Error;

use crate::info::Type;
use crate::ops::ApplyError;

/// Errors raised while encoding or decoding.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CodecError {
    /// No capability, exact-type or category encoder exists for the type.
    #[error("no encoder found for `{ty}`")]
    NoEncoder { ty: Type },
    /// No capability, exact-type or category decoder exists for the type.
    #[error("no decoder found for `{ty}`")]
    NoDecoder { ty: Type },
    #[error("expected {expected}, found {found}")]
    UnexpectedValue {
        expected: &'static str,
        found: &'static str,
    },
    #[error("`{ty}` does not provide the {capability} capability")]
    MissingCapability {
        ty: Type,
        capability: &'static str,
    },
    #[error("`{ty}` is not a structure")]
    NotAStruct { ty: Type },
    #[error("{0} cannot be represented")]
    NonFiniteFloat(f64),
    #[error(transparent)]
    Apply(#[from] ApplyError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    /// Raised by user [`Marshal`](crate::codec::Marshal) and
    /// [`Unmarshal`](crate::codec::Unmarshal) impls.
    #[error("{0}")]
    Custom(String),
}

impl CodecError {
    pub fn custom(message: impl core::fmt::Display) -> Self {
        Self::Custom(message.to_string())
    }

    pub(crate) fn unexpected(expected: &'static str, found: &'static str) -> Self {
        Self::UnexpectedValue { expected, found }
    }
}

impl From<erased_serde::Error> for CodecError {
    fn from(err: erased_serde::Error) -> Self {
        Self::Custom(err.to_string())
    }
}
