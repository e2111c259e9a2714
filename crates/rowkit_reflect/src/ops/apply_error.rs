use thiserror::Error;

/// A value could not be stored into a scalar.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ApplyError {
    #[error("cannot assign a {received} value to `{ty}`")]
    MismatchedValue {
        ty: &'static str,
        received: &'static str,
    },
    #[error("value {value} is out of range for `{ty}`")]
    OutOfRange { ty: &'static str, value: String },
}

impl ApplyError {
    pub(crate) fn mismatched<T: ?Sized>(received: &'static str) -> Self {
        Self::MismatchedValue {
            ty: core::any::type_name::<T>(),
            received,
        }
    }

    pub(crate) fn out_of_range<T: ?Sized>(value: impl core::fmt::Display) -> Self {
        Self::OutOfRange {
            ty: core::any::type_name::<T>(),
            value: value.to_string(),
        }
    }
}
