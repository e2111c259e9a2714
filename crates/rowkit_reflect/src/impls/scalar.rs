use core::any::Any;

use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{ReflectKind, ScalarInfo, TypeInfo, Typed};
use crate::ops::{ApplyError, ReflectMut, ReflectRef, Scalar, ScalarRef, ScalarValue};

macro_rules! impl_scalar_reflect {
    ($ty:ty, $kind:ident) => {
        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| TypeInfo::Scalar(ScalarInfo::new::<Self>(ReflectKind::$kind)))
            }
        }

        impl Reflect for $ty {
            #[inline]
            fn reflect_kind(&self) -> ReflectKind {
                ReflectKind::$kind
            }

            #[inline]
            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::Scalar(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> ReflectMut<'_> {
                ReflectMut::Scalar(self)
            }

            #[inline]
            fn as_any(&self) -> &dyn Any {
                self
            }

            #[inline]
            fn as_any_mut(&mut self) -> &mut dyn Any {
                self
            }
        }
    };
}

macro_rules! impl_int {
    ($($ty:ty),*) => {$(
        impl_scalar_reflect!($ty, Int);

        impl Scalar for $ty {
            #[inline]
            fn scalar(&self) -> ScalarRef<'_> {
                ScalarRef::Int(i64::from(*self))
            }

            fn set_scalar(&mut self, value: ScalarValue) -> Result<(), ApplyError> {
                *self = match value {
                    ScalarValue::Int(v) => <$ty>::try_from(v).map_err(|_| ApplyError::out_of_range::<$ty>(v))?,
                    ScalarValue::Uint(v) => <$ty>::try_from(v).map_err(|_| ApplyError::out_of_range::<$ty>(v))?,
                    other => return Err(ApplyError::mismatched::<$ty>(other.kind_name())),
                };
                Ok(())
            }

            #[inline]
            fn reset(&mut self) {
                *self = 0;
            }
        }
    )*};
}

macro_rules! impl_uint {
    ($($ty:ty),*) => {$(
        impl_scalar_reflect!($ty, Uint);

        impl Scalar for $ty {
            #[inline]
            fn scalar(&self) -> ScalarRef<'_> {
                ScalarRef::Uint(u64::from(*self))
            }

            fn set_scalar(&mut self, value: ScalarValue) -> Result<(), ApplyError> {
                *self = match value {
                    ScalarValue::Int(v) => <$ty>::try_from(v).map_err(|_| ApplyError::out_of_range::<$ty>(v))?,
                    ScalarValue::Uint(v) => <$ty>::try_from(v).map_err(|_| ApplyError::out_of_range::<$ty>(v))?,
                    other => return Err(ApplyError::mismatched::<$ty>(other.kind_name())),
                };
                Ok(())
            }

            #[inline]
            fn reset(&mut self) {
                *self = 0;
            }
        }
    )*};
}

macro_rules! impl_float {
    ($($ty:ty),*) => {$(
        impl_scalar_reflect!($ty, Float);

        impl Scalar for $ty {
            #[inline]
            fn scalar(&self) -> ScalarRef<'_> {
                ScalarRef::Float(f64::from(*self))
            }

            #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, reason = "lossy like `as`")]
            fn set_scalar(&mut self, value: ScalarValue) -> Result<(), ApplyError> {
                *self = match value {
                    ScalarValue::Float(v) => v as $ty,
                    ScalarValue::Int(v) => v as $ty,
                    ScalarValue::Uint(v) => v as $ty,
                    other => return Err(ApplyError::mismatched::<$ty>(other.kind_name())),
                };
                Ok(())
            }

            #[inline]
            fn reset(&mut self) {
                *self = 0.0;
            }
        }
    )*};
}

impl_int!(i8, i16, i32, i64);
impl_uint!(u8, u16, u32, u64);
impl_float!(f32, f64);

// `isize` and `usize` have no lossless `From` into 64-bit integers.
impl_scalar_reflect!(isize, Int);
impl_scalar_reflect!(usize, Uint);

impl Scalar for isize {
    #[inline]
    fn scalar(&self) -> ScalarRef<'_> {
        ScalarRef::Int(*self as i64)
    }

    fn set_scalar(&mut self, value: ScalarValue) -> Result<(), ApplyError> {
        *self = match value {
            ScalarValue::Int(v) => isize::try_from(v).map_err(|_| ApplyError::out_of_range::<isize>(v))?,
            ScalarValue::Uint(v) => isize::try_from(v).map_err(|_| ApplyError::out_of_range::<isize>(v))?,
            other => return Err(ApplyError::mismatched::<isize>(other.kind_name())),
        };
        Ok(())
    }

    #[inline]
    fn reset(&mut self) {
        *self = 0;
    }
}

impl Scalar for usize {
    #[inline]
    fn scalar(&self) -> ScalarRef<'_> {
        ScalarRef::Uint(*self as u64)
    }

    fn set_scalar(&mut self, value: ScalarValue) -> Result<(), ApplyError> {
        *self = match value {
            ScalarValue::Int(v) => usize::try_from(v).map_err(|_| ApplyError::out_of_range::<usize>(v))?,
            ScalarValue::Uint(v) => usize::try_from(v).map_err(|_| ApplyError::out_of_range::<usize>(v))?,
            other => return Err(ApplyError::mismatched::<usize>(other.kind_name())),
        };
        Ok(())
    }

    #[inline]
    fn reset(&mut self) {
        *self = 0;
    }
}

impl_scalar_reflect!(bool, Bool);

impl Scalar for bool {
    #[inline]
    fn scalar(&self) -> ScalarRef<'_> {
        ScalarRef::Bool(*self)
    }

    fn set_scalar(&mut self, value: ScalarValue) -> Result<(), ApplyError> {
        *self = match value {
            ScalarValue::Bool(v) => v,
            // Drivers without a boolean type report 0 / 1.
            ScalarValue::Int(v) => v != 0,
            ScalarValue::Uint(v) => v != 0,
            other => return Err(ApplyError::mismatched::<bool>(other.kind_name())),
        };
        Ok(())
    }

    #[inline]
    fn reset(&mut self) {
        *self = false;
    }
}

impl_scalar_reflect!(String, String);

impl Scalar for String {
    #[inline]
    fn scalar(&self) -> ScalarRef<'_> {
        ScalarRef::Str(self.as_str())
    }

    fn set_scalar(&mut self, value: ScalarValue) -> Result<(), ApplyError> {
        match value {
            ScalarValue::String(v) => {
                *self = v;
                Ok(())
            }
            other => Err(ApplyError::mismatched::<String>(other.kind_name())),
        }
    }

    #[inline]
    fn reset(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use crate::info::{ReflectKind, Typed};
    use crate::ops::{ApplyError, Scalar, ScalarRef, ScalarValue};

    #[test]
    fn integer_conversions() {
        let mut v = 0_u8;
        v.set_scalar(ScalarValue::Int(200)).unwrap();
        assert_eq!(v, 200);
        assert!(matches!(
            v.set_scalar(ScalarValue::Int(-1)),
            Err(ApplyError::OutOfRange { .. })
        ));
        assert_eq!(v, 200);

        let mut w = 0_i16;
        w.set_scalar(ScalarValue::Uint(300)).unwrap();
        assert_eq!(w.scalar(), ScalarRef::Int(300));
        assert!(matches!(
            w.set_scalar(ScalarValue::String("1".into())),
            Err(ApplyError::MismatchedValue { .. })
        ));
    }

    #[test]
    fn floats_and_bools() {
        let mut f = 0.0_f32;
        f.set_scalar(ScalarValue::Int(3)).unwrap();
        assert_eq!(f, 3.0);

        let mut b = false;
        b.set_scalar(ScalarValue::Int(1)).unwrap();
        assert!(b);
        b.reset();
        assert!(!b);
    }

    #[test]
    fn scalar_kinds() {
        assert_eq!(i32::type_info().kind(), ReflectKind::Int);
        assert_eq!(usize::type_info().kind(), ReflectKind::Uint);
        assert_eq!(f64::type_info().kind(), ReflectKind::Float);
        assert_eq!(String::type_info().kind(), ReflectKind::String);
        assert!(bool::type_info().type_is::<bool>());
    }
}
