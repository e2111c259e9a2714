use core::any::Any;
use core::fmt;

use crate::info::{DynamicTyped, ReflectKind};
use crate::ops::{ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// Reflect

/// A value whose shape can be inspected and modified at run time.
///
/// Implemented by `#[derive(Reflect)]` for structures, and by this crate for
/// primitives, `String`, `Vec<T>`, `Option<T>`, `BTreeMap<String, V>` and
/// `Box<T>`.
///
/// `Box<T>` is transparent: it reports the type information of `T`, and
/// downcasting a boxed value yields the `T` inside.
pub trait Reflect: DynamicTyped + Send + Sync + Any {
    fn reflect_kind(&self) -> ReflectKind;

    fn reflect_ref(&self) -> ReflectRef<'_>;

    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    /// Returns `true` for values that must be written as a null token.
    #[inline]
    fn is_null(&self) -> bool {
        false
    }

    /// The value that downcasts resolve to.
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    #[inline(always)]
    fn as_reflect(&self) -> &dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    #[inline(always)]
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect
    where
        Self: Sized,
    {
        self
    }
}

impl dyn Reflect {
    /// Returns `true` if the underlying value is a `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.as_any().is::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

impl fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reflect({})", self.reflect_type_info().type_path())
    }
}

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::ReflectKind;

    #[test]
    fn downcast_through_box() {
        let boxed: Box<i32> = Box::new(5);
        let value: &dyn Reflect = &boxed;
        assert!(value.is::<i32>());
        assert_eq!(value.downcast_ref::<i32>(), Some(&5));
        assert_eq!(value.reflect_kind(), ReflectKind::Int);
    }

    #[test]
    fn none_is_null() {
        let none: Option<String> = None;
        let some = Some(String::from("x"));
        assert!(none.as_reflect().is_null());
        assert!(!some.as_reflect().is_null());
        assert!(!0_u8.as_reflect().is_null());
    }
}
