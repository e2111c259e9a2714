use core::any::Any;

use crate::Reflect;
use crate::impls::GenericTypeInfoCell;
use crate::info::{OptionalInfo, ReflectKind, TypeInfo, Typed};
use crate::ops::{Optional, ReflectMut, ReflectRef};

impl<T: Reflect + Typed + Default> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Optional(OptionalInfo::new::<Self, T>()))
    }
}

impl<T: Reflect + Typed + Default> Reflect for Option<T> {
    #[inline]
    fn reflect_kind(&self) -> ReflectKind {
        ReflectKind::Optional
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Optional(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Optional(self)
    }

    #[inline]
    fn is_null(&self) -> bool {
        self.is_none()
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

impl<T: Reflect + Typed + Default> Optional for Option<T> {
    #[inline]
    fn value(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(|v| v as &dyn Reflect)
    }

    #[inline]
    fn value_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.as_mut().map(|v| v as &mut dyn Reflect)
    }

    fn get_or_insert_default(&mut self) -> &mut dyn Reflect {
        self.get_or_insert_with(T::default)
    }

    #[inline]
    fn set_none(&mut self) {
        *self = None;
    }
}

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::{ReflectKind, Typed};
    use crate::ops::ReflectMut;

    #[test]
    fn allocates_on_demand() {
        let mut value: Option<i32> = None;
        let ReflectMut::Optional(optional) = value.reflect_mut() else {
            panic!("expected an optional");
        };
        assert!(optional.value().is_none());
        let inner = optional.get_or_insert_default();
        assert_eq!(inner.reflect_kind(), ReflectKind::Int);
        assert_eq!(value, Some(0));
    }

    #[test]
    fn nested_options_deref() {
        let info = <Option<Option<String>>>::type_info();
        assert!(info.is_nullable());
        assert_eq!(info.deref_optional().kind(), ReflectKind::String);
        assert!(<Option<Option<String>>>::type_info().type_is::<Option<Option<String>>>());
        assert!(!<Option<u8>>::type_info().type_is::<Option<u16>>());
    }
}
