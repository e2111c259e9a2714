use core::any::Any;
use std::collections::BTreeMap;

use crate::Reflect;
use crate::impls::GenericTypeInfoCell;
use crate::info::{ListInfo, MapInfo, ReflectKind, TypeInfo, Typed};
use crate::ops::{List, Map, ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// Vec

impl<T: Reflect + Typed + Default> Typed for Vec<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::List(ListInfo::new::<Self, T>()))
    }
}

impl<T: Reflect + Typed + Default> Reflect for Vec<T> {
    #[inline]
    fn reflect_kind(&self) -> ReflectKind {
        ReflectKind::List
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::List(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::List(self)
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

impl<T: Reflect + Typed + Default> List for Vec<T> {
    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        <[T]>::get(self, index).map(|v| v as &dyn Reflect)
    }

    fn push_default(&mut self) -> &mut dyn Reflect {
        self.push(T::default());
        let last = Vec::len(self) - 1;
        &mut self[last]
    }

    #[inline]
    fn clear(&mut self) {
        Vec::clear(self);
    }
}

// -----------------------------------------------------------------------------
// BTreeMap

impl<V: Reflect + Typed + Default> Typed for BTreeMap<String, V> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Map(MapInfo::new::<Self, V>()))
    }
}

impl<V: Reflect + Typed + Default> Reflect for BTreeMap<String, V> {
    #[inline]
    fn reflect_kind(&self) -> ReflectKind {
        ReflectKind::Map
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Map(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Map(self)
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

impl<V: Reflect + Typed + Default> Map for BTreeMap<String, V> {
    #[inline]
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    #[inline]
    fn get(&self, key: &str) -> Option<&dyn Reflect> {
        BTreeMap::get(self, key).map(|v| v as &dyn Reflect)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&str, &dyn Reflect)> + '_> {
        Box::new(BTreeMap::iter(self).map(|(k, v)| (k.as_str(), v as &dyn Reflect)))
    }

    fn insert_default(&mut self, key: String) -> &mut dyn Reflect {
        self.entry(key).or_default()
    }

    #[inline]
    fn clear(&mut self) {
        BTreeMap::clear(self);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::Reflect;
    use crate::info::{ReflectKind, Typed};
    use crate::ops::{List, Map, ReflectMut, ReflectRef, ScalarValue};

    #[test]
    fn list_push_default() {
        let mut items: Vec<u16> = vec![1];
        let slot = List::push_default(&mut items);
        let ReflectMut::Scalar(slot) = slot.reflect_mut() else {
            panic!("expected a scalar");
        };
        slot.set_scalar(ScalarValue::Uint(9)).unwrap();
        assert_eq!(items, vec![1, 9]);
        assert_eq!(<Vec<u16>>::type_info().as_list().unwrap().item_info().kind(), ReflectKind::Uint);
    }

    #[test]
    fn map_iterates_in_order() {
        let mut map = BTreeMap::new();
        map.insert("b".to_owned(), 2_i32);
        map.insert("a".to_owned(), 1_i32);
        let ReflectRef::Map(view) = map.reflect_ref() else {
            panic!("expected a map");
        };
        let keys: Vec<&str> = view.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a", "b"]);
        assert!(Map::get(&map, "a").is_some());
    }
}
