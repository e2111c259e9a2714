use crate::Reflect;

/// A map with string keys.
pub trait Map: Reflect {
    fn len(&self) -> usize;

    fn get(&self, key: &str) -> Option<&dyn Reflect>;

    /// Iterates entries; ordered maps yield keys in order.
    fn iter(&self) -> Box<dyn Iterator<Item = (&str, &dyn Reflect)> + '_>;

    /// Inserts (or keeps) the entry for `key` and returns its value.
    fn insert_default(&mut self, key: String) -> &mut dyn Reflect;

    fn clear(&mut self);
}
