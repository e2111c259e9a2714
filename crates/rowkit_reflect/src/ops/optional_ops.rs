use crate::Reflect;

/// A nullable value.
pub trait Optional: Reflect {
    fn value(&self) -> Option<&dyn Reflect>;

    fn value_mut(&mut self) -> Option<&mut dyn Reflect>;

    /// Returns the inner value, allocating a default one if empty.
    fn get_or_insert_default(&mut self) -> &mut dyn Reflect;

    fn set_none(&mut self);
}
