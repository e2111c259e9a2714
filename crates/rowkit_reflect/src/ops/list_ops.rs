use crate::Reflect;

/// A growable sequence.
pub trait List: Reflect {
    fn len(&self) -> usize;

    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    /// Appends a default item and returns it, so a decoder can fill it in.
    fn push_default(&mut self) -> &mut dyn Reflect;

    fn clear(&mut self);
}
