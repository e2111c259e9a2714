use crate::Reflect;

/// A structure whose fields are reachable by declaration index.
///
/// Fields without type information (see [`NamedField::hidden`]) are not
/// reachable and return `None`.
///
/// [`NamedField::hidden`]: crate::info::NamedField::hidden
pub trait Struct: Reflect {
    fn field_at(&self, index: usize) -> Option<&dyn Reflect>;

    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Number of declared fields, reachable or not.
    fn field_len(&self) -> usize;
}
