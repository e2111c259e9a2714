use rowkit_utils::hash::HashMap;

use crate::info::Type;
use crate::model::{FieldId, StructField};

/// The field tree of one structure type, with its derived indexes.
///
/// Immutable once built, and shared through [`Mapper`](crate::model::Mapper).
#[derive(Debug)]
pub struct StructModel {
    pub(crate) ty: Type,
    // Arena in breadth-first order, addressed by `FieldId`.
    pub(crate) nodes: Vec<StructField>,
    pub(crate) roots: Vec<FieldId>,
    // Sorted by index path.
    pub(crate) fields: Vec<FieldId>,
    pub(crate) indexes: HashMap<Box<[usize]>, FieldId>,
    pub(crate) names: HashMap<String, FieldId>,
    pub(crate) properties: Vec<FieldId>,
}

impl StructModel {
    /// The structure this model describes.
    #[inline]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// # Panics
    ///
    /// Panics if `id` belongs to another model.
    #[inline]
    pub fn field(&self, id: FieldId) -> &StructField {
        &self.nodes[id.0]
    }

    /// Every field, sorted by index path.
    pub fn fields(&self) -> impl ExactSizeIterator<Item = &StructField> + '_ {
        self.fields.iter().map(|id| &self.nodes[id.0])
    }

    /// The fields exposed as columns or document keys, sorted by index path.
    ///
    /// Embedded structures are replaced by their promoted fields, and fields
    /// nested under a non-embedded structure are represented by that
    /// structure.
    pub fn properties(&self) -> impl ExactSizeIterator<Item = &StructField> + '_ {
        self.properties.iter().map(|id| &self.nodes[id.0])
    }

    #[inline]
    pub fn property_len(&self) -> usize {
        self.properties.len()
    }

    /// Fields declared directly on the structure, in declaration order.
    pub fn root_fields(&self) -> impl ExactSizeIterator<Item = &StructField> + '_ {
        self.roots.iter().map(|id| &self.nodes[id.0])
    }

    /// Finds a non-embedded field by flattened name.
    pub fn lookup(&self, name: &str) -> Option<&StructField> {
        self.names.get(name).map(|id| &self.nodes[id.0])
    }

    /// Finds a property by flattened name.
    ///
    /// Names of fields nested under a non-embedded structure are not
    /// properties and return `None`.
    pub fn lookup_property(&self, name: &str) -> Option<&StructField> {
        self.names
            .get(name)
            .filter(|id| self.properties.contains(id))
            .map(|id| &self.nodes[id.0])
    }

    /// Finds a field by its full index path.
    pub fn field_by_index(&self, index: &[usize]) -> Option<&StructField> {
        self.indexes.get(index).map(|id| &self.nodes[id.0])
    }

    /// Walks the tree from the root, following declaration indices.
    ///
    /// Unlike [`field_by_index`](Self::field_by_index) this visits every
    /// ancestor, and stops at the first index that is not part of the tree.
    pub fn get_by_traversal(&self, index: &[usize]) -> Option<&StructField> {
        let (first, rest) = index.split_first()?;
        let mut field = self.child_at(&self.roots, *first)?;
        for &i in rest {
            field = self.child_at(&field.children, i)?;
        }
        Some(field)
    }

    fn child_at(&self, siblings: &[FieldId], index: usize) -> Option<&StructField> {
        siblings
            .iter()
            .map(|id| &self.nodes[id.0])
            .find(|field| field.index.last() == Some(&index))
    }

    pub fn parent_of(&self, field: &StructField) -> Option<&StructField> {
        field.parent.map(|id| &self.nodes[id.0])
    }

    pub fn children_of<'a>(
        &'a self,
        field: &'a StructField,
    ) -> impl ExactSizeIterator<Item = &'a StructField> + 'a {
        field.children.iter().map(|id| &self.nodes[id.0])
    }

    /// Returns the nearest ancestor of `field` matching `predicate`.
    pub fn parent_by_traversal(
        &self,
        field: &StructField,
        mut predicate: impl FnMut(&StructField) -> bool,
    ) -> Option<&StructField> {
        let mut parent = self.parent_of(field);
        while let Some(current) = parent {
            if predicate(current) {
                return Some(current);
            }
            parent = self.parent_of(current);
        }
        None
    }
}
