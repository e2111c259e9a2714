use crate::info::{Type, TypeInfo};
use crate::tag::StructTag;

/// Position of a field in its [`StructModel`](crate::model::StructModel).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(pub(crate) usize);

impl FieldId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A field of a [`StructModel`](crate::model::StructModel).
#[derive(Debug)]
pub struct StructField {
    pub(crate) id: FieldId,
    pub(crate) ident: &'static str,
    pub(crate) name: String,
    pub(crate) index: Box<[usize]>,
    pub(crate) info: &'static TypeInfo,
    pub(crate) nullable: bool,
    pub(crate) embedded: bool,
    pub(crate) tag: StructTag,
    pub(crate) parent: Option<FieldId>,
    pub(crate) children: Vec<FieldId>,
}

impl StructField {
    #[inline]
    pub fn id(&self) -> FieldId {
        self.id
    }

    /// The Rust identifier of the field.
    #[inline]
    pub fn ident(&self) -> &'static str {
        self.ident
    }

    /// The flattened, dot separated external name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declaration indices from the root structure down to this field.
    #[inline]
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    /// The declared type, used for decoder lookup.
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        self.info
    }

    #[inline]
    pub fn ty(&self) -> &Type {
        self.info.ty()
    }

    /// `true` if the declared type or any ancestor is nullable.
    #[inline]
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// `true` for an embedded structure whose fields are promoted.
    #[inline]
    pub fn is_embedded(&self) -> bool {
        self.embedded
    }

    #[inline]
    pub fn tag(&self) -> &StructTag {
        &self.tag
    }

    /// `None` for the fields declared on the root structure.
    #[inline]
    pub fn parent(&self) -> Option<FieldId> {
        self.parent
    }

    #[inline]
    pub fn children(&self) -> &[FieldId] {
        &self.children
    }
}
