use crate::info::{TypeInfo, Typed};

// -----------------------------------------------------------------------------
// NamedField

/// A declared field of a structure.
///
/// Fields that the derive macro does not reflect (private fields that are not
/// embedded, and `#[reflect(ignore)]` fields) are still listed so that
/// [`index`](Self::index) matches the declaration order, but carry no type
/// information.
///
/// ```
/// use rowkit_reflect::derive::Reflect;
/// use rowkit_reflect::info::Typed;
///
/// #[derive(Reflect)]
/// struct Account {
///     #[reflect(tag = "account_id,primary_key")]
///     pub id: u64,
///     secret: String,
/// }
/// # let _ = Account { id: 0, secret: String::new() }.secret;
///
/// let info = Account::type_info().as_struct().unwrap();
/// let id = info.field_at(0).unwrap();
/// assert_eq!(id.name(), "id");
/// assert_eq!(id.tag("sql"), Some("account_id,primary_key"));
/// assert!(id.type_info().is_some());
///
/// let secret = info.field("secret").unwrap();
/// assert!(!secret.is_exported());
/// assert!(secret.type_info().is_none());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct NamedField {
    name: &'static str,
    index: usize,
    exported: bool,
    embedded: bool,
    tags: &'static [(&'static str, &'static str)],
    // Resolved lazily, so self-referencing types can build their info.
    type_info: Option<fn() -> &'static TypeInfo>,
}

impl NamedField {
    /// A reflected, public field of type `T`.
    #[inline]
    pub const fn new<T: Typed>(name: &'static str, index: usize) -> Self {
        Self {
            name,
            index,
            exported: true,
            embedded: false,
            tags: &[],
            type_info: Some(T::type_info),
        }
    }

    /// A private field without type information.
    #[inline]
    pub const fn hidden(name: &'static str, index: usize) -> Self {
        Self {
            name,
            index,
            exported: false,
            embedded: false,
            tags: &[],
            type_info: None,
        }
    }

    #[inline]
    pub const fn with_exported(mut self, exported: bool) -> Self {
        self.exported = exported;
        self
    }

    #[inline]
    pub const fn with_embedded(mut self, embedded: bool) -> Self {
        self.embedded = embedded;
        self
    }

    /// Sets the raw annotations, as `(namespace, annotation)` pairs.
    #[inline]
    pub const fn with_tags(mut self, tags: &'static [(&'static str, &'static str)]) -> Self {
        self.tags = tags;
        self
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Position of the field in declaration order.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns `true` if the field is `pub`.
    #[inline]
    pub const fn is_exported(&self) -> bool {
        self.exported
    }

    /// Returns `true` if the field was marked `#[reflect(embed)]`.
    #[inline]
    pub const fn is_embedded(&self) -> bool {
        self.embedded
    }

    /// Returns the raw annotation of the given namespace.
    pub fn tag(&self, namespace: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(key, _)| *key == namespace)
            .map(|(_, value)| *value)
    }

    #[inline]
    pub fn type_info(&self) -> Option<&'static TypeInfo> {
        self.type_info.map(|f| f())
    }
}
