use convert_case::{Case, Casing};

/// Derives the external name of a field that has no explicit name.
#[derive(Clone, Copy, Debug, Default)]
pub enum NameFormat {
    /// The Rust identifier, unchanged.
    #[default]
    AsIs,
    /// `created_at`
    Snake,
    /// `createdAt`
    Camel,
    /// `CreatedAt`
    Pascal,
    /// `created-at`
    Kebab,
    /// `CREATED_AT`
    ScreamingSnake,
    Custom(fn(&str) -> String),
}

impl NameFormat {
    /// ```
    /// use rowkit_reflect::tag::NameFormat;
    ///
    /// assert_eq!(NameFormat::Camel.apply("created_at"), "createdAt");
    /// assert_eq!(NameFormat::ScreamingSnake.apply("created_at"), "CREATED_AT");
    /// assert_eq!(NameFormat::AsIs.apply("created_at"), "created_at");
    /// ```
    pub fn apply(&self, name: &str) -> String {
        match self {
            Self::AsIs => name.to_owned(),
            Self::Snake => name.to_case(Case::Snake),
            Self::Camel => name.to_case(Case::Camel),
            Self::Pascal => name.to_case(Case::Pascal),
            Self::Kebab => name.to_case(Case::Kebab),
            Self::ScreamingSnake => name.to_case(Case::UpperSnake),
            Self::Custom(format) => format(name),
        }
    }
}
