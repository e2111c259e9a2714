use core::fmt;

/// One column value, as exchanged with a database driver.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SqlValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
}

impl SqlValue {
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Names the variant, for error messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::UInt(_) => "uint",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Bool(v) => fmt::Display::fmt(v, f),
            Self::Int(v) => fmt::Display::fmt(v, f),
            Self::UInt(v) => fmt::Display::fmt(v, f),
            Self::Float(v) => fmt::Display::fmt(v, f),
            Self::Text(v) => fmt::Debug::fmt(v, f),
            Self::Bytes(v) => write!(f, "<{} bytes>", v.len()),
        }
    }
}

// -----------------------------------------------------------------------------
// Row

/// Named column values, in column order.
///
/// ```
/// use rowkit_reflect::row::{Row, SqlValue};
///
/// let mut row = Row::new();
/// row.push("id", SqlValue::Int(1));
/// row.push("name", SqlValue::Text("ann".into()));
///
/// assert_eq!(row.columns(), ["id", "name"]);
/// assert_eq!(row.get("name"), Some(&SqlValue::Text("ann".into())));
/// assert_eq!(row.get("age"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<SqlValue>,
}

impl Row {
    #[inline]
    pub const fn new() -> Self {
        Self {
            columns: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            columns: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, column: impl Into<String>, value: SqlValue) {
        self.columns.push(column.into());
        self.values.push(value);
    }

    /// Returns the value of the first column named `column`.
    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        let position = self.columns.iter().position(|c| c == column)?;
        self.values.get(position)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &SqlValue)> + '_ {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    #[inline]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[inline]
    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    /// Splits the row into its column names and values.
    pub fn into_parts(self) -> (Vec<String>, Vec<SqlValue>) {
        (self.columns, self.values)
    }
}

impl<S: Into<String>> FromIterator<(S, SqlValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (S, SqlValue)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (column, value) in iter {
            row.push(column, value);
        }
        row
    }
}
