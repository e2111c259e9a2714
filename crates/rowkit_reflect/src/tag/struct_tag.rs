use rowkit_utils::hash::HashMap;

use crate::tag::NameFormat;

/// The name that excludes a field.
pub const EXCLUDED: &str = "-";

/// A parsed field annotation.
#[derive(Clone, Debug, Default)]
pub struct StructTag {
    original_name: String,
    name: String,
    opts: HashMap<String, String>,
}

impl StructTag {
    /// The name as written in the annotation, possibly empty.
    #[inline]
    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    /// The external name: the written name, or the derived one.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if the annotation explicitly names the field.
    #[inline]
    pub fn has_name_override(&self) -> bool {
        !self.original_name.is_empty()
    }

    #[inline]
    pub fn is_excluded(&self) -> bool {
        self.name == EXCLUDED
    }

    /// Returns the value of an option; bare flags have an empty value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.opts.get(key).map(String::as_str)
    }

    /// Returns `true` if the option is present, with or without a value.
    #[inline]
    pub fn has(&self, key: &str) -> bool {
        self.opts.contains_key(key)
    }

    pub fn options(&self) -> impl Iterator<Item = (&str, &str)> {
        self.opts.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Parses an annotation of the field `field_name`.
///
/// A missing annotation behaves like an empty one.
///
/// ```
/// use rowkit_reflect::tag::{NameFormat, parse_tag};
///
/// let tag = parse_tag(Some(" id , Primary_Key, size = 36=x"), "user_id", NameFormat::AsIs);
/// assert_eq!(tag.name(), "id");
/// assert_eq!(tag.get("primary_key"), Some(""));
/// assert_eq!(tag.get("size"), Some("36=x"));
///
/// let derived = parse_tag(Some(",generated_column"), "created_at", NameFormat::Camel);
/// assert_eq!(derived.name(), "createdAt");
/// assert_eq!(derived.original_name(), "");
/// assert!(derived.has("generated_column"));
/// ```
pub fn parse_tag(annotation: Option<&str>, field_name: &str, format: NameFormat) -> StructTag {
    let mut segments = annotation.unwrap_or_default().split(',');
    let original_name = segments.next().unwrap_or_default().trim().to_owned();

    let mut opts = HashMap::default();
    for segment in segments {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        let (key, value) = match segment.split_once('=') {
            Some((key, value)) => (key.trim(), value.trim()),
            None => (segment, ""),
        };
        opts.insert(key.to_lowercase(), value.to_owned());
    }

    let name = if original_name.is_empty() {
        format.apply(field_name)
    } else {
        original_name.clone()
    };

    StructTag {
        original_name,
        name,
        opts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_annotation_derives_name() {
        let tag = parse_tag(None, "CreatedAt", NameFormat::Snake);
        assert_eq!(tag.name(), "created_at");
        assert!(!tag.has_name_override());
        assert_eq!(tag.options().count(), 0);
    }

    #[test]
    fn exclusion_sentinel() {
        assert!(parse_tag(Some("-"), "secret", NameFormat::AsIs).is_excluded());
        assert!(parse_tag(Some(" - ,omitempty"), "secret", NameFormat::AsIs).is_excluded());
        assert!(!parse_tag(Some("-x"), "secret", NameFormat::AsIs).is_excluded());
    }

    #[test]
    fn option_keys_are_lowercased_values_trimmed() {
        let tag = parse_tag(Some("name,Charset= UTF8MB4 ,,AUTO_INCREMENT"), "n", NameFormat::AsIs);
        assert_eq!(tag.get("charset"), Some("UTF8MB4"));
        assert_eq!(tag.get("auto_increment"), Some(""));
        assert!(tag.get("Charset").is_none());
        assert_eq!(tag.options().count(), 2);
    }

    #[test]
    fn custom_format() {
        fn upper(name: &str) -> String {
            name.to_uppercase()
        }
        let tag = parse_tag(Some(""), "id", NameFormat::Custom(upper));
        assert_eq!(tag.name(), "ID");
    }
}
