//! Chooses the fields that take part in a write.

use crate::model::StructField;

/// Marks a field whose value is produced by the store, such as an identity or
/// computed column. Such fields are never written.
///
/// ```
/// use rowkit_reflect::derive::Reflect;
/// use rowkit_reflect::model::Mapper;
/// use rowkit_reflect::select::select_columns;
///
/// #[derive(Reflect)]
/// struct Invoice {
///     #[reflect(tag = "id,generated_column")]
///     pub id: u64,
///     pub number: String,
///     pub note: String,
/// }
///
/// let model = Mapper::new().model_of::<Invoice>().unwrap();
/// let selected = select_columns(model.properties(), &["note"]);
/// let names: Vec<&str> = selected.iter().map(|f| f.name()).collect();
/// assert_eq!(names, ["number"]);
/// ```
pub const GENERATED_COLUMN: &str = "generated_column";

/// Filters `properties` for a write, preserving their order.
///
/// Fields tagged [`GENERATED_COLUMN`] are dropped first, then fields whose
/// flattened name is listed in `omit`.
pub fn select_columns<'a>(
    properties: impl IntoIterator<Item = &'a StructField>,
    omit: &[&str],
) -> Vec<&'a StructField> {
    properties
        .into_iter()
        .filter(|field| !field.tag().has(GENERATED_COLUMN))
        .filter(|field| !omit.contains(&field.name()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::select_columns;
    use crate::derive::Reflect;
    use crate::model::Mapper;

    #[derive(Reflect)]
    struct Sample {
        pub a: i32,
        #[reflect(tag = ",generated_column")]
        pub b: i32,
        pub c: i32,
    }

    fn names(omit: &[&str]) -> Vec<String> {
        let model = Mapper::new().model_of::<Sample>().unwrap();
        select_columns(model.properties(), omit)
            .into_iter()
            .map(|f| f.name().to_owned())
            .collect()
    }

    #[test]
    fn generated_and_omitted_are_dropped() {
        assert_eq!(names(&["c"]), ["a"]);
    }

    #[test]
    fn empty_omit_keeps_order() {
        assert_eq!(names(&[]), ["a", "c"]);
    }

    #[test]
    fn unknown_omit_names_are_ignored() {
        assert_eq!(names(&["zzz", "a"]), ["c"]);
    }
}
