use std::sync::Arc;

use crate::Reflect;
use crate::codec::{CodecError, CodecRegistry, Format};
use crate::info::{TypeInfo, Typed};
use crate::model::StructModel;
use crate::ops::{value_at_path, value_at_path_mut};
use crate::row::{Column, ColumnReader, ColumnWriter, Row};
use crate::select::select_columns;

/// Converts records to and from [`Row`]s with a column registry.
///
/// ```
/// use rowkit_reflect::derive::Reflect;
/// use rowkit_reflect::row::{RowMapper, SqlValue};
///
/// #[derive(Reflect, Default, Debug, PartialEq)]
/// struct Book {
///     #[reflect(tag = "id,generated_column")]
///     pub id: i64,
///     #[reflect(tag = "title")]
///     pub title: String,
///     pub pages: Option<u32>,
/// }
///
/// let mapper = RowMapper::global();
/// let book = Book { id: 3, title: "Dune".into(), pages: None };
///
/// let row = mapper.encode(&book, &[]).unwrap();
/// assert_eq!(row.columns(), ["title", "pages"]);
/// assert_eq!(row.get("pages"), Some(&SqlValue::Null));
///
/// let mut back = Book::default();
/// mapper.decode(&row, &mut back).unwrap();
/// assert_eq!(back, Book { id: 0, ..book });
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RowMapper<'r> {
    registry: &'r CodecRegistry<Column>,
}

impl RowMapper<'static> {
    /// A mapper over the global column registry.
    pub fn global() -> Self {
        Self::new(Column::registry())
    }
}

impl<'r> RowMapper<'r> {
    #[inline]
    pub const fn new(registry: &'r CodecRegistry<Column>) -> Self {
        Self { registry }
    }

    #[inline]
    pub fn registry(&self) -> &'r CodecRegistry<Column> {
        self.registry
    }

    /// Returns the model of the structure described by `info`.
    pub fn model(&self, info: &'static TypeInfo) -> Result<Arc<StructModel>, CodecError> {
        self.registry
            .mapper()
            .model(info)
            .ok_or(CodecError::NotAStruct { ty: *info.ty() })
    }

    /// The columns written for `T`, without generated and omitted columns.
    pub fn columns<T: Typed>(&self, omit: &[&str]) -> Result<Vec<String>, CodecError> {
        let model = self.model(T::type_info())?;
        Ok(select_columns(model.properties(), omit)
            .into_iter()
            .map(|field| field.name().to_owned())
            .collect())
    }

    /// Encodes the writable columns of `record`.
    pub fn encode(&self, record: &dyn Reflect, omit: &[&str]) -> Result<Row, CodecError> {
        let model = self.model(record.reflect_type_info())?;
        let selected = select_columns(model.properties(), omit);

        let mut row = Row::with_capacity(selected.len());
        for field in selected {
            let mut writer = ColumnWriter::new();
            self.registry
                .encode(&mut writer, value_at_path(record, field.index()))?;
            row.push(field.name(), writer.into_value());
        }
        Ok(row)
    }

    /// Decodes `row` into `target`.
    ///
    /// Each column is matched by property name and decoded with the decoder
    /// of the declared field type. Columns without a matching property are
    /// skipped, and so are nulls for fields under an empty nullable parent.
    pub fn decode(&self, row: &Row, target: &mut dyn Reflect) -> Result<(), CodecError> {
        let model = self.model(target.reflect_type_info())?;
        for (column, value) in row.iter() {
            let Some(field) = model.lookup_property(column) else {
                log::debug!("skipped column `{column}`, unknown to `{}`", model.ty());
                continue;
            };
            if value.is_null() && value_at_path(target, field.index()).is_none() {
                continue;
            }
            let decoder = self.registry.lookup_decoder(field.type_info())?;
            let slot = value_at_path_mut(target, field.index())
                .ok_or(CodecError::NotAStruct { ty: *model.ty() })?;
            decoder(self.registry, &mut ColumnReader::new(value.clone()), slot)?;
        }
        Ok(())
    }
}

impl Default for RowMapper<'static> {
    fn default() -> Self {
        Self::global()
    }
}

/// Encodes `record` with the global column registry.
pub fn encode(record: &dyn Reflect, omit: &[&str]) -> Result<Row, CodecError> {
    RowMapper::global().encode(record, omit)
}

/// Decodes `row` into `target` with the global column registry.
pub fn decode(row: &Row, target: &mut dyn Reflect) -> Result<(), CodecError> {
    RowMapper::global().decode(row, target)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use super::RowMapper;
    use crate::codec::{CodecError, CodecRegistry, ValueWriter};
    use crate::derive::Reflect;
    use crate::info::ReflectKind;
    use crate::model::Mapper;
    use crate::row::{self, Column, ColumnWriter, Row, SqlValue};
    use crate::tag::NameFormat;

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Timestamps {
        pub created_at: i64,
        pub updated_at: Option<i64>,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Profile {
        pub bio: String,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Member {
        #[reflect(tag = "id,generated_column")]
        pub id: u64,
        #[reflect(tag = "email")]
        pub email: String,
        pub active: bool,
        pub ratio: f32,
        #[reflect(embed)]
        pub timestamps: Timestamps,
        pub profile: Profile,
        pub labels: BTreeMap<String, String>,
        pub photo: Vec<u8>,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Guest {
        pub name: String,
        #[reflect(embed)]
        pub stamps: Option<Timestamps>,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Home {
        pub home_city: String,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Resident {
        pub user_name: String,
        pub home: Home,
    }

    fn sample() -> Member {
        Member {
            id: 11,
            email: "a@b.c".into(),
            active: true,
            ratio: 0.5,
            timestamps: Timestamps { created_at: 100, updated_at: None },
            profile: Profile { bio: "hi".into() },
            labels: BTreeMap::from([("k".to_owned(), "v".to_owned())]),
            photo: vec![0xff],
        }
    }

    #[test]
    fn encode_maps_every_property() {
        let row = row::encode(&sample(), &[]).unwrap();
        let expected: Row = [
            ("email", SqlValue::Text("a@b.c".into())),
            ("active", SqlValue::Bool(true)),
            ("ratio", SqlValue::Float(0.5)),
            ("created_at", SqlValue::Int(100)),
            ("updated_at", SqlValue::Null),
            ("profile", SqlValue::Text(r#"{"bio":"hi"}"#.into())),
            ("labels", SqlValue::Text(r#"{"k":"v"}"#.into())),
            ("photo", SqlValue::Bytes(vec![0xff])),
        ]
        .into_iter()
        .collect();
        assert_eq!(row, expected);
    }

    #[test]
    fn columns_honor_omit() {
        let columns = RowMapper::global()
            .columns::<Member>(&["photo", "labels", "profile"])
            .unwrap();
        assert_eq!(columns, ["email", "active", "ratio", "created_at", "updated_at"]);
    }

    #[test]
    fn round_trip() {
        let row = row::encode(&sample(), &[]).unwrap();
        let mut back = Member::default();
        row::decode(&row, &mut back).unwrap();
        assert_eq!(back, Member { id: 0, ..sample() });
    }

    #[test]
    fn decode_is_lenient_and_skips_unknown_columns() {
        let row: Row = [
            ("id", SqlValue::Text("42".into())),
            ("active", SqlValue::Int(1)),
            ("ratio", SqlValue::Int(2)),
            ("updated_at", SqlValue::Int(7)),
            ("extra", SqlValue::Bool(false)),
        ]
        .into_iter()
        .collect();

        let mut member = Member::default();
        row::decode(&row, &mut member).unwrap();
        assert_eq!(member.id, 42);
        assert!(member.active);
        assert_eq!(member.ratio, 2.0);
        assert_eq!(member.timestamps.updated_at, Some(7));
    }

    #[test]
    fn decode_ignores_columns_of_nested_fields() {
        let row: Row = [("profile.bio", SqlValue::Text("x".into()))].into_iter().collect();
        let mut member = Member::default();
        row::decode(&row, &mut member).unwrap();
        assert_eq!(member.profile, Profile::default());
    }

    #[test]
    fn empty_embedded_optional_round_trips() {
        let guest = Guest { name: "g".into(), stamps: None };
        let row = row::encode(&guest, &[]).unwrap();
        assert_eq!(row.get("created_at"), Some(&SqlValue::Null));

        let mut back = Guest::default();
        row::decode(&row, &mut back).unwrap();
        assert_eq!(back, guest);

        let row: Row = [("created_at", SqlValue::Int(5))].into_iter().collect();
        row::decode(&row, &mut back).unwrap();
        assert_eq!(back.stamps, Some(Timestamps { created_at: 5, updated_at: None }));
    }

    #[test]
    fn document_columns_use_the_registry_mapper() {
        let mapper = Arc::new(Mapper::new().with_name_format(NameFormat::Camel));
        let registry = CodecRegistry::<Column>::new().with_mapper(mapper);
        let rows = RowMapper::new(&registry);

        let resident = Resident {
            user_name: "a".into(),
            home: Home { home_city: "x".into() },
        };
        let row = rows.encode(&resident, &[]).unwrap();
        assert_eq!(row.columns(), ["userName", "home"]);
        assert_eq!(row.get("home"), Some(&SqlValue::Text(r#"{"homeCity":"x"}"#.into())));

        let mut back = Resident::default();
        rows.decode(&row, &mut back).unwrap();
        assert_eq!(back, resident);
    }

    #[test]
    fn decode_rejects_mismatched_columns() {
        let row: Row = [("active", SqlValue::Text("maybe".into()))].into_iter().collect();
        let err = row::decode(&row, &mut Member::default()).unwrap_err();
        assert!(matches!(err, CodecError::UnexpectedValue { expected: "bool", found: "text" }));
    }

    #[test]
    fn non_structures_are_rejected() {
        let err = row::encode(&5_i32, &[]).unwrap_err();
        assert!(matches!(err, CodecError::NotAStruct { .. }));
    }

    fn redacted(
        _: &CodecRegistry<Column>,
        writer: &mut ColumnWriter,
        _: &dyn crate::Reflect,
    ) -> Result<(), CodecError> {
        writer.write_str("***");
        Ok(())
    }

    #[test]
    fn custom_registry_is_used() {
        let mut registry = CodecRegistry::<Column>::new();
        registry.set_kind_encoder(ReflectKind::String, redacted);

        let row = RowMapper::new(&registry).encode(&sample(), &["photo"]).unwrap();
        assert_eq!(row.get("email"), Some(&SqlValue::Text("***".into())));
    }
}
