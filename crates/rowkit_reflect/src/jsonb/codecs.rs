use std::sync::Arc;

use serde_json::{Map, Value};

use crate::Reflect;
use crate::codec::routines::{install_common, kind_mismatch};
use crate::codec::{CodecError, CodecRegistry, ValueReader};
use crate::info::{ReflectKind, TypeInfo};
use crate::jsonb::reader::json_kind;
use crate::jsonb::{Jsonb, Reader, Writer};
use crate::model::StructModel;
use crate::ops::{ReflectMut, ReflectRef, value_at_path, value_at_path_mut};

pub(super) fn install(registry: &mut CodecRegistry<Jsonb>) {
    install_common(registry);
    registry.set_kind_encoder(ReflectKind::Struct, encode_struct);
    registry.set_kind_decoder(ReflectKind::Struct, decode_struct);
    registry.set_kind_encoder(ReflectKind::List, encode_list);
    registry.set_kind_decoder(ReflectKind::List, decode_list);
    registry.set_kind_encoder(ReflectKind::Map, encode_map);
    registry.set_kind_decoder(ReflectKind::Map, decode_map);
}

fn model_of(
    registry: &CodecRegistry<Jsonb>,
    info: &'static TypeInfo,
) -> Result<Arc<StructModel>, CodecError> {
    registry
        .mapper()
        .model(info)
        .ok_or(CodecError::NotAStruct { ty: *info.ty() })
}

fn encode_nested(registry: &CodecRegistry<Jsonb>, value: Option<&dyn Reflect>) -> Result<Value, CodecError> {
    let mut writer = Writer::new();
    registry.encode(&mut writer, value)?;
    Ok(writer.into_value())
}

// -----------------------------------------------------------------------------
// Structures

fn encode_struct(
    registry: &CodecRegistry<Jsonb>,
    writer: &mut Writer,
    value: &dyn Reflect,
) -> Result<(), CodecError> {
    let model = model_of(registry, value.reflect_type_info())?;
    let mut object = Map::with_capacity(model.property_len());
    for field in model.properties() {
        // An empty nullable parent leaves its promoted fields null.
        let field_value = value_at_path(value, field.index());
        object.insert(field.name().to_owned(), encode_nested(registry, field_value)?);
    }
    writer.write_value(Value::Object(object));
    Ok(())
}

fn decode_struct(
    registry: &CodecRegistry<Jsonb>,
    reader: &mut Reader,
    target: &mut dyn Reflect,
) -> Result<(), CodecError> {
    if reader.is_null() {
        return Ok(());
    }
    let model = model_of(registry, target.reflect_type_info())?;
    let object = match reader.take() {
        Value::Object(object) => object,
        other => return Err(CodecError::unexpected("object", json_kind(&other))),
    };

    for (key, value) in object {
        let Some(field) = model.lookup_property(&key) else {
            log::trace!("skipped unknown key `{key}` of `{}`", model.ty());
            continue;
        };
        // A null for a field under an empty nullable parent keeps it empty.
        if value.is_null() && value_at_path(target, field.index()).is_none() {
            continue;
        }
        let decoder = registry.lookup_decoder(field.type_info())?;
        let slot = value_at_path_mut(target, field.index())
            .ok_or(CodecError::NotAStruct { ty: *model.ty() })?;
        decoder(registry, &mut Reader::new(value), slot)?;
    }
    Ok(())
}

// -----------------------------------------------------------------------------
// Lists

fn encode_list(
    registry: &CodecRegistry<Jsonb>,
    writer: &mut Writer,
    value: &dyn Reflect,
) -> Result<(), CodecError> {
    let ReflectRef::List(list) = value.reflect_ref() else {
        return Err(kind_mismatch("list", value));
    };
    let items = (0..list.len())
        .map(|index| encode_nested(registry, list.get(index)))
        .collect::<Result<Vec<_>, _>>()?;
    writer.write_value(Value::Array(items));
    Ok(())
}

fn decode_list(
    registry: &CodecRegistry<Jsonb>,
    reader: &mut Reader,
    target: &mut dyn Reflect,
) -> Result<(), CodecError> {
    let kind = target.reflect_kind();
    let ReflectMut::List(list) = target.reflect_mut() else {
        return Err(CodecError::unexpected("list", kind.as_str()));
    };
    let items = match reader.take() {
        Value::Null => Vec::new(),
        Value::Array(items) => items,
        other => return Err(CodecError::unexpected("array", json_kind(&other))),
    };

    list.clear();
    for item in items {
        registry.decode(&mut Reader::new(item), list.push_default())?;
    }
    Ok(())
}

// -----------------------------------------------------------------------------
// Maps

fn encode_map(
    registry: &CodecRegistry<Jsonb>,
    writer: &mut Writer,
    value: &dyn Reflect,
) -> Result<(), CodecError> {
    let ReflectRef::Map(map) = value.reflect_ref() else {
        return Err(kind_mismatch("map", value));
    };
    let mut object = Map::with_capacity(map.len());
    for (key, entry) in map.iter() {
        object.insert(key.to_owned(), encode_nested(registry, Some(entry))?);
    }
    writer.write_value(Value::Object(object));
    Ok(())
}

fn decode_map(
    registry: &CodecRegistry<Jsonb>,
    reader: &mut Reader,
    target: &mut dyn Reflect,
) -> Result<(), CodecError> {
    let kind = target.reflect_kind();
    let ReflectMut::Map(map) = target.reflect_mut() else {
        return Err(CodecError::unexpected("map", kind.as_str()));
    };
    let entries = match reader.take() {
        Value::Null => Map::new(),
        Value::Object(entries) => entries,
        other => return Err(CodecError::unexpected("object", json_kind(&other))),
    };

    map.clear();
    for (key, value) in entries {
        registry.decode(&mut Reader::new(value), map.insert_default(key))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::json;

    use crate::codec::CodecError;
    use crate::derive::Reflect;
    use crate::jsonb;

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Audit {
        pub created_by: String,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Address {
        pub city: String,
        pub zip: Option<String>,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Customer {
        #[reflect(tag = "id")]
        pub id: i64,
        #[reflect(embed)]
        pub audit: Audit,
        pub address: Option<Address>,
        pub scores: Vec<f64>,
        pub attributes: BTreeMap<String, bool>,
        pub avatar: Vec<u8>,
        secret: u32,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Signup {
        pub id: i64,
        #[reflect(embed)]
        pub audit: Option<Audit>,
    }

    fn sample() -> Customer {
        Customer {
            id: 9,
            audit: Audit { created_by: "ops".into() },
            address: Some(Address { city: "Oslo".into(), zip: None }),
            scores: vec![1.5, 2.0],
            attributes: BTreeMap::from([("vip".to_owned(), true)]),
            avatar: vec![1, 2, 3],
            secret: 4,
        }
    }

    #[test]
    fn encode_struct_flattens_embedded_fields() {
        let value = jsonb::to_value(&sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 9,
                "created_by": "ops",
                "address": { "city": "Oslo", "zip": null },
                "scores": [1.5, 2.0],
                "attributes": { "vip": true },
                "avatar": "AQID",
            })
        );
    }

    #[test]
    fn round_trip_keeps_visible_fields() {
        let text = jsonb::to_string(&sample()).unwrap();
        let mut back = Customer::default();
        jsonb::from_str(&text, &mut back).unwrap();
        assert_eq!(back, Customer { secret: 0, ..sample() });
    }

    #[test]
    fn empty_embedded_optional_round_trips() {
        let empty = Signup { id: 1, audit: None };
        let value = jsonb::to_value(&empty).unwrap();
        assert_eq!(value, json!({ "id": 1, "created_by": null }));
        let mut back = Signup::default();
        jsonb::from_value(value, &mut back).unwrap();
        assert_eq!(back, empty);

        let mut filled = Signup::default();
        jsonb::from_value(json!({ "id": 2, "created_by": "me" }), &mut filled).unwrap();
        assert_eq!(filled.audit, Some(Audit { created_by: "me".into() }));
    }

    #[test]
    fn decode_ignores_keys_of_nested_fields() {
        let mut target = Customer::default();
        jsonb::from_value(json!({ "address.city": "Rome", "id": 4 }), &mut target).unwrap();
        assert_eq!(target.address, None);
        assert_eq!(target.id, 4);
    }

    #[test]
    fn decode_skips_unknown_keys_and_keeps_absent_ones() {
        let mut target = Customer { id: 1, ..Customer::default() };
        jsonb::from_value(json!({ "unknown": 1, "created_by": "me" }), &mut target).unwrap();
        assert_eq!(target.id, 1);
        assert_eq!(target.audit.created_by, "me");
    }

    #[test]
    fn decode_nulls() {
        let mut target = sample();
        jsonb::from_value(
            json!({ "id": null, "address": null, "scores": null, "attributes": null, "avatar": null }),
            &mut target,
        )
        .unwrap();
        assert_eq!(target.id, 0);
        assert_eq!(target.address, None);
        assert!(target.scores.is_empty());
        assert!(target.attributes.is_empty());
        assert!(target.avatar.is_empty());

        // A null document leaves the structure untouched.
        let mut target = sample();
        jsonb::from_value(json!(null), &mut target).unwrap();
        assert_eq!(target, sample());
    }

    #[test]
    fn decode_reports_mismatches() {
        let mut target = Customer::default();
        let err = jsonb::from_value(json!({ "id": "nine" }), &mut target).unwrap_err();
        assert!(matches!(
            err,
            CodecError::UnexpectedValue { expected: "signed integer", found: "string" }
        ));

        let err = jsonb::from_value(json!([1]), &mut target).unwrap_err();
        assert!(matches!(err, CodecError::UnexpectedValue { expected: "object", .. }));
    }

    #[test]
    fn non_finite_floats_are_rejected() {
        let err = jsonb::to_value(&f64::NAN).unwrap_err();
        assert!(matches!(err, CodecError::NonFiniteFloat(_)));
    }

    #[test]
    fn out_of_range_integers_are_rejected() {
        let mut small = 0_u8;
        let err = jsonb::from_value(json!(300), &mut small).unwrap_err();
        assert!(matches!(err, CodecError::Apply(_)));
    }
}
