use core::any::TypeId;
use core::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rowkit_utils::TypeIdMap;
use rowkit_utils::hash::HashMap;

use crate::Reflect;
use crate::codec::capability::{decode_deserialize, decode_unmarshal};
use crate::codec::capability::{encode_marshal, encode_null, encode_serialize, encode_text};
use crate::codec::{CodecError, Format, ValueWriter};
use crate::info::{ReflectKind, TypeInfo, Typed};
use crate::jsonb::Jsonb;
use crate::model::Mapper;

/// Writes `value` with the writer of `F`.
///
/// The registry is passed along so nested values can be dispatched again.
pub type Encoder<F> =
    fn(&CodecRegistry<F>, &mut <F as Format>::Writer, &dyn Reflect) -> Result<(), CodecError>;

/// Reads the next value of `F` into `target`.
pub type Decoder<F> =
    fn(&CodecRegistry<F>, &mut <F as Format>::Reader, &mut dyn Reflect) -> Result<(), CodecError>;

// -----------------------------------------------------------------------------
// CodecRegistry

/// Exact-type and category codec tables of one format, plus the [`Mapper`]
/// used for structures.
///
/// Registration takes `&mut self`, so it is exclusive by construction.
/// Registries that must be shared and still modified go through
/// [`CodecRegistryArc`]. The global registry, [`Format::registry`], is frozen
/// once built.
///
/// ```
/// use rowkit_reflect::codec::{CodecError, CodecRegistry, ValueWriter};
/// use rowkit_reflect::info::ReflectKind;
/// use rowkit_reflect::jsonb::{self, Jsonb, Writer};
/// use rowkit_reflect::Reflect;
///
/// fn shout(_: &CodecRegistry<Jsonb>, w: &mut Writer, v: &dyn Reflect) -> Result<(), CodecError> {
///     let text = v.downcast_ref::<String>().map(|s| s.to_uppercase()).unwrap_or_default();
///     w.write_str(&text);
///     Ok(())
/// }
///
/// let mut registry = CodecRegistry::<Jsonb>::new();
/// registry.set_kind_encoder(ReflectKind::String, shout);
///
/// let text = jsonb::to_string_with(&registry, &String::from("hi")).unwrap();
/// assert_eq!(text, r#""HI""#);
/// ```
pub struct CodecRegistry<F: Format> {
    type_encoders: TypeIdMap<Encoder<F>>,
    type_decoders: TypeIdMap<Decoder<F>>,
    kind_encoders: HashMap<ReflectKind, Encoder<F>>,
    kind_decoders: HashMap<ReflectKind, Decoder<F>>,
    mapper: Arc<Mapper>,
    documents: OnceLock<Box<CodecRegistry<Jsonb>>>,
}

impl<F: Format> CodecRegistry<F> {
    /// A registry without any codec, using the global [`Mapper`].
    pub fn empty() -> Self {
        Self {
            type_encoders: TypeIdMap::new(),
            type_decoders: TypeIdMap::new(),
            kind_encoders: HashMap::default(),
            kind_decoders: HashMap::default(),
            mapper: Mapper::global().clone(),
            documents: OnceLock::new(),
        }
    }

    /// A registry with the default codecs of `F`.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        F::install_defaults(&mut registry);
        registry
    }

    /// Replaces the [`Mapper`] used to lay out structures.
    pub fn with_mapper(mut self, mapper: Arc<Mapper>) -> Self {
        self.mapper = mapper;
        self.documents = OnceLock::new();
        self
    }

    #[inline]
    pub fn mapper(&self) -> &Mapper {
        &self.mapper
    }

    /// The JSON registry for values this format stores as documents.
    ///
    /// It shares this registry's [`Mapper`], so nested keys are named the
    /// same way as top-level ones. With the global mapper this is
    /// [`Jsonb::registry`]; otherwise one is built on first use.
    pub fn documents(&self) -> &CodecRegistry<Jsonb> {
        if Arc::ptr_eq(&self.mapper, Mapper::global()) {
            return Jsonb::registry();
        }
        self.documents
            .get_or_init(|| Box::new(Jsonb::registry_with_mapper(self.mapper.clone())))
    }

    // -------------------------------------------------------------------------
    // Registration, last write wins

    pub fn set_type_encoder<T: Typed>(&mut self, encoder: Encoder<F>) {
        self.set_type_encoder_by_id(TypeId::of::<T>(), encoder);
    }

    pub fn set_type_encoder_by_id(&mut self, type_id: TypeId, encoder: Encoder<F>) {
        if self.type_encoders.insert(type_id, encoder).is_some() {
            log::trace!("replaced type encoder for {type_id:?}");
        }
    }

    pub fn set_type_decoder<T: Typed>(&mut self, decoder: Decoder<F>) {
        self.set_type_decoder_by_id(TypeId::of::<T>(), decoder);
    }

    pub fn set_type_decoder_by_id(&mut self, type_id: TypeId, decoder: Decoder<F>) {
        if self.type_decoders.insert(type_id, decoder).is_some() {
            log::trace!("replaced type decoder for {type_id:?}");
        }
    }

    pub fn set_kind_encoder(&mut self, kind: ReflectKind, encoder: Encoder<F>) {
        if self.kind_encoders.insert(kind, encoder).is_some() {
            log::trace!("replaced kind encoder for {kind}");
        }
    }

    pub fn set_kind_decoder(&mut self, kind: ReflectKind, decoder: Decoder<F>) {
        if self.kind_decoders.insert(kind, decoder).is_some() {
            log::trace!("replaced kind decoder for {kind}");
        }
    }

    // -------------------------------------------------------------------------
    // Lookup

    /// Selects the encoder of `value`, see the [module docs](crate::codec).
    pub fn lookup_encoder(&self, value: &dyn Reflect) -> Result<Encoder<F>, CodecError> {
        if value.is_null() {
            return Ok(encode_null::<F>);
        }

        let info = value.reflect_type_info();
        let capabilities = info.capabilities();
        if capabilities.marshal().is_some() {
            return Ok(encode_marshal::<F>);
        }
        if capabilities.serialize().is_some() {
            return Ok(encode_serialize::<F>);
        }
        if capabilities.text().is_some() {
            return Ok(encode_text::<F>);
        }
        if let Some(encoder) = self.type_encoders.get(&info.type_id()) {
            return Ok(*encoder);
        }
        if let Some(encoder) = self.kind_encoders.get(&info.kind()) {
            return Ok(*encoder);
        }
        Err(CodecError::NoEncoder { ty: *info.ty() })
    }

    /// Selects the decoder of the type described by `info`.
    ///
    /// There is no null shortcut: decoders check the incoming token.
    pub fn lookup_decoder(&self, info: &TypeInfo) -> Result<Decoder<F>, CodecError> {
        let capabilities = info.capabilities();
        if capabilities.unmarshal().is_some() {
            return Ok(decode_unmarshal::<F>);
        }
        if capabilities.deserialize().is_some() {
            return Ok(decode_deserialize::<F>);
        }
        if let Some(decoder) = self.type_decoders.get(&info.type_id()) {
            return Ok(*decoder);
        }
        if let Some(decoder) = self.kind_decoders.get(&info.kind()) {
            return Ok(*decoder);
        }
        Err(CodecError::NoDecoder { ty: *info.ty() })
    }

    /// Encodes `value`; an absent value is written as the null token.
    pub fn encode(&self, writer: &mut F::Writer, value: Option<&dyn Reflect>) -> Result<(), CodecError> {
        match value {
            Some(value) => (self.lookup_encoder(value)?)(self, writer, value),
            None => {
                writer.write_null();
                Ok(())
            }
        }
    }

    /// Decodes the next value into `target`, using the decoder of its type.
    pub fn decode(&self, reader: &mut F::Reader, target: &mut dyn Reflect) -> Result<(), CodecError> {
        let decoder = self.lookup_decoder(target.reflect_type_info())?;
        decoder(self, reader, target)
    }
}

impl<F: Format> Default for CodecRegistry<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Format> fmt::Debug for CodecRegistry<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecRegistry")
            .field("format", &core::any::type_name::<F>())
            .field("type_encoders", &self.type_encoders.len())
            .field("type_decoders", &self.type_decoders.len())
            .field("kind_encoders", &self.kind_encoders.len())
            .field("kind_decoders", &self.kind_decoders.len())
            .field("mapper", &self.mapper)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// CodecRegistryArc

/// A shared [`CodecRegistry`] behind a read-write lock.
pub struct CodecRegistryArc<F: Format> {
    internal: Arc<RwLock<CodecRegistry<F>>>,
}

impl<F: Format> CodecRegistryArc<F> {
    pub fn new(registry: CodecRegistry<F>) -> Self {
        Self {
            internal: Arc::new(RwLock::new(registry)),
        }
    }

    /// Takes a read lock on the underlying [`CodecRegistry`].
    pub fn read(&self) -> RwLockReadGuard<'_, CodecRegistry<F>> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`CodecRegistry`].
    pub fn write(&self) -> RwLockWriteGuard<'_, CodecRegistry<F>> {
        self.internal.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<F: Format> Clone for CodecRegistryArc<F> {
    fn clone(&self) -> Self {
        Self {
            internal: Arc::clone(&self.internal),
        }
    }
}

impl<F: Format> Default for CodecRegistryArc<F> {
    fn default() -> Self {
        Self::new(CodecRegistry::new())
    }
}

impl<F: Format> fmt::Debug for CodecRegistryArc<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.read(), f)
    }
}

#[cfg(test)]
mod tests {
    use core::fmt;

    use serde_json::{Value, json};

    use super::{CodecRegistry, CodecRegistryArc};
    use crate::Reflect;
    use crate::codec::{CodecError, Marshal, Unmarshal, ValueReader, ValueWriter};
    use crate::derive::Reflect;
    use crate::info::ReflectKind;
    use crate::jsonb::{self, Jsonb, Reader, Writer};

    #[derive(Reflect, Default, Debug, PartialEq)]
    #[reflect(marshal, unmarshal)]
    struct Money {
        pub cents: i64,
    }

    impl Marshal for Money {
        fn marshal(&self, writer: &mut dyn ValueWriter) -> Result<(), CodecError> {
            writer.write_str(&format!("{}.{:02}", self.cents / 100, self.cents % 100));
            Ok(())
        }
    }

    impl Unmarshal for Money {
        fn unmarshal(&mut self, reader: &mut dyn ValueReader) -> Result<(), CodecError> {
            let text = reader.read_string()?;
            let (units, cents) = text.split_once('.').ok_or_else(|| CodecError::custom("no dot"))?;
            let units: i64 = units.parse().map_err(CodecError::custom)?;
            let cents: i64 = cents.parse().map_err(CodecError::custom)?;
            self.cents = units * 100 + cents;
            Ok(())
        }
    }

    #[derive(Reflect, Default, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    #[reflect(opaque, serde)]
    struct Point(i32, i32);

    #[derive(Reflect, Default)]
    #[reflect(opaque, text)]
    struct Code(u16);

    impl fmt::Display for Code {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "C-{}", self.0)
        }
    }

    #[derive(Reflect, Default)]
    #[reflect(opaque)]
    struct Blob;

    fn constant(_: &CodecRegistry<Jsonb>, w: &mut Writer, _: &dyn Reflect) -> Result<(), CodecError> {
        w.write_str("constant");
        Ok(())
    }

    fn other(_: &CodecRegistry<Jsonb>, w: &mut Writer, _: &dyn Reflect) -> Result<(), CodecError> {
        w.write_str("other");
        Ok(())
    }

    fn encode(registry: &CodecRegistry<Jsonb>, value: &dyn Reflect) -> Value {
        jsonb::to_value_with(registry, value).unwrap()
    }

    #[test]
    fn marshal_wins_over_registered_codecs() {
        let mut registry = CodecRegistry::<Jsonb>::new();
        registry.set_type_encoder::<Money>(constant);
        registry.set_kind_encoder(ReflectKind::Struct, constant);

        assert_eq!(encode(&registry, &Money { cents: 1205 }), json!("12.05"));

        let mut money = Money::default();
        jsonb::from_value_with(&registry, json!("3.40"), &mut money).unwrap();
        assert_eq!(money.cents, 340);
    }

    #[test]
    fn null_wins_over_everything() {
        let mut registry = CodecRegistry::<Jsonb>::new();
        registry.set_kind_encoder(ReflectKind::Optional, constant);
        assert_eq!(encode(&registry, &None::<Money>), Value::Null);
        assert_eq!(encode(&registry, &Some(1_u8)), json!("constant"));

        let mut writer = Writer::new();
        registry.encode(&mut writer, None).unwrap();
        assert_eq!(writer.into_value(), Value::Null);
    }

    #[test]
    fn exact_type_wins_over_kind() {
        let mut registry = CodecRegistry::<Jsonb>::new();
        registry.set_kind_encoder(ReflectKind::String, other);
        registry.set_type_encoder::<String>(constant);
        assert_eq!(encode(&registry, &String::from("x")), json!("constant"));
    }

    #[test]
    fn last_registration_wins() {
        let mut registry = CodecRegistry::<Jsonb>::new();
        registry.set_kind_encoder(ReflectKind::Int, constant);
        registry.set_kind_encoder(ReflectKind::Int, other);
        assert_eq!(encode(&registry, &1_i32), json!("other"));
    }

    #[test]
    fn serde_capability() {
        let registry = CodecRegistry::<Jsonb>::new();
        assert_eq!(encode(&registry, &Point(1, 2)), json!([1, 2]));

        let mut point = Point::default();
        jsonb::from_value_with(&registry, json!([3, 4]), &mut point).unwrap();
        assert_eq!(point, Point(3, 4));
    }

    #[test]
    fn text_capability_only_encodes() {
        let registry = CodecRegistry::<Jsonb>::new();
        assert_eq!(encode(&registry, &Code(7)), json!("C-7"));

        let err = jsonb::from_value_with(&registry, json!("C-7"), &mut Code(0)).unwrap_err();
        assert!(matches!(err, CodecError::NoDecoder { ty } if ty.is::<Code>()));
    }

    #[test]
    fn missing_codecs_are_reported() {
        let registry = CodecRegistry::<Jsonb>::new();
        let err = registry.lookup_encoder(&Blob).unwrap_err();
        assert!(matches!(err, CodecError::NoEncoder { ty } if ty.is::<Blob>()));

        let empty = CodecRegistry::<Jsonb>::empty();
        let err = jsonb::to_value_with(&empty, &1_i32).unwrap_err();
        assert!(matches!(err, CodecError::NoEncoder { .. }));
        let err = empty
            .decode(&mut Reader::new(json!(1)), &mut 0_i32)
            .unwrap_err();
        assert!(matches!(err, CodecError::NoDecoder { .. }));
    }

    #[test]
    fn shared_registry_accepts_late_registration() {
        let shared = CodecRegistryArc::<Jsonb>::default();
        let reader = shared.clone();
        shared.write().set_kind_encoder(ReflectKind::Bool, constant);
        assert_eq!(encode(&reader.read(), &true), json!("constant"));
    }
}
