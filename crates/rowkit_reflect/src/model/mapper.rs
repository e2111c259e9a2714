use std::borrow::Cow;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use rowkit_utils::TypeIdMap;

use crate::info::{TypeInfo, Typed};
use crate::model::StructModel;
use crate::model::builder::build_model;
use crate::tag::NameFormat;

/// The annotation namespace read by default, `#[reflect(tag = "..")]`.
pub const DEFAULT_TAG_KEY: &str = "sql";

/// Builds [`StructModel`]s and caches them per type.
///
/// A mapper is configured with the annotation namespace it reads and the
/// [`NameFormat`] applied to fields without an explicit name. Models are
/// built once and kept for the lifetime of the mapper; the cache is never
/// invalidated.
///
/// ```
/// use rowkit_reflect::derive::Reflect;
/// use rowkit_reflect::model::Mapper;
/// use rowkit_reflect::tag::NameFormat;
///
/// #[derive(Reflect)]
/// struct Order {
///     #[reflect(tag(json = "orderId"))]
///     pub order_id: u64,
///     pub total_cents: i64,
/// }
///
/// let mapper = Mapper::new()
///     .with_tag_key("json")
///     .with_name_format(NameFormat::Camel);
/// let model = mapper.model_of::<Order>().unwrap();
/// let names: Vec<&str> = model.properties().map(|f| f.name()).collect();
/// assert_eq!(names, ["orderId", "totalCents"]);
/// ```
pub struct Mapper {
    tag_key: Cow<'static, str>,
    name_format: NameFormat,
    cache: RwLock<TypeIdMap<Arc<StructModel>>>,
}

impl Mapper {
    pub fn new() -> Self {
        Self {
            tag_key: Cow::Borrowed(DEFAULT_TAG_KEY),
            name_format: NameFormat::AsIs,
            cache: RwLock::new(TypeIdMap::new()),
        }
    }

    /// Sets the annotation namespace, see [`NamedField::tag`](crate::info::NamedField::tag).
    pub fn with_tag_key(mut self, tag_key: impl Into<Cow<'static, str>>) -> Self {
        self.tag_key = tag_key.into();
        self
    }

    pub fn with_name_format(mut self, name_format: NameFormat) -> Self {
        self.name_format = name_format;
        self
    }

    /// The process wide mapper, with the default configuration.
    pub fn global() -> &'static Arc<Mapper> {
        static GLOBAL: OnceLock<Arc<Mapper>> = OnceLock::new();
        GLOBAL.get_or_init(|| Arc::new(Mapper::new()))
    }

    #[inline]
    pub fn tag_key(&self) -> &str {
        &self.tag_key
    }

    #[inline]
    pub fn name_format(&self) -> NameFormat {
        self.name_format
    }

    /// Returns the model of `T`, or `None` if `T` is not a structure.
    #[inline]
    pub fn model_of<T: Typed>(&self) -> Option<Arc<StructModel>> {
        self.model(T::type_info())
    }

    /// Returns the model of the structure described by `info`.
    ///
    /// Optional layers are stripped first, so `Option<T>` shares the model
    /// of `T`.
    pub fn model(&self, info: &'static TypeInfo) -> Option<Arc<StructModel>> {
        let info = info.deref_optional();
        let type_id = info.type_id();

        let cached = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .cloned();
        if cached.is_some() {
            return cached;
        }

        let model = Arc::new(build_model(info, &self.tag_key, self.name_format)?);
        log::debug!(
            "built model of `{}` with {} fields",
            info.type_path(),
            model.fields.len(),
        );

        // Another thread may have won the race; keep the first model.
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        Some(cache.get_or_insert(type_id, || model).clone())
    }

    /// Number of cached models.
    pub fn cached_len(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for Mapper {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Mapper {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Mapper")
            .field("tag_key", &self.tag_key)
            .field("name_format", &self.name_format)
            .field("cached", &self.cached_len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::Mapper;
    use crate::derive::Reflect;
    use crate::tag::NameFormat;

    #[derive(Reflect, Default)]
    struct Ticket {
        #[reflect(tag = "ticket_id", tag(json = "ticketId"))]
        pub id: u64,
        pub opened_at: i64,
    }

    #[test]
    fn models_are_cached_per_type() {
        let mapper = Mapper::new();
        let first = mapper.model_of::<Ticket>().unwrap();
        let again = mapper.model_of::<Ticket>().unwrap();
        let through_option = mapper.model_of::<Option<Ticket>>().unwrap();
        assert!(Arc::ptr_eq(&first, &again));
        assert!(Arc::ptr_eq(&first, &through_option));
        assert_eq!(mapper.cached_len(), 1);
    }

    #[test]
    fn tag_key_selects_the_namespace() {
        let names = |mapper: Mapper| -> Vec<String> {
            let model = mapper.model_of::<Ticket>().unwrap();
            model.properties().map(|f| f.name().to_owned()).collect()
        };
        assert_eq!(names(Mapper::new()), ["ticket_id", "opened_at"]);
        assert_eq!(
            names(Mapper::new().with_tag_key("json").with_name_format(NameFormat::Camel)),
            ["ticketId", "openedAt"]
        );
        assert_eq!(
            names(Mapper::new().with_tag_key("xml").with_name_format(NameFormat::ScreamingSnake)),
            ["ID", "OPENED_AT"]
        );
    }
}
