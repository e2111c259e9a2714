use crate::info::{Type, TypeInfo, Typed};

// -----------------------------------------------------------------------------
// ListInfo

/// Type information of a growable sequence, such as `Vec<T>`.
#[derive(Debug)]
pub struct ListInfo {
    ty: Type,
    item: Type,
    item_info: fn() -> &'static TypeInfo,
}

impl ListInfo {
    pub fn new<TList: Typed, TItem: Typed>() -> Self {
        Self {
            ty: Type::of::<TList>(),
            item: Type::of::<TItem>(),
            item_info: TItem::type_info,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub const fn item_ty(&self) -> &Type {
        &self.item
    }

    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item_info)()
    }
}

// -----------------------------------------------------------------------------
// MapInfo

/// Type information of a map with string keys.
#[derive(Debug)]
pub struct MapInfo {
    ty: Type,
    value: Type,
    value_info: fn() -> &'static TypeInfo,
}

impl MapInfo {
    pub fn new<TMap: Typed, TValue: Typed>() -> Self {
        Self {
            ty: Type::of::<TMap>(),
            value: Type::of::<TValue>(),
            value_info: TValue::type_info,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub const fn value_ty(&self) -> &Type {
        &self.value
    }

    #[inline]
    pub fn value_info(&self) -> &'static TypeInfo {
        (self.value_info)()
    }
}

// -----------------------------------------------------------------------------
// OptionalInfo

/// Type information of a nullable value, such as `Option<T>`.
#[derive(Debug)]
pub struct OptionalInfo {
    ty: Type,
    inner: Type,
    inner_info: fn() -> &'static TypeInfo,
}

impl OptionalInfo {
    pub fn new<TOption: Typed, TInner: Typed>() -> Self {
        Self {
            ty: Type::of::<TOption>(),
            inner: Type::of::<TInner>(),
            inner_info: TInner::type_info,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub const fn inner_ty(&self) -> &Type {
        &self.inner
    }

    #[inline]
    pub fn inner_info(&self) -> &'static TypeInfo {
        (self.inner_info)()
    }
}
