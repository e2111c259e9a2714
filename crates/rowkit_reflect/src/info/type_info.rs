use core::any::TypeId;
use core::fmt;

use crate::info::{Capabilities, ListInfo, MapInfo, OpaqueInfo};
use crate::info::{OptionalInfo, ScalarInfo, StructInfo, Type};

// -----------------------------------------------------------------------------
// ReflectKind

/// The value category of a reflected type.
///
/// Category codecs in a [`CodecRegistry`](crate::codec::CodecRegistry) are
/// keyed by this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflectKind {
    Bool,
    Int,
    Uint,
    Float,
    String,
    List,
    Map,
    Struct,
    Optional,
    Opaque,
}

impl ReflectKind {
    /// Returns `true` for the kinds backed by [`Scalar`](crate::ops::Scalar).
    pub const fn is_scalar(self) -> bool {
        matches!(
            self,
            Self::Bool | Self::Int | Self::Uint | Self::Float | Self::String
        )
    }
}

impl ReflectKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "Bool",
            Self::Int => "Int",
            Self::Uint => "Uint",
            Self::Float => "Float",
            Self::String => "String",
            Self::List => "List",
            Self::Map => "Map",
            Self::Struct => "Struct",
            Self::Optional => "Optional",
            Self::Opaque => "Opaque",
        }
    }
}

impl fmt::Display for ReflectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Static information about a reflected type.
///
/// Obtained through [`Typed::type_info`](crate::info::Typed::type_info) or,
/// from a value, [`DynamicTyped::reflect_type_info`](crate::info::DynamicTyped::reflect_type_info).
///
/// ```
/// use rowkit_reflect::info::{ReflectKind, Typed};
///
/// let info = <Option<i32>>::type_info();
/// assert_eq!(info.kind(), ReflectKind::Optional);
/// assert!(info.is_nullable());
/// assert_eq!(info.deref_optional().kind(), ReflectKind::Int);
/// ```
#[derive(Debug)]
pub enum TypeInfo {
    Struct(StructInfo),
    List(ListInfo),
    Map(MapInfo),
    Optional(OptionalInfo),
    Scalar(ScalarInfo),
    Opaque(OpaqueInfo),
}

macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $info:ident) => {
        #[doc = concat!("Returns the [`", stringify!($info), "`] if this is a `", stringify!($kind), "`.")]
        #[inline]
        pub const fn $name(&self) -> Option<&$info> {
            match self {
                Self::$kind(info) => Some(info),
                _ => None,
            }
        }
    };
}

impl TypeInfo {
    impl_cast_method!(as_struct: Struct => StructInfo);
    impl_cast_method!(as_list: List => ListInfo);
    impl_cast_method!(as_map: Map => MapInfo);
    impl_cast_method!(as_optional: Optional => OptionalInfo);
    impl_cast_method!(as_scalar: Scalar => ScalarInfo);
    impl_cast_method!(as_opaque: Opaque => OpaqueInfo);

    pub const fn ty(&self) -> &Type {
        match self {
            Self::Struct(info) => info.ty(),
            Self::List(info) => info.ty(),
            Self::Map(info) => info.ty(),
            Self::Optional(info) => info.ty(),
            Self::Scalar(info) => info.ty(),
            Self::Opaque(info) => info.ty(),
        }
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.ty().id()
    }

    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.ty().path()
    }

    #[inline]
    pub fn type_is<T: 'static>(&self) -> bool {
        self.ty().is::<T>()
    }

    pub const fn kind(&self) -> ReflectKind {
        match self {
            Self::Struct(_) => ReflectKind::Struct,
            Self::List(_) => ReflectKind::List,
            Self::Map(_) => ReflectKind::Map,
            Self::Optional(_) => ReflectKind::Optional,
            Self::Scalar(info) => info.kind(),
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }

    /// Serialization protocols this type was derived with.
    ///
    /// Containers and scalars never carry any.
    pub fn capabilities(&self) -> &Capabilities {
        match self {
            Self::Struct(info) => info.capabilities(),
            Self::Opaque(info) => info.capabilities(),
            _ => Capabilities::NONE,
        }
    }

    /// Returns `true` if a value of this type may be null.
    #[inline]
    pub const fn is_nullable(&self) -> bool {
        matches!(self, Self::Optional(_))
    }

    /// Strips every `Optional` layer.
    pub fn deref_optional(&'static self) -> &'static TypeInfo {
        let mut info = self;
        while let Self::Optional(optional) = info {
            info = optional.inner_info();
        }
        info
    }
}
