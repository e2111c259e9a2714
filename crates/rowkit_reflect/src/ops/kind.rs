use crate::Reflect;
use crate::info::ReflectKind;
use crate::ops::{List, Map, Optional, Scalar, Struct};

/// An immutable view of a value through its kind trait.
pub enum ReflectRef<'a> {
    Struct(&'a dyn Struct),
    List(&'a dyn List),
    Map(&'a dyn Map),
    Optional(&'a dyn Optional),
    Scalar(&'a dyn Scalar),
    Opaque(&'a dyn Reflect),
}

/// A mutable view of a value through its kind trait.
pub enum ReflectMut<'a> {
    Struct(&'a mut dyn Struct),
    List(&'a mut dyn List),
    Map(&'a mut dyn Map),
    Optional(&'a mut dyn Optional),
    Scalar(&'a mut dyn Scalar),
    Opaque(&'a mut dyn Reflect),
}

impl ReflectRef<'_> {
    /// Returns the kind of the viewed value.
    ///
    /// Scalars report their precise kind, e.g. [`ReflectKind::Int`].
    pub fn kind(&self) -> ReflectKind {
        match self {
            Self::Struct(_) => ReflectKind::Struct,
            Self::List(_) => ReflectKind::List,
            Self::Map(_) => ReflectKind::Map,
            Self::Optional(_) => ReflectKind::Optional,
            Self::Scalar(value) => value.reflect_kind(),
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }
}

impl ReflectMut<'_> {
    pub fn kind(&self) -> ReflectKind {
        match self {
            Self::Struct(_) => ReflectKind::Struct,
            Self::List(_) => ReflectKind::List,
            Self::Map(_) => ReflectKind::Map,
            Self::Optional(_) => ReflectKind::Optional,
            Self::Scalar(value) => value.reflect_kind(),
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }
}
