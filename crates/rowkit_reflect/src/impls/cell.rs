//! Static storage of [`TypeInfo`].
//!
//! A `static` declared inside a generic function is shared by every
//! instantiation, so generic types keep one entry per [`TypeId`] in a
//! [`GenericTypeInfoCell`]. Non generic types use a plain [`OnceLock`].

use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use rowkit_utils::TypeIdMap;

use crate::info::TypeInfo;

/// Storage of the [`TypeInfo`] of one non generic type.
///
/// ```
/// use rowkit_reflect::impls::NonGenericTypeInfoCell;
/// use rowkit_reflect::info::{OpaqueInfo, TypeInfo, Typed};
///
/// struct Handle;
///
/// impl Typed for Handle {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
///     }
/// }
///
/// assert!(Handle::type_info().type_is::<Handle>());
/// ```
pub struct NonGenericTypeInfoCell(OnceLock<TypeInfo>);

impl NonGenericTypeInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> TypeInfo) -> &TypeInfo {
        self.0.get_or_init(f)
    }
}

/// Storage of the [`TypeInfo`] of every instantiation of a generic type.
///
/// Entries are leaked and live for the rest of the process.
pub struct GenericTypeInfoCell(RwLock<TypeIdMap<&'static TypeInfo>>);

impl GenericTypeInfoCell {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the info stored for `G`, building it with `f` on first use.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> TypeInfo) -> &TypeInfo {
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    #[inline(never)]
    fn get_or_insert_by_type_id(&self, type_id: TypeId, f: impl FnOnce() -> TypeInfo) -> &TypeInfo {
        let found = self
            .0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied();
        match found {
            Some(info) => info,
            // `f` runs outside the lock: building an info may need other cells.
            None => {
                let info = f();
                *self.0
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .get_or_insert(type_id, || Box::leak(Box::new(info)))
            }
        }
    }
}
