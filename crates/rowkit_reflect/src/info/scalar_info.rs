use crate::info::{Capabilities, ReflectKind, Type, Typed};

// -----------------------------------------------------------------------------
// ScalarInfo

/// Type information of a primitive value: booleans, numbers and strings.
#[derive(Debug)]
pub struct ScalarInfo {
    ty: Type,
    kind: ReflectKind,
}

impl ScalarInfo {
    /// `kind` must be one of the scalar kinds, see [`ReflectKind::is_scalar`].
    pub fn new<T: Typed>(kind: ReflectKind) -> Self {
        debug_assert!(kind.is_scalar(), "`{kind}` is not a scalar kind");
        Self {
            ty: Type::of::<T>(),
            kind,
        }
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub const fn kind(&self) -> ReflectKind {
        self.kind
    }
}

// -----------------------------------------------------------------------------
// OpaqueInfo

/// Type information of a value that is only handled as a whole, through its
/// capabilities or an exact-type codec.
#[derive(Debug)]
pub struct OpaqueInfo {
    ty: Type,
    capabilities: Capabilities,
}

impl OpaqueInfo {
    pub fn new<T: Typed>() -> Self {
        Self {
            ty: Type::of::<T>(),
            capabilities: Capabilities::new(),
        }
    }

    #[inline]
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub const fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }
}
