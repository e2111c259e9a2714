//! Code generators.

// -----------------------------------------------------------------------------
// Modules

mod common;
mod opaque_kind;
mod struct_kind;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use opaque_kind::impl_opaque;
pub(crate) use struct_kind::impl_struct;

use common::{impl_trait_reflect, impl_trait_typed};
