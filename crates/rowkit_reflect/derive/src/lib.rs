//! See [`Reflect`](derive_reflect).
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Reflection Derivation
///
/// `#[derive(Reflect)]` implements `Typed`, `Reflect` and, for structures
/// with named fields, `Struct`.
///
/// Tuple structures and enums must be marked `opaque`. Unit structures are
/// always opaque.
///
/// ## Field Attributes
///
/// - `tag = "..."`: the annotation in the default `sql` namespace.
/// - `tag(json = "...", sql = "...")`: annotations per namespace.
/// - `embed`: the field is an embedded structure whose fields are promoted.
/// - `ignore`: the field is listed but carries no type information.
///
/// Private fields that are not embedded are listed the same way as ignored
/// ones.
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// struct User {
///     #[reflect(tag = "id,primary_key", tag(json = "userId"))]
///     pub id: u64,
///     #[reflect(embed)]
///     pub audit: Audit,
///     #[reflect(ignore)]
///     pub cache: Scratch,
/// }
/// ```
///
/// ## Type Attributes
///
/// - `opaque`: the type is a leaf, its fields are not inspected.
/// - `marshal`, `unmarshal`: the type implements `Marshal` / `Unmarshal`.
/// - `serialize`, `deserialize`: the type implements `serde::Serialize` /
///   `serde::Deserialize`; `serde` enables both.
/// - `text`: the type implements `Display`, used as its encoded form.
///
/// ```rust, ignore
/// #[derive(Reflect, serde::Serialize, serde::Deserialize)]
/// #[reflect(opaque, serde)]
/// struct Point(i32, i32);
/// ```
///
/// ## Generics
///
/// Every type parameter is bounded by `Reflect + Typed`.
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    let reflect_derive = match derive_data::ReflectDerive::from_input(&ast) {
        Ok(val) => val,
        Err(err) => return err.into_compile_error().into(),
    };

    let reflect_impls = match &reflect_derive {
        derive_data::ReflectDerive::Struct(info) => impls::impl_struct(info),
        derive_data::ReflectDerive::Opaque(meta) => impls::impl_opaque(meta),
    };

    TokenStream::from(quote! {
        const _: () = {
            #reflect_impls
        };
    })
}
