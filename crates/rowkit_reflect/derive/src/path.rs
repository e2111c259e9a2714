//! Paths of the items the generated code refers to, so that reorganizing
//! `rowkit_reflect` only touches this file.

use proc_macro2::TokenStream;
use quote::quote;

/// Get the access path to the `rowkit_reflect` crate.
///
/// Crates depending on `rowkit_reflect` get `::rowkit_reflect`, crates
/// depending on the `rowkit` umbrella get `::rowkit::reflect`.
pub(crate) fn rowkit_reflect() -> syn::Path {
    rowkit_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("rowkit_reflect"))
}

macro_rules! define_paths {
    ($($name:ident => { $($segment:tt)* })*) => {$(
        #[inline(always)]
        pub(crate) fn $name(rowkit_reflect_path: &syn::Path) -> TokenStream {
            quote! { #rowkit_reflect_path :: $($segment)* }
        }
    )*};
}

define_paths! {
    reflect_ => { Reflect }
    typed_ => { info::Typed }
    type_info_ => { info::TypeInfo }
    struct_info_ => { info::StructInfo }
    opaque_info_ => { info::OpaqueInfo }
    named_field_ => { info::NamedField }
    reflect_kind_ => { info::ReflectKind }
    capabilities_ => { info::Capabilities }
    from_type_ => { info::FromType }
    trait_marshal_ => { info::TraitMarshal }
    trait_unmarshal_ => { info::TraitUnmarshal }
    trait_serialize_ => { info::TraitSerialize }
    trait_deserialize_ => { info::TraitDeserialize }
    trait_text_ => { info::TraitText }
    reflect_ref_ => { ops::ReflectRef }
    reflect_mut_ => { ops::ReflectMut }
    struct_ => { ops::Struct }
    non_generic_type_info_cell_ => { impls::NonGenericTypeInfoCell }
    generic_type_info_cell_ => { impls::GenericTypeInfoCell }
}
