use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectMeta;

/// Implements `Typed` and `Reflect` for a leaf type.
pub(crate) fn impl_opaque(meta: &ReflectMeta) -> TokenStream {
    let rowkit_reflect_path = meta.rowkit_reflect_path();
    let type_info_ = crate::path::type_info_(rowkit_reflect_path);
    let opaque_info_ = crate::path::opaque_info_(rowkit_reflect_path);
    let capabilities = meta.capabilities_expression();

    let typed_impl = super::impl_trait_typed(
        meta,
        quote! {
            #type_info_::Opaque(
                #opaque_info_::new::<Self>().with_capabilities(#capabilities)
            )
        },
    );
    let reflect_impl = super::impl_trait_reflect(meta, quote!(Opaque));

    quote! {
        #typed_impl

        #reflect_impl
    }
}
