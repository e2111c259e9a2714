use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectMeta;

/// Generate implementation code for `Typed`.
///
/// `type_info_tokens` builds the `TypeInfo`, it is evaluated once per
/// concrete type.
pub(crate) fn impl_trait_typed(meta: &ReflectMeta, type_info_tokens: TokenStream) -> TokenStream {
    let rowkit_reflect_path = meta.rowkit_reflect_path();
    let typed_ = crate::path::typed_(rowkit_reflect_path);
    let type_info_ = crate::path::type_info_(rowkit_reflect_path);

    let inner_cell_tokens = if meta.impl_with_generic() {
        let info_cell = crate::path::generic_type_info_cell_(rowkit_reflect_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_insert::<Self>(|| {
                #type_info_tokens
            })
        }
    } else {
        let info_cell = crate::path::non_generic_type_info_cell_(rowkit_reflect_path);
        quote! {
            static CELL: #info_cell = #info_cell::new();
            CELL.get_or_init(|| {
                #type_info_tokens
            })
        }
    };

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics();

    quote! {
        impl #impl_generics #typed_ for #ident #ty_generics #where_clause {
            fn type_info() -> &'static #type_info_ {
                #inner_cell_tokens
            }
        }
    }
}

/// Generate implementation code for `Reflect`, `variant` being the
/// `ReflectRef`/`ReflectMut` variant the value is exposed as.
pub(crate) fn impl_trait_reflect(meta: &ReflectMeta, variant: TokenStream) -> TokenStream {
    let rowkit_reflect_path = meta.rowkit_reflect_path();
    let reflect_ = crate::path::reflect_(rowkit_reflect_path);
    let reflect_kind_ = crate::path::reflect_kind_(rowkit_reflect_path);
    let reflect_ref_ = crate::path::reflect_ref_(rowkit_reflect_path);
    let reflect_mut_ = crate::path::reflect_mut_(rowkit_reflect_path);

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics();

    quote! {
        impl #impl_generics #reflect_ for #ident #ty_generics #where_clause {
            #[inline]
            fn reflect_kind(&self) -> #reflect_kind_ {
                #reflect_kind_::#variant
            }

            #[inline]
            fn reflect_ref(&self) -> #reflect_ref_<'_> {
                #reflect_ref_::#variant(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> #reflect_mut_<'_> {
                #reflect_mut_::#variant(self)
            }

            #[inline]
            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }

            #[inline]
            fn as_any_mut(&mut self) -> &mut dyn ::core::any::Any {
                self
            }
        }
    }
}
