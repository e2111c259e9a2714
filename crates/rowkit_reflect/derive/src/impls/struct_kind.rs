use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::{ReflectStruct, StructField};

/// Implements `Typed`, `Reflect` and `Struct` for a structure with named
/// fields.
pub(crate) fn impl_struct(info: &ReflectStruct) -> TokenStream {
    let meta = info.meta();
    let rowkit_reflect_path = meta.rowkit_reflect_path();
    let reflect_ = crate::path::reflect_(rowkit_reflect_path);
    let struct_ = crate::path::struct_(rowkit_reflect_path);
    let type_info_ = crate::path::type_info_(rowkit_reflect_path);
    let struct_info_ = crate::path::struct_info_(rowkit_reflect_path);
    let named_field_ = crate::path::named_field_(rowkit_reflect_path);

    let field_infos = info
        .fields()
        .iter()
        .map(|field| named_field_tokens(&named_field_, field));
    let capabilities = meta.capabilities_expression();

    let typed_impl = super::impl_trait_typed(
        meta,
        quote! {
            #type_info_::Struct(
                #struct_info_::new::<Self>(&[
                    #(#field_infos,)*
                ])
                .with_capabilities(#capabilities)
            )
        },
    );
    let reflect_impl = super::impl_trait_reflect(meta, quote!(Struct));

    let indices: Vec<usize> = info.active_fields().map(|field| field.index).collect();
    let members: Vec<&syn::Ident> = info.active_fields().map(|field| field.ident).collect();
    let field_len = info.fields().len();

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics();

    quote! {
        #typed_impl

        #reflect_impl

        impl #impl_generics #struct_ for #ident #ty_generics #where_clause {
            fn field_at(&self, index: usize) -> ::core::option::Option<&dyn #reflect_> {
                match index {
                    #(#indices => ::core::option::Option::Some(&self.#members as &dyn #reflect_),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_at_mut(&mut self, index: usize) -> ::core::option::Option<&mut dyn #reflect_> {
                match index {
                    #(#indices => ::core::option::Option::Some(&mut self.#members as &mut dyn #reflect_),)*
                    _ => ::core::option::Option::None,
                }
            }

            #[inline]
            fn field_len(&self) -> usize {
                #field_len
            }
        }
    }
}

/// Generates the `NamedField` of one field, like:
///
/// ```ignore
/// _path_::NamedField::new::<u64>("id", 0)
///     .with_embedded(false)
///     .with_tags(&[("sql", "id,primary_key")])
/// ```
fn named_field_tokens(named_field_: &TokenStream, field: &StructField) -> TokenStream {
    let name = field.name();
    let index = field.index;

    if !field.is_active() {
        return quote! { #named_field_::hidden(#name, #index) };
    }

    let ty = field.ty;
    let exported = field.exported;
    let embedded = field.attrs.embed;
    let tags = field.attrs.tags.iter().map(|(key, value)| quote!((#key, #value)));

    quote! {
        #named_field_::new::<#ty>(#name, #index)
            .with_exported(#exported)
            .with_embedded(#embedded)
            .with_tags(&[#(#tags),*])
    }
}
