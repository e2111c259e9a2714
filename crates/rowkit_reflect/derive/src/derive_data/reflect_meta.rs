use proc_macro2::TokenStream;
use quote::quote;
use syn::{Generics, Ident, Path, WhereClause};

use super::TypeAttributes;

/// What every generator needs: the type, its attributes and the crate path.
pub(crate) struct ReflectMeta<'a> {
    rowkit_reflect_path: Path,
    attrs: TypeAttributes,
    ident: &'a Ident,
    generics: &'a Generics,
}

impl<'a> ReflectMeta<'a> {
    pub fn new(attrs: TypeAttributes, ident: &'a Ident, generics: &'a Generics) -> Self {
        Self {
            rowkit_reflect_path: crate::path::rowkit_reflect(),
            attrs,
            ident,
            generics,
        }
    }

    #[inline]
    pub fn rowkit_reflect_path(&self) -> &Path {
        &self.rowkit_reflect_path
    }

    #[inline]
    pub fn ident(&self) -> &'a Ident {
        self.ident
    }

    /// Returns `true` if the type has type parameters, which requires a
    /// type info cell keyed by the concrete type.
    pub fn impl_with_generic(&self) -> bool {
        self.generics.type_params().next().is_some()
    }

    /// Splits the generics, bounding each type parameter by `Reflect + Typed`.
    pub fn split_generics(&self) -> (TokenStream, TokenStream, WhereClause) {
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();

        let reflect_ = crate::path::reflect_(&self.rowkit_reflect_path);
        let typed_ = crate::path::typed_(&self.rowkit_reflect_path);

        let mut where_clause = where_clause.cloned().unwrap_or_else(|| WhereClause {
            where_token: Default::default(),
            predicates: Default::default(),
        });
        for param in self.generics.type_params() {
            let ident = &param.ident;
            where_clause
                .predicates
                .push(syn::parse_quote!(#ident: #reflect_ + #typed_));
        }

        (quote!(#impl_generics), quote!(#ty_generics), where_clause)
    }

    /// Generates the capability expression, like:
    ///
    /// ```ignore
    /// _path_::Capabilities::new()
    ///     .with_marshal(<_path_::TraitMarshal as _path_::FromType<Self>>::from_type())
    /// ```
    pub fn capabilities_expression(&self) -> TokenStream {
        let path = &self.rowkit_reflect_path;
        let capabilities_ = crate::path::capabilities_(path);
        let from_type_ = crate::path::from_type_(path);

        let attrs = &self.attrs;
        let handles = [
            (attrs.marshal, quote!(with_marshal), crate::path::trait_marshal_(path)),
            (attrs.unmarshal, quote!(with_unmarshal), crate::path::trait_unmarshal_(path)),
            (attrs.serialize, quote!(with_serialize), crate::path::trait_serialize_(path)),
            (attrs.deserialize, quote!(with_deserialize), crate::path::trait_deserialize_(path)),
            (attrs.text, quote!(with_text), crate::path::trait_text_(path)),
        ];
        let with_handles = handles.into_iter().filter_map(|(span, with, handle)| {
            let span = span?;
            Some(quote::quote_spanned! { span =>
                .#with(<#handle as #from_type_<Self>>::from_type())
            })
        });

        quote! {
            #capabilities_::new()
                #(#with_handles)*
        }
    }
}
