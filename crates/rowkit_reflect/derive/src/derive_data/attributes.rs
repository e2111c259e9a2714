//! `#[reflect(...)]` attributes on types and fields.

use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::{Attribute, LitStr};

use crate::REFLECT_ATTRIBUTE_NAME;

/// The namespace of `#[reflect(tag = "...")]`.
const DEFAULT_TAG_KEY: &str = "sql";

fn reflect_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident(REFLECT_ATTRIBUTE_NAME))
}

// -----------------------------------------------------------------------------
// TypeAttributes

/// Type level attributes.
///
/// Capability flags keep the span of their attribute so that missing trait
/// impls are reported there.
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    pub opaque: bool,
    pub marshal: Option<Span>,
    pub unmarshal: Option<Span>,
    pub serialize: Option<Span>,
    pub deserialize: Option<Span>,
    pub text: Option<Span>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();
        for attr in reflect_attrs(attrs) {
            attr.parse_nested_meta(|meta| parsed.parse_meta(&meta))?;
        }
        Ok(parsed)
    }

    fn parse_meta(&mut self, meta: &ParseNestedMeta) -> syn::Result<()> {
        let span = meta.path.get_ident().map(syn::Ident::span);
        if meta.path.is_ident("opaque") {
            self.opaque = true;
        } else if meta.path.is_ident("marshal") {
            self.marshal = span;
        } else if meta.path.is_ident("unmarshal") {
            self.unmarshal = span;
        } else if meta.path.is_ident("serialize") {
            self.serialize = span;
        } else if meta.path.is_ident("deserialize") {
            self.deserialize = span;
        } else if meta.path.is_ident("serde") {
            self.serialize = span;
            self.deserialize = span;
        } else if meta.path.is_ident("text") {
            self.text = span;
        } else {
            return Err(meta.error(
                "unsupported type attribute, expected one of \
                 `opaque`, `marshal`, `unmarshal`, `serialize`, `deserialize`, `serde`, `text`",
            ));
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// Field level attributes.
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    pub embed: bool,
    pub ignore: bool,
    /// `(namespace, annotation)` pairs, in written order.
    pub tags: Vec<(String, LitStr)>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();
        for attr in reflect_attrs(attrs) {
            attr.parse_nested_meta(|meta| parsed.parse_meta(&meta))?;
        }
        Ok(parsed)
    }

    fn parse_meta(&mut self, meta: &ParseNestedMeta) -> syn::Result<()> {
        if meta.path.is_ident("embed") {
            self.embed = true;
        } else if meta.path.is_ident("ignore") {
            self.ignore = true;
        } else if meta.path.is_ident("tag") {
            if meta.input.peek(syn::Token![=]) {
                let value: LitStr = meta.value()?.parse()?;
                self.push_tag(meta, DEFAULT_TAG_KEY.to_owned(), value)?;
            } else {
                meta.parse_nested_meta(|inner| {
                    let Some(key) = inner.path.get_ident() else {
                        return Err(inner.error("expected a namespace, like `json = \"...\"`"));
                    };
                    let value: LitStr = inner.value()?.parse()?;
                    self.push_tag(&inner, key.to_string(), value)
                })?;
            }
        } else {
            return Err(meta.error(
                "unsupported field attribute, expected one of `tag`, `embed`, `ignore`",
            ));
        }
        Ok(())
    }

    fn push_tag(&mut self, meta: &ParseNestedMeta, key: String, value: LitStr) -> syn::Result<()> {
        if self.tags.iter().any(|(k, _)| *k == key) {
            return Err(meta.error(format!("duplicate tag for namespace `{key}`")));
        }
        self.tags.push((key, value));
        Ok(())
    }
}
