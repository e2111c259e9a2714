use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, Ident, Type, Visibility};

use super::{FieldAttributes, ReflectMeta, TypeAttributes};

/// The shapes `#[derive(Reflect)]` supports.
pub(crate) enum ReflectDerive<'a> {
    Struct(ReflectStruct<'a>),
    Opaque(ReflectMeta<'a>),
}

/// A structure with named fields.
pub(crate) struct ReflectStruct<'a> {
    meta: ReflectMeta<'a>,
    fields: Vec<StructField<'a>>,
}

/// A declared field of a [`ReflectStruct`].
pub(crate) struct StructField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    /// Declaration index, counting every field.
    pub index: usize,
    pub attrs: FieldAttributes,
    pub exported: bool,
}

impl StructField<'_> {
    /// Returns `true` if the field carries type information and can be
    /// reached through `Struct::field_at`.
    #[inline]
    pub fn is_active(&self) -> bool {
        !self.attrs.ignore && (self.exported || self.attrs.embed)
    }

    /// The field name, without a raw identifier prefix.
    pub fn name(&self) -> String {
        let name = self.ident.to_string();
        match name.strip_prefix("r#") {
            Some(stripped) => stripped.to_owned(),
            None => name,
        }
    }
}

impl<'a> ReflectDerive<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let attrs = TypeAttributes::parse_attrs(&input.attrs)?;
        let opaque = attrs.opaque;
        let meta = ReflectMeta::new(attrs, &input.ident, &input.generics);

        if opaque {
            return Ok(Self::Opaque(meta));
        }

        match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => {
                    let fields = named
                        .named
                        .iter()
                        .enumerate()
                        .map(|(index, field)| {
                            Ok(StructField {
                                // Named fields always have an ident.
                                ident: field.ident.as_ref().ok_or_else(|| {
                                    syn::Error::new(field.span(), "expected a named field")
                                })?,
                                ty: &field.ty,
                                index,
                                attrs: FieldAttributes::parse_attrs(&field.attrs)?,
                                exported: !matches!(field.vis, Visibility::Inherited),
                            })
                        })
                        .collect::<syn::Result<Vec<_>>>()?;
                    Ok(Self::Struct(ReflectStruct { meta, fields }))
                }
                Fields::Unit => Ok(Self::Opaque(meta)),
                Fields::Unnamed(_) => Err(syn::Error::new(
                    input.ident.span(),
                    "tuple structures must be marked `#[reflect(opaque)]`",
                )),
            },
            Data::Enum(_) | Data::Union(_) => Err(syn::Error::new(
                input.ident.span(),
                "enums and unions must be marked `#[reflect(opaque)]`",
            )),
        }
    }
}

impl<'a> ReflectStruct<'a> {
    #[inline]
    pub fn meta(&self) -> &ReflectMeta<'a> {
        &self.meta
    }

    #[inline]
    pub fn fields(&self) -> &[StructField<'a>] {
        &self.fields
    }

    /// Fields reachable through `Struct::field_at`.
    pub fn active_fields(&self) -> impl Iterator<Item = &StructField<'a>> {
        self.fields.iter().filter(|field| field.is_active())
    }
}
