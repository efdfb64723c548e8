//! Input validation and `#[extract(...)]` attribute parsing for the
//! `Extractable` derive.

use syn::{Data, DeriveInput, Fields, Ident, LitStr};

use crate::tags::{ParsedTag, parse_tag_string};

/// A validated derive input: a non-generic struct with named fields.
pub(crate) struct Record<'a> {
    pub ident: &'a Ident,
    pub fields: Vec<RecordField<'a>>,
}

/// One declared field with its parsed annotations.
pub(crate) struct RecordField<'a> {
    pub ident: &'a Ident,
    pub embedded: bool,
    pub tags: Vec<ParsedTag>,
}

pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<Record<'_>> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Extractable can only be derived for structs",
        ));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Extractable requires named fields",
        ));
    };
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Extractable does not support generic records",
        ));
    }

    let fields = named
        .named
        .iter()
        .map(parse_field)
        .collect::<syn::Result<Vec<_>>>()?;

    Ok(Record {
        ident: &input.ident,
        fields,
    })
}

fn parse_field(field: &syn::Field) -> syn::Result<RecordField<'_>> {
    let ident = field.ident.as_ref().expect("named field");
    let mut embedded = false;
    let mut tags = Vec::new();

    for attr in &field.attrs {
        if !attr.path().is_ident("extract") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("embedded") {
                embedded = true;
                Ok(())
            } else if meta.path.is_ident("tags") {
                let lit: LitStr = meta.value()?.parse()?;
                tags = parse_tag_string(&lit)?;
                Ok(())
            } else {
                Err(meta.error("expected `tags = \"...\"` or `embedded`"))
            }
        })?;
    }

    Ok(RecordField {
        ident,
        embedded,
        tags,
    })
}
