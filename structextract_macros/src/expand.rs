//! Code generation for the `Extractable` derive.

use proc_macro2::TokenStream;
use quote::quote;

use crate::parse::{Record, RecordField};
use crate::tags::ParsedTag;

pub(crate) fn expand(record: &Record<'_>) -> TokenStream {
    let ident = record.ident;
    let specs = record.fields.iter().map(field_spec);

    quote! {
        #[automatically_derived]
        impl ::structextract::Extractable for #ident {
            fn fields() -> &'static [::structextract::FieldSpec<Self>] {
                const FIELDS: &[::structextract::FieldSpec<#ident>] = &[ #( #specs ),* ];
                FIELDS
            }
        }
    }
}

fn field_spec(field: &RecordField<'_>) -> TokenStream {
    let ident = field.ident;
    let name = ident.to_string();
    let tags = field.tags.iter().map(tag_spec);
    let kind = if field.embedded {
        quote! {
            ::structextract::FieldKind::Embedded {
                resolve: |record, walk, out| {
                    ::structextract::resolve_fields(&record.#ident, walk, out)
                },
                overlay: |original, decoded, touched| {
                    ::structextract::overlay_untouched(
                        &original.#ident,
                        &mut decoded.#ident,
                        touched,
                    );
                },
            }
        }
    } else {
        quote! {
            ::structextract::FieldKind::Leaf {
                get: |record| ::structextract::field_value(&record.#ident),
                copy: |original, decoded| {
                    decoded.#ident = ::core::clone::Clone::clone(&original.#ident);
                },
            }
        }
    };

    quote! {
        ::structextract::FieldSpec {
            name: #name,
            tags: &[ #( #tags ),* ],
            kind: #kind,
        }
    }
}

fn tag_spec(tag: &ParsedTag) -> TokenStream {
    let key = &tag.key;
    let value = &tag.value;
    let modifiers = &tag.modifiers;
    quote! {
        ::structextract::Tag {
            key: #key,
            value: #value,
            modifiers: &[ #( #modifiers ),* ],
        }
    }
}
