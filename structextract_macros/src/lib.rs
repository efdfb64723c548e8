//! Procedural macros for `structextract`.
//!
//! The [`Extractable`] derive builds the static field descriptor table the
//! runtime crate traverses: one entry per declared field, in declaration
//! order, carrying the tag annotations parsed from the field's
//! `#[extract(tags = "...")]` string and the accessor thunks used by the
//! resolver and the merge engine. Embedded records are marked with
//! `#[extract(embedded)]` and recurse through their own generated tables.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod expand;
mod parse;
mod tags;

/// Derive macro for `structextract::Extractable`.
///
/// ```ignore
/// #[derive(Extractable, serde::Serialize, serde::Deserialize, Default)]
/// struct Business {
///     #[extract(tags = r#"json:"name" sql:"business_name""#)]
///     name: String,
///     #[extract(embedded)]
///     audit: Audit,
/// }
/// ```
///
/// Tag strings follow the Go struct-tag grammar: space-separated
/// `key:"value"` pairs, where the quoted value may carry comma-separated
/// modifiers (`json:"name,omitempty"`). Malformed strings are rejected at
/// compile time.
#[proc_macro_derive(Extractable, attributes(extract))]
pub fn derive_extractable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match parse::parse_input(&input) {
        Ok(record) => expand::expand(&record).into(),
        Err(err) => err.to_compile_error().into(),
    }
}
