//! Struct field introspection, tag resolution, and partial map merging.
//!
//! This crate defines the [`Extractable`] registration trait and the
//! [`Extractor`] surface built on top of it. A record type derives
//! [`Extractable`] to expose a static field descriptor table; the extractor
//! then enumerates field names, tag values, and current values in
//! declaration order, and merges sparse keyed updates into a new instance.
//! The derive macro lives in the companion `structextract_macros` crate.
//!
//! ```
//! use serde::{Deserialize, Serialize};
//! use structextract::{Extractable, Extractor};
//!
//! #[derive(Extractable, Serialize, Deserialize, Default)]
//! struct Business {
//!     #[extract(tags = r#"json:"name" sql:"business_name""#)]
//!     name: String,
//!     #[extract(tags = r#"json:"city""#)]
//!     city: String,
//! }
//!
//! let record = Business {
//!     name: "acme".into(),
//!     city: "berlin".into(),
//! };
//! let extractor = Extractor::new(&record);
//! assert_eq!(extractor.names()?, ["name", "city"]);
//! assert_eq!(extractor.names_from_tag("json")?, ["name", "city"]);
//! assert_eq!(extractor.names_from_tag("sql")?, ["business_name"]);
//! # Ok::<(), structextract::ExtractError>(())
//! ```

pub use structextract_macros::Extractable;

mod error;
mod extractor;
mod field;
mod merge;
mod resolve;

pub use error::ExtractError;
pub use extractor::Extractor;
pub use field::{FieldKind, FieldSpec, ResolvedField, Tag, Walk, field_value};
pub use merge::overlay_untouched;
pub use resolve::resolve_fields;

/// Registration trait for record types with a statically known field set.
///
/// Implementations are normally generated by `#[derive(Extractable)]`; a
/// manual implementation supplies the same descriptor table and follows the
/// same declaration-order contract. The serde bounds are the codec used for
/// value extraction and for decoding update maps in
/// [`Extractor::apply_map`]. The `'static` bound lets the descriptor table
/// borrow for the program's lifetime; derive targets are concrete owned
/// structs, which satisfy it trivially.
pub trait Extractable: serde::Serialize + serde::de::DeserializeOwned + Default + 'static {
    /// Field descriptor table in declaration order.
    fn fields() -> &'static [FieldSpec<Self>];
}
