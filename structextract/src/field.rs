//! Static field descriptor model backing the resolver.
//!
//! Every [`Extractable`](crate::Extractable) type exposes a table of
//! [`FieldSpec`] entries, one per declared field in declaration order. The
//! table is the registration-time replacement for runtime reflection: each
//! entry carries the declared name, the tag annotations parsed at the
//! declaration site, and monomorphised thunks for value access, field
//! copying, and embedded-record recursion.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;

use crate::error::ExtractError;

/// One tag annotation attached to a field declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    /// Annotation namespace, e.g. `json` or `sql`.
    pub key: &'static str,
    /// Tag value with modifiers stripped.
    pub value: &'static str,
    /// Comma-separated modifiers that followed the value.
    pub modifiers: &'static [&'static str],
}

impl Tag {
    const OMIT_EMPTY: &'static str = "omitempty";

    /// Whether the `omitempty` modifier is present.
    #[must_use]
    pub fn omit_empty(&self) -> bool {
        self.modifiers.contains(&Self::OMIT_EMPTY)
    }
}

/// Descriptor for one declared field of `T`.
pub struct FieldSpec<T> {
    /// Declared field name, unique within the declaring type.
    pub name: &'static str,
    /// Tag annotations attached at the declaration site.
    pub tags: &'static [Tag],
    /// How the field participates in traversal.
    pub kind: FieldKind<T>,
}

/// Accessor thunks for a leaf field or recursion thunks for an embedded
/// record.
pub enum FieldKind<T> {
    /// An ordinary named field.
    Leaf {
        /// Serializes the field's current value into the codec
        /// representation.
        get: fn(&T) -> Result<Value, ExtractError>,
        /// Copies the field from the first record into the second. Used by
        /// the merge overlay to restore untouched fields.
        copy: fn(&T, &mut T),
    },
    /// An embedded record whose own fields are spliced into the parent's
    /// resolved list when flattening is enabled.
    Embedded {
        /// Resolves the embedded record's fields under the parent's walk
        /// settings.
        resolve: fn(&T, &Walk<'_>, &mut Vec<ResolvedField>) -> Result<(), ExtractError>,
        /// Recursive overlay into the embedded record; descends
        /// unconditionally during a merge.
        overlay: fn(&T, &mut T, &HashSet<&'static str>),
    },
}

/// Traversal settings shared across one resolver pass and propagated
/// unchanged into embedded records.
pub struct Walk<'a> {
    pub(crate) ignored: &'a HashSet<String>,
    pub(crate) flatten: bool,
}

/// A field surfaced by one resolver pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedField {
    /// Declared name.
    pub name: &'static str,
    /// Tag annotations.
    pub tags: &'static [Tag],
    /// Current value in the codec representation.
    pub value: Value,
}

impl ResolvedField {
    /// Looks up the annotation for `key`.
    ///
    /// Not-found is a per-field exclusion signal for tag-keyed views,
    /// never an error.
    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&'static Tag> {
        self.tags.iter().find(|tag| tag.key == key)
    }

    /// Tag lookup for value-producing views: an `omitempty` annotation on
    /// a currently-zero field counts as not found.
    pub(crate) fn tag_for_view(&self, key: &str) -> Option<&'static Tag> {
        self.tag(key)
            .filter(|tag| !(tag.omit_empty() && is_zero_value(&self.value)))
    }
}

/// Serializes one field value into the codec representation.
///
/// Generated descriptor tables call this from their `get` thunks.
///
/// # Errors
///
/// Returns [`ExtractError::Decode`] when the value cannot be represented.
pub fn field_value<V: Serialize>(value: &V) -> Result<Value, ExtractError> {
    serde_json::to_value(value).map_err(ExtractError::from)
}

/// Whether `value` is the zero value for its type as the codec sees it.
pub(crate) fn is_zero_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}
