//! Field Resolver: declaration-order traversal with ignore filtering and
//! embedded-record flattening.

use crate::Extractable;
use crate::error::ExtractError;
use crate::field::{FieldKind, ResolvedField, Walk};

/// Resolves `record`'s fields into `out` under the given walk settings.
///
/// Fields are visited in declaration order. A field whose name is in the
/// ignore set is skipped entirely, with no recursion even when embedded.
/// An embedded record is skipped as an opaque unit when flattening is
/// disabled; when enabled its own fields are resolved recursively, under
/// the same walk settings, and spliced in at the embedding position.
///
/// Generated descriptor tables call this from their embedded `resolve`
/// thunks.
///
/// # Errors
///
/// Returns [`ExtractError::Decode`] when a field value cannot be
/// serialized into the codec representation.
pub fn resolve_fields<T: Extractable>(
    record: &T,
    walk: &Walk<'_>,
    out: &mut Vec<ResolvedField>,
) -> Result<(), ExtractError> {
    for spec in T::fields() {
        if walk.ignored.contains(spec.name) {
            continue;
        }
        match &spec.kind {
            FieldKind::Embedded { resolve, .. } => {
                if walk.flatten {
                    resolve(record, walk, out)?;
                }
            }
            FieldKind::Leaf { get, .. } => {
                out.push(ResolvedField {
                    name: spec.name,
                    tags: spec.tags,
                    value: get(record)?,
                });
            }
        }
    }
    Ok(())
}
