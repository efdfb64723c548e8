//! Merge Engine: sparse keyed updates applied over an existing record.
//!
//! The merge is decode-then-overlay. The update map is deep-merged over
//! the serialized default instance and decoded through the record's serde
//! codec; the resolver independently determines which fields the update
//! addresses ("touched"); every untouched leaf then has the original
//! record's value copied back over the decoded instance. The decoded set
//! follows the codec's key convention, the touched set follows the tag
//! convention handed to [`Extractor::apply_map`], and both are consulted.
//! Ignored fields never enter the touched set, so they always come back
//! equal to the original even when the raw update carries a colliding key.

use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value};
use tracing::debug;

use crate::Extractable;
use crate::error::ExtractError;
use crate::extractor::Extractor;
use crate::field::FieldKind;

impl<T: Extractable> Extractor<'_, T> {
    /// Applies a sparse update map over the bound record, returning a new,
    /// fully populated instance.
    ///
    /// Update keys are matched against declared field names when
    /// `input_tag` is `None`, otherwise against each field's tag value for
    /// `input_tag` (fields without that tag cannot be addressed). Matched
    /// fields take the decoded update value; all other fields, including
    /// ignored ones, retain the original record's value.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Decode`] when the update cannot be decoded
    /// into `T`; no partial instance is produced.
    pub fn apply_map(
        &self,
        update: &Map<String, Value>,
        input_tag: Option<&str>,
    ) -> Result<T, ExtractError> {
        let mut touched: HashSet<&'static str> = HashSet::new();
        for field in self.resolve()? {
            let key = match input_tag {
                None => field.name,
                Some(tag_key) => match field.tag(tag_key) {
                    Some(tag) => tag.value,
                    None => continue,
                },
            };
            if update.contains_key(key) {
                touched.insert(field.name);
            }
        }

        let mut decoded = decode_update::<T>(update)?;
        overlay_untouched(self.record, &mut decoded, &touched);
        debug!(touched = touched.len(), "applied update map");
        Ok(decoded)
    }

    /// Translates update keys from `input_tag` to `output_tag`.
    ///
    /// For each resolved field carrying both tags whose `input_tag` value
    /// is a key of `update`, the output maps the `output_tag` value to the
    /// update's value. Fields missing either tag, and keys addressing no
    /// field, are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Decode`] when a field value cannot be
    /// serialized.
    pub fn get_changeset_for_tag(
        &self,
        update: &Map<String, Value>,
        input_tag: &str,
        output_tag: &str,
    ) -> Result<HashMap<&'static str, Value>, ExtractError> {
        let mut out = HashMap::new();
        for field in self.resolve()? {
            let Some(input) = field.tag(input_tag) else {
                continue;
            };
            let Some(output) = field.tag(output_tag) else {
                continue;
            };
            let Some(value) = update.get(input.value) else {
                continue;
            };
            out.insert(output.value, value.clone());
        }
        Ok(out)
    }
}

/// Decodes `update` into a fresh `T` by deep-merging it over the
/// serialized default instance and deserializing the result. Key matching
/// here follows the record's serde convention, which may differ from the
/// tag convention used for the touched set.
fn decode_update<T: Extractable>(update: &Map<String, Value>) -> Result<T, ExtractError> {
    let mut base = serde_json::to_value(T::default())?;
    deep_merge(&mut base, &Value::Object(update.clone()));
    Ok(serde_json::from_value(base)?)
}

/// Recursively merges `update` into `base`: objects merge key-wise,
/// everything else is replaced.
fn deep_merge(base: &mut Value, update: &Value) {
    match (base, update) {
        (Value::Object(base_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                match base_map.get_mut(key) {
                    Some(slot) => deep_merge(slot, value),
                    None => {
                        base_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (slot, value) => *slot = value.clone(),
    }
}

/// Copies every leaf whose declared name is not in `touched` from
/// `original` into `decoded`, descending into embedded records
/// unconditionally.
///
/// Both instances share the same declared layout by construction; the walk
/// matches fields by declaration. Generated descriptor tables call this
/// from their embedded `overlay` thunks.
pub fn overlay_untouched<T: Extractable>(
    original: &T,
    decoded: &mut T,
    touched: &HashSet<&'static str>,
) {
    for spec in T::fields() {
        match &spec.kind {
            FieldKind::Embedded { overlay, .. } => overlay(original, decoded, touched),
            FieldKind::Leaf { copy, .. } => {
                if !touched.contains(spec.name) {
                    copy(original, decoded);
                }
            }
        }
    }
}
