//! Extraction surface bound to one record instance.

use std::any::Any;
use std::collections::{HashMap, HashSet};

use serde_json::Value;
use tracing::debug;

use crate::Extractable;
use crate::error::ExtractError;
use crate::field::{ResolvedField, Walk};
use crate::resolve::resolve_fields;

/// Read and merge operations over one borrowed record instance.
///
/// Configuration is builder-style and happens before any traversal:
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use structextract::{Extractable, Extractor};
///
/// #[derive(Extractable, Serialize, Deserialize, Default)]
/// struct Event {
///     #[extract(tags = r#"json:"kind""#)]
///     kind: String,
///     #[extract(tags = r#"json:"source""#)]
///     source: String,
/// }
///
/// let event = Event {
///     kind: "created".into(),
///     source: "api".into(),
/// };
/// let extractor = Extractor::new(&event).ignore_fields(["source"]);
/// assert_eq!(extractor.names()?, ["kind"]);
/// # Ok::<(), structextract::ExtractError>(())
/// ```
pub struct Extractor<'a, T: Extractable> {
    pub(crate) record: &'a T,
    ignored: HashSet<String>,
    use_embedded: bool,
}

impl<'a, T: Extractable> Extractor<'a, T> {
    /// Binds an extractor to `record` with an empty ignore set and
    /// embedded flattening disabled.
    #[must_use]
    pub fn new(record: &'a T) -> Self {
        Self {
            record,
            ignored: HashSet::new(),
            use_embedded: false,
        }
    }

    /// Binds an extractor to a type-erased reference.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::InvalidTarget`] when `value` is not an
    /// instance of `T`.
    pub fn from_any(value: &'a dyn Any) -> Result<Self, ExtractError> {
        value
            .downcast_ref::<T>()
            .map(Self::new)
            .ok_or(ExtractError::InvalidTarget)
    }

    /// Excludes the given declared field names from every traversal.
    ///
    /// Each name is validated against the currently-reachable fields,
    /// under the ignore set and flatten flag in effect at the time of the
    /// call; names that match nothing are dropped silently.
    #[must_use]
    pub fn ignore_fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            let name = name.as_ref();
            if self.is_field_name_valid(name) {
                self.ignored.insert(name.to_owned());
            } else {
                debug!(field = name, "ignore request matched no reachable field");
            }
        }
        self
    }

    /// Toggles flattening of embedded records into the parent field list.
    #[must_use]
    pub fn use_embedded_structs(mut self, enabled: bool) -> Self {
        self.use_embedded = enabled;
        self
    }

    /// Declared field names in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Decode`] when a field value cannot be
    /// serialized.
    pub fn names(&self) -> Result<Vec<&'static str>, ExtractError> {
        Ok(self.resolve()?.iter().map(|field| field.name).collect())
    }

    /// Tag values for `key` in declaration order.
    ///
    /// Fields without the tag are excluded, as are fields whose tag
    /// carries `omitempty` while the current value is the zero value.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Decode`] when a field value cannot be
    /// serialized.
    pub fn names_from_tag(&self, key: &str) -> Result<Vec<&'static str>, ExtractError> {
        Ok(self
            .resolve()?
            .iter()
            .filter_map(|field| field.tag_for_view(key).map(|tag| tag.value))
            .collect())
    }

    /// Like [`Extractor::names_from_tag`], with `prefix` prepended to each
    /// entry and surrounding whitespace trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Decode`] when a field value cannot be
    /// serialized.
    pub fn names_from_tag_with_prefix(
        &self,
        key: &str,
        prefix: &str,
    ) -> Result<Vec<String>, ExtractError> {
        Ok(self
            .resolve()?
            .iter()
            .filter_map(|field| field.tag_for_view(key))
            .map(|tag| format!("{prefix}{}", tag.value).trim().to_owned())
            .collect())
    }

    /// Current field values in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Decode`] when a field value cannot be
    /// serialized.
    pub fn values(&self) -> Result<Vec<Value>, ExtractError> {
        Ok(self
            .resolve()?
            .into_iter()
            .map(|field| field.value)
            .collect())
    }

    /// Current values of fields tagged with `key`, in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Decode`] when a field value cannot be
    /// serialized.
    pub fn values_from_tag(&self, key: &str) -> Result<Vec<Value>, ExtractError> {
        Ok(self
            .resolve()?
            .into_iter()
            .filter(|field| field.tag_for_view(key).is_some())
            .map(|field| field.value)
            .collect())
    }

    /// Declared field name to current value.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Decode`] when a field value cannot be
    /// serialized.
    pub fn field_value_map(&self) -> Result<HashMap<&'static str, Value>, ExtractError> {
        Ok(self
            .resolve()?
            .into_iter()
            .map(|field| (field.name, field.value))
            .collect())
    }

    /// Tag value for `key` to current field value.
    ///
    /// Subject to the same exclusions as [`Extractor::names_from_tag`].
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Decode`] when a field value cannot be
    /// serialized.
    pub fn field_value_from_tag_map(
        &self,
        key: &str,
    ) -> Result<HashMap<&'static str, Value>, ExtractError> {
        Ok(self
            .resolve()?
            .into_iter()
            .filter_map(|field| {
                field
                    .tag_for_view(key)
                    .map(|tag| (tag.value, field.value))
            })
            .collect())
    }

    /// Maps tag values of `from` to tag values of `to`.
    ///
    /// A field contributes an entry only when both annotations are
    /// present. Useful for translating update keys between two external
    /// naming systems, e.g. API field name to storage column name.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Decode`] when a field value cannot be
    /// serialized.
    pub fn tag_mapping(
        &self,
        from: &str,
        to: &str,
    ) -> Result<HashMap<&'static str, &'static str>, ExtractError> {
        Ok(self
            .resolve()?
            .iter()
            .filter_map(|field| Some((field.tag(from)?.value, field.tag(to)?.value)))
            .collect())
    }

    /// Runs one resolver pass under the instance's current configuration.
    pub(crate) fn resolve(&self) -> Result<Vec<ResolvedField>, ExtractError> {
        let walk = Walk {
            ignored: &self.ignored,
            flatten: self.use_embedded,
        };
        let mut out = Vec::new();
        resolve_fields(self.record, &walk, &mut out)?;
        Ok(out)
    }

    fn is_field_name_valid(&self, name: &str) -> bool {
        self.resolve()
            .is_ok_and(|fields| fields.iter().any(|field| field.name == name))
    }
}
