//! Error types produced by the extraction engine.

use thiserror::Error;

/// Errors that can occur while resolving fields or applying updates.
///
/// Unknown tag keys, missing annotations, and unknown ignore-field names
/// are not errors; they are empty-result or no-op conditions handled at
/// the call site.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtractError {
    /// The bound value is not an instance of the expected record type.
    #[error("target is not a valid record instance")]
    InvalidTarget,

    /// The update payload could not be decoded into the record type, or a
    /// field value could not be represented as a codec value.
    #[error("failed to decode value: {0}")]
    Decode(#[from] serde_json::Error),
}
