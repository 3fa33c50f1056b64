//! Error taxonomy for workspace operations.
//!
//! Nothing here is fatal. Every variant is local to one call and the caller
//! can retry with corrected input; surfacing the failure to the user is the
//! host's job.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use crate::item::ItemId;

/// Grepable, stable error codes for the host UI layer.
pub trait ErrorCode {
    fn error_code(&self) -> &'static str;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// Rejected edit (bad price, malformed transform, empty name). Prior state is unchanged.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// The referenced item is not in the registry.
    #[error("item not found: {0}")]
    NotFound(ItemId),
    /// Snapshot data could not be parsed. The current registry is untouched.
    #[error("corrupt snapshot: {0}")]
    CorruptSnapshot(String),
    /// The host key-value store refused the write.
    #[error("storage error: {0}")]
    Storage(String),
}

impl ErrorCode for LayoutError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "E_INVALID_INPUT",
            Self::NotFound(_) => "E_NOT_FOUND",
            Self::CorruptSnapshot(_) => "E_CORRUPT_SNAPSHOT",
            Self::Storage(_) => "E_STORAGE",
        }
    }
}

impl LayoutError {
    /// Whether retrying the same call later could succeed without new input.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}
