use thiserror::Error;

use crate::Version;

/// Errors that can occur when interacting with a repository.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The aggregate was not found in the store.
    #[error("aggregate not found: {0}")]
    NotFound(String),

    /// A concurrency conflict occurred when saving.
    /// The aggregate's persisted version did not match the loaded version.
    #[error("concurrency conflict for aggregate {id}: expected version {expected}, found {actual}")]
    ConcurrencyConflict {
        id: String,
        expected: Version,
        actual: Version,
    },

    /// The underlying storage is unavailable.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Returns true if the operation is safe to retry.
    ///
    /// Concurrency conflicts and infrastructure failures are transient;
    /// a missing aggregate is not.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            StoreError::ConcurrencyConflict { .. } | StoreError::Unavailable(_)
        )
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StoreError>;
