//! Error types for the save lifecycle.

use crate::SaveStage;
use rivet_model::{HookError, ValidationFailure};
use rivet_types::EntityId;
use thiserror::Error;

/// Result type for save operations.
pub type SaveResult<T> = Result<T, SaveError>;

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Why a save call did not complete.
///
/// `Validation` and `Cancelled` are raised before the repository is touched.
/// `Hook` and `Persistence` are faults handed back as-is.
#[derive(Debug, Error)]
pub enum SaveError {
    /// A hook judged the entity unfit for persistence.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationFailure),

    /// An `on_saving` hook vetoed the save.
    #[error("save cancelled: {reason}")]
    Cancelled { reason: String },

    /// Hook code raised a fault.
    #[error("{stage} hook '{hook}' failed: {source}")]
    Hook {
        stage: SaveStage,
        hook: String,
        #[source]
        source: HookError,
    },

    /// The repository rejected or failed the write.
    #[error("persistence failed: {0}")]
    Persistence(#[from] RepositoryError),
}

impl SaveError {
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }

    /// Validation failures and cancellations leave nothing persisted and can
    /// be retried after the caller changes the entity or the policy.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        self.is_validation() || self.is_cancelled()
    }

    /// The validation failure, if this is one.
    pub fn validation_failure(&self) -> Option<&ValidationFailure> {
        match self {
            Self::Validation(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Errors raised by an [`EntityRepository`](crate::EntityRepository).
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Insert of an identity that is already stored.
    #[error("entity already exists: {0}")]
    AlreadyExists(EntityId),

    /// Update of an identity that was never stored.
    #[error("entity not found: {0}")]
    NotFound(EntityId),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend-specific failure.
    #[error("backend error: {0}")]
    Backend(String),
}
