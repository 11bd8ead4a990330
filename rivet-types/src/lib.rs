//! Core type definitions for Rivet.
//!
//! This crate defines the plugin-agnostic building blocks shared by the
//! model and lifecycle crates:
//! - Entity and change identifiers (UUID v7)
//! - A millisecond wall clock used for entity timestamps
//! - Change records journaled by repositories after a successful persist

mod change;
mod clock;
mod ids;

pub use change::{ChangeKind, ChangeRecord};
pub use clock::now_millis;
pub use ids::{ChangeId, EntityId};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),
}
