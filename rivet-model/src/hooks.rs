use crate::{Entity, SaveMode};
use async_trait::async_trait;
use std::error::Error as StdError;
use thiserror::Error;

/// An entity's state is unfit for persistence.
///
/// Recoverable: the caller can fix the entity and save again.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationFailure {
    pub message: String,
    /// JSON pointer of the offending field, when there is one.
    pub field: Option<String>,
}

impl ValidationFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: None,
        }
    }

    /// A failure attributed to a single field.
    pub fn field(pointer: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: Some(pointer.into()),
        }
    }
}

/// A fault raised by hook code.
///
/// Unlike [`ValidationFailure`] this is not a verdict on the entity: it aborts
/// the current save and is handed to the caller as-is.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct HookError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl HookError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// What an `on_saving` hook wants the dispatcher to do next.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HookDecision {
    /// Continue to the next layer, then to persistence.
    #[default]
    Proceed,
    /// Abort without persisting. A policy decision, not a data error.
    Cancel { reason: String },
    /// Abort without persisting because the entity is invalid.
    Fail(ValidationFailure),
}

impl HookDecision {
    pub fn cancel(reason: impl Into<String>) -> Self {
        Self::Cancel {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn is_proceed(&self) -> bool {
        matches!(self, Self::Proceed)
    }
}

/// Extension points run around a save.
///
/// Every method defaults to a no-op, so an implementation only overrides the
/// stages it cares about. Layers are composed through
/// [`HookRegistry`](crate::HookRegistry) rather than by calling into a parent
/// implementation.
///
/// Hooks only ever see the entity being saved. They have no handle on the
/// dispatcher and so cannot start a nested save of the same entity.
#[async_trait]
pub trait EntityHooks: Send + Sync {
    /// Label used in log output.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Normalize the entity before validation (derive defaults, trim input).
    async fn on_validating(&self, entity: &mut Entity) -> Result<(), HookError> {
        let _ = entity;
        Ok(())
    }

    /// Reject an entity whose state is unfit for persistence.
    /// Must not change anything the save relies on.
    async fn validate(&self, entity: &Entity) -> Result<(), ValidationFailure> {
        let _ = entity;
        Ok(())
    }

    /// Last chance to veto the save before it reaches the repository.
    async fn on_saving(&self, entity: &Entity, mode: SaveMode) -> Result<HookDecision, HookError> {
        let _ = (entity, mode);
        Ok(HookDecision::Proceed)
    }

    /// Runs only after the repository accepted the write.
    async fn on_saved(&self, entity: &Entity, mode: SaveMode) -> Result<(), HookError> {
        let _ = (entity, mode);
        Ok(())
    }
}
