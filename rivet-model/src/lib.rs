//! Entity model and save lifecycle hooks for Rivet.
//!
//! Defines the types an application touches when it persists records:
//! - [`Entity`] — the generic record (identity, JSON fields, timestamps, state)
//! - [`SaveMode`] / [`EntityState`] — insert vs. update and clean vs. dirty
//! - [`EntityHooks`] — the extension points run around a save
//! - [`HookRegistry`] — ordered, per-type hook layers attached by registration
//!
//! The dispatcher that drives these hooks lives in `rivet-lifecycle`.

mod entity;
mod error;
mod hooks;
mod mode;
mod registry;

pub use entity::Entity;
pub use error::{ModelError, ModelResult};
pub use hooks::{EntityHooks, HookDecision, HookError, ValidationFailure};
pub use mode::{EntityState, SaveMode};
pub use registry::HookRegistry;
