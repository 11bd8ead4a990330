//! Save lifecycle for Rivet entities.
//!
//! [`SaveDispatcher`] drives one save through a fixed sequence:
//!
//! 1. `on_validating`: hooks normalize the entity
//! 2. `validate`: hooks reject invalid state (first failure wins)
//! 3. `on_saving`: hooks may cancel or fail the save
//! 4. persist: delegated to an [`EntityRepository`]
//! 5. `on_saved`: hooks react to the committed write
//!
//! Each step runs every registered hook layer before the next step starts,
//! and the repository is only reached when validation passed and no layer
//! cancelled.

mod config;
mod dispatcher;
mod error;
mod repository;
mod stage;

pub use config::SaveConfig;
pub use dispatcher::SaveDispatcher;
pub use error::{RepositoryError, RepositoryResult, SaveError, SaveResult};
pub use repository::{EntityRepository, MemoryRepository};
pub use stage::SaveStage;
