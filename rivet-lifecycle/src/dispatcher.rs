//! Save dispatcher - runs an entity through the save lifecycle.

use crate::{EntityRepository, SaveConfig, SaveError, SaveResult, SaveStage};
use rivet_model::{Entity, EntityHooks, HookDecision, HookError, HookRegistry, SaveMode};
use rivet_types::now_millis;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Runs the save lifecycle for entities of any type.
///
/// Holds no per-call state: one dispatcher can be shared behind an `Arc` by
/// tasks saving different entities. Saving the same entity from two tasks at
/// once is prevented by the `&mut Entity` borrow.
pub struct SaveDispatcher {
    repository: Arc<dyn EntityRepository>,
    hooks: HookRegistry,
    config: SaveConfig,
}

impl SaveDispatcher {
    pub fn new(repository: Arc<dyn EntityRepository>, hooks: HookRegistry) -> Self {
        Self {
            repository,
            hooks,
            config: SaveConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: SaveConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SaveConfig {
        &self.config
    }

    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    pub fn repository(&self) -> &Arc<dyn EntityRepository> {
        &self.repository
    }

    /// Saves the entity, inserting it if it was never persisted and updating
    /// it otherwise. Returns the mode that was used.
    pub async fn save(&self, entity: &mut Entity) -> SaveResult<SaveMode> {
        let mode = entity.save_mode();
        self.save_with_mode(entity, mode).await
    }

    /// Saves the entity with a caller-chosen mode.
    ///
    /// The hook chain is resolved from `entity_type` once, before any hook
    /// runs.
    pub async fn save_with_mode(&self, entity: &mut Entity, mode: SaveMode) -> SaveResult<SaveMode> {
        let chain = self.hooks.chain(&entity.entity_type);
        self.transition(entity, SaveStage::Start, mode);

        self.transition(entity, SaveStage::Validating, mode);
        for hooks in &chain {
            if let Err(source) = hooks.on_validating(entity).await {
                return Err(self.hook_failed(entity, SaveStage::Validating, *hooks, source));
            }
        }
        for hooks in &chain {
            if let Err(failure) = hooks.validate(entity).await {
                info!(
                    "Validation of entity {} (type={}) failed in '{}': {}",
                    entity.id,
                    entity.entity_type,
                    hooks.name(),
                    failure
                );
                self.transition(entity, SaveStage::Failed, mode);
                return Err(SaveError::Validation(failure));
            }
        }
        self.transition(entity, SaveStage::Validated, mode);

        self.transition(entity, SaveStage::Saving, mode);
        for hooks in &chain {
            match hooks.on_saving(entity, mode).await {
                Ok(HookDecision::Proceed) => {}
                Ok(HookDecision::Cancel { reason }) => {
                    info!(
                        "Save of entity {} (type={}) cancelled by '{}': {}",
                        entity.id,
                        entity.entity_type,
                        hooks.name(),
                        reason
                    );
                    self.transition(entity, SaveStage::Cancelled, mode);
                    return Err(SaveError::Cancelled { reason });
                }
                Ok(HookDecision::Fail(failure)) => {
                    info!(
                        "Save of entity {} (type={}) rejected by '{}': {}",
                        entity.id,
                        entity.entity_type,
                        hooks.name(),
                        failure
                    );
                    self.transition(entity, SaveStage::Failed, mode);
                    return Err(SaveError::Validation(failure));
                }
                Err(source) => {
                    return Err(self.hook_failed(entity, SaveStage::Saving, *hooks, source));
                }
            }
        }

        self.transition(entity, SaveStage::Persisting, mode);
        let unstamped = Stamps::capture(entity);
        self.stamp(entity, mode);
        if let Err(e) = self.repository.persist(entity, mode).await {
            unstamped.restore(entity);
            warn!(
                "Persisting entity {} (type={}, mode={}) failed: {}",
                entity.id, entity.entity_type, mode, e
            );
            self.transition(entity, SaveStage::Failed, mode);
            return Err(SaveError::Persistence(e));
        }
        entity.mark_persisted();
        self.transition(entity, SaveStage::Persisted, mode);

        for hooks in &chain {
            if let Err(source) = hooks.on_saved(entity, mode).await {
                return Err(self.hook_failed(entity, SaveStage::Saved, *hooks, source));
            }
        }
        self.transition(entity, SaveStage::Saved, mode);
        Ok(mode)
    }

    fn stamp(&self, entity: &mut Entity, mode: SaveMode) {
        if self.config.stamp_timestamps {
            let now = now_millis();
            entity.modified_at = now;
            if mode.is_insert() {
                entity.created_at = now;
            }
        }
        if mode.is_insert() {
            if let Some(actor) = &self.config.actor {
                entity.created_by.clone_from(actor);
            }
        }
    }

    fn transition(&self, entity: &Entity, stage: SaveStage, mode: SaveMode) {
        debug!(
            "Entity {} (type={}, mode={}) -> {}",
            entity.id, entity.entity_type, mode, stage
        );
    }

    fn hook_failed(
        &self,
        entity: &Entity,
        stage: SaveStage,
        hooks: &dyn EntityHooks,
        source: HookError,
    ) -> SaveError {
        warn!(
            "Hook '{}' failed while {} entity {} (type={}): {}",
            hooks.name(),
            stage,
            entity.id,
            entity.entity_type,
            source
        );
        SaveError::Hook {
            stage,
            hook: hooks.name().to_string(),
            source,
        }
    }
}

/// Fields written by the dispatcher right before persisting, kept so a
/// failed write leaves the caller's entity as it was.
struct Stamps {
    created_at: i64,
    modified_at: i64,
    created_by: String,
}

impl Stamps {
    fn capture(entity: &Entity) -> Self {
        Self {
            created_at: entity.created_at,
            modified_at: entity.modified_at,
            created_by: entity.created_by.clone(),
        }
    }

    fn restore(self, entity: &mut Entity) {
        entity.created_at = self.created_at;
        entity.modified_at = self.modified_at;
        entity.created_by = self.created_by;
    }
}
