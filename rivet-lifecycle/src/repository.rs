//! Persistence collaborator for the dispatcher.

use crate::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use rivet_model::{Entity, SaveMode};
use rivet_types::{ChangeKind, ChangeRecord, EntityId, now_millis};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Where entities go once the save lifecycle lets them through.
///
/// The dispatcher calls [`persist`](Self::persist) at most once per save and
/// never retries it.
#[async_trait]
pub trait EntityRepository: Send + Sync {
    /// Writes the entity. `Insert` must not overwrite a stored identity and
    /// `Update` must not create one.
    async fn persist(&self, entity: &Entity, mode: SaveMode) -> RepositoryResult<()>;

    /// Reads a stored entity back. Loaded entities are clean.
    async fn load(&self, id: &EntityId) -> RepositoryResult<Option<Entity>>;
}

/// In-process repository backed by a map, with a change journal.
#[derive(Default)]
pub struct MemoryRepository {
    entities: RwLock<HashMap<EntityId, Entity>>,
    journal: RwLock<Vec<ChangeRecord>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entities.
    pub async fn len(&self) -> usize {
        self.entities.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entities.read().await.is_empty()
    }

    pub async fn contains(&self, id: &EntityId) -> bool {
        self.entities.read().await.contains_key(id)
    }

    /// All changes recorded so far, oldest first.
    pub async fn journal(&self) -> Vec<ChangeRecord> {
        self.journal.read().await.clone()
    }

    /// Changes recorded for a single entity, oldest first.
    pub async fn changes_for(&self, id: &EntityId) -> Vec<ChangeRecord> {
        self.journal
            .read()
            .await
            .iter()
            .filter(|c| c.entity_id == *id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl EntityRepository for MemoryRepository {
    async fn persist(&self, entity: &Entity, mode: SaveMode) -> RepositoryResult<()> {
        let json_data = serde_json::to_string(&entity.data)?;

        // Entities lock is held across the journal append so journal order
        // matches write order.
        let mut entities = self.entities.write().await;
        let kind = match mode {
            SaveMode::Insert => {
                if entities.contains_key(&entity.id) {
                    return Err(RepositoryError::AlreadyExists(entity.id));
                }
                ChangeKind::Inserted
            }
            SaveMode::Update => {
                if !entities.contains_key(&entity.id) {
                    return Err(RepositoryError::NotFound(entity.id));
                }
                ChangeKind::Updated
            }
        };

        let mut stored = entity.clone();
        stored.mark_persisted();
        entities.insert(entity.id, stored);

        self.journal.write().await.push(ChangeRecord::new(
            entity.id,
            entity.entity_type.clone(),
            kind,
            now_millis(),
            json_data,
        ));

        debug!("Stored entity {} (type={}, mode={})", entity.id, entity.entity_type, mode);
        Ok(())
    }

    async fn load(&self, id: &EntityId) -> RepositoryResult<Option<Entity>> {
        Ok(self.entities.read().await.get(id).cloned())
    }
}
