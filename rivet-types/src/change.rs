//! Change records.
//!
//! A repository appends one record per successful persist. Records are
//! immutable and carry a full JSON snapshot of the entity's data as it was
//! written, so a journal can be replayed without the entity store.

use crate::{ChangeId, EntityId};
use serde::{Deserialize, Serialize};

/// What a persist did to the stored entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// First persistence of the entity's identity.
    Inserted,
    /// A later persistence of an already stored identity.
    Updated,
}

/// A journaled persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub id: ChangeId,
    pub entity_id: EntityId,
    pub entity_type: String,
    pub kind: ChangeKind,
    /// Milliseconds since the Unix epoch at which the change was recorded.
    pub recorded_at: i64,
    /// Serialized entity data at the time of the change.
    pub json_data: String,
}

impl ChangeRecord {
    pub fn new(
        entity_id: EntityId,
        entity_type: impl Into<String>,
        kind: ChangeKind,
        recorded_at: i64,
        json_data: impl Into<String>,
    ) -> Self {
        Self {
            id: ChangeId::new(),
            entity_id,
            entity_type: entity_type.into(),
            kind,
            recorded_at,
            json_data: json_data.into(),
        }
    }

    /// Parses the recorded snapshot back into JSON.
    pub fn data(&self) -> crate::Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.json_data)?)
    }

    #[must_use]
    pub fn is_insert(&self) -> bool {
        self.kind == ChangeKind::Inserted
    }
}
