use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a save writes a new identity or overwrites a stored one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveMode {
    /// First persistence of the entity.
    Insert,
    /// Any later persistence of the same identity.
    Update,
}

impl SaveMode {
    #[must_use]
    pub const fn is_insert(self) -> bool {
        matches!(self, Self::Insert)
    }
}

impl fmt::Display for SaveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert => f.write_str("insert"),
            Self::Update => f.write_str("update"),
        }
    }
}

/// Persistence state of an in-memory entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityState {
    /// Never persisted; the next save is an insert.
    #[default]
    New,
    /// Matches what was last persisted.
    Clean,
    /// Persisted before and modified since.
    Dirty,
}

impl EntityState {
    /// The save mode a save of an entity in this state resolves to.
    #[must_use]
    pub const fn save_mode(self) -> SaveMode {
        match self {
            Self::New => SaveMode::Insert,
            Self::Clean | Self::Dirty => SaveMode::Update,
        }
    }
}
