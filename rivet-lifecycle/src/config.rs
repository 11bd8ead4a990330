use serde::{Deserialize, Serialize};

/// Dispatcher behavior that is not expressed through hooks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveConfig {
    /// Refresh `modified_at` (and `created_at` on insert) right before persisting.
    pub stamp_timestamps: bool,
    /// When set, written to `created_by` on insert.
    pub actor: Option<String>,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            stamp_timestamps: true,
            actor: None,
        }
    }
}

impl SaveConfig {
    #[must_use]
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    #[must_use]
    pub fn without_timestamps(mut self) -> Self {
        self.stamp_timestamps = false;
        self
    }
}
