use std::fmt;

/// Where a save call is in its lifecycle.
///
/// ```text
/// Start -> Validating -> Validated -> Saving -> Persisting -> Persisted -> Saved
///              |                        |
///              +-> Failed               +-> Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaveStage {
    Start,
    Validating,
    Validated,
    Saving,
    Cancelled,
    Persisting,
    Persisted,
    Saved,
    Failed,
}

impl SaveStage {
    /// True for stages after which nothing else runs.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Cancelled | Self::Saved | Self::Failed)
    }
}

impl fmt::Display for SaveStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Start => "start",
            Self::Validating => "validating",
            Self::Validated => "validated",
            Self::Saving => "saving",
            Self::Cancelled => "cancelled",
            Self::Persisting => "persisting",
            Self::Persisted => "persisted",
            Self::Saved => "saved",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}
