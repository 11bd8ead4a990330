use rivet_lifecycle::{RepositoryError, SaveError, SaveStage};
use rivet_model::{HookError, ValidationFailure};
use rivet_types::EntityId;

#[test]
fn error_display_validation() {
    let err = SaveError::from(ValidationFailure::new("name is required"));
    let msg = format!("{err}");
    assert!(msg.contains("validation failed"));
    assert!(msg.contains("name is required"));
    assert!(err.is_recoverable());
}

#[test]
fn error_display_cancelled() {
    let err = SaveError::Cancelled { reason: "locked".into() };
    assert_eq!(format!("{err}"), "save cancelled: locked");
    assert!(err.is_recoverable());
    assert!(err.validation_failure().is_none());
}

#[test]
fn error_display_hook() {
    let err = SaveError::Hook {
        stage: SaveStage::Saved,
        hook: "mailer".into(),
        source: HookError::new("smtp down"),
    };
    assert_eq!(format!("{err}"), "saved hook 'mailer' failed: smtp down");
    assert!(!err.is_recoverable());
}

#[test]
fn error_display_persistence() {
    let id = EntityId::new();
    let err = SaveError::from(RepositoryError::NotFound(id));
    let msg = format!("{err}");
    assert!(msg.contains("persistence failed"));
    assert!(msg.contains(&id.to_string()));
    assert!(!err.is_recoverable());
}

#[test]
fn repository_error_display() {
    assert!(format!("{}", RepositoryError::Backend("timeout".into())).contains("backend error"));
    let id = EntityId::new();
    assert!(format!("{}", RepositoryError::AlreadyExists(id)).contains("already exists"));
}

#[test]
fn terminal_stages() {
    assert!(SaveStage::Saved.is_terminal());
    assert!(SaveStage::Cancelled.is_terminal());
    assert!(SaveStage::Failed.is_terminal());
    assert!(!SaveStage::Persisted.is_terminal());
    assert!(!SaveStage::Start.is_terminal());
    assert_eq!(SaveStage::Persisting.to_string(), "persisting");
}
