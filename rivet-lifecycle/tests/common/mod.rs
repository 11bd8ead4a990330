#![allow(dead_code)]

use async_trait::async_trait;
use rivet_lifecycle::{EntityRepository, MemoryRepository, RepositoryError, RepositoryResult};
use rivet_model::{Entity, EntityHooks, HookDecision, HookError, SaveMode, ValidationFailure};
use rivet_types::EntityId;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

/// Shared, ordered record of every hook and repository call.
pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn new_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn calls(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// What a [`ScriptedHooks`] layer does at each stage.
#[derive(Debug, Clone, Default)]
pub struct Script {
    pub validating_fault: bool,
    pub validation_failure: Option<String>,
    pub decision: HookDecision,
    pub saving_fault: bool,
    pub saved_fault: bool,
}

/// A hook layer that logs each call as `"{name}:{stage}"` and follows a script.
pub struct ScriptedHooks {
    pub name: String,
    pub script: Script,
    pub log: CallLog,
}

impl ScriptedHooks {
    pub fn new(name: &str, log: &CallLog) -> Self {
        Self::scripted(name, Script::default(), log)
    }

    pub fn scripted(name: &str, script: Script, log: &CallLog) -> Self {
        Self {
            name: name.to_string(),
            script,
            log: Arc::clone(log),
        }
    }

    fn record(&self, stage: &str) {
        self.log.lock().unwrap().push(format!("{}:{}", self.name, stage));
    }
}

#[async_trait]
impl EntityHooks for ScriptedHooks {
    fn name(&self) -> &str {
        &self.name
    }

    async fn on_validating(&self, _entity: &mut Entity) -> Result<(), HookError> {
        self.record("on_validating");
        if self.script.validating_fault {
            return Err(HookError::new("on_validating blew up"));
        }
        Ok(())
    }

    async fn validate(&self, _entity: &Entity) -> Result<(), ValidationFailure> {
        self.record("validate");
        match &self.script.validation_failure {
            Some(message) => Err(ValidationFailure::new(message.clone())),
            None => Ok(()),
        }
    }

    async fn on_saving(&self, _entity: &Entity, mode: SaveMode) -> Result<HookDecision, HookError> {
        self.record(&format!("on_saving({mode})"));
        if self.script.saving_fault {
            return Err(HookError::new("on_saving blew up"));
        }
        Ok(self.script.decision.clone())
    }

    async fn on_saved(&self, _entity: &Entity, mode: SaveMode) -> Result<(), HookError> {
        self.record(&format!("on_saved({mode})"));
        if self.script.saved_fault {
            return Err(HookError::new("on_saved blew up"));
        }
        Ok(())
    }
}

/// Wraps a [`MemoryRepository`], logging `"persist({mode})"` and optionally failing.
pub struct RecordingRepository {
    pub inner: MemoryRepository,
    pub log: CallLog,
    pub fail: AtomicBool,
    pub persist_calls: AtomicUsize,
}

impl RecordingRepository {
    pub fn new(log: &CallLog) -> Self {
        Self {
            inner: MemoryRepository::new(),
            log: Arc::clone(log),
            fail: AtomicBool::new(false),
            persist_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(log: &CallLog) -> Self {
        let repo = Self::new(log);
        repo.fail.store(true, Ordering::SeqCst);
        repo
    }

    pub fn persist_count(&self) -> usize {
        self.persist_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EntityRepository for RecordingRepository {
    async fn persist(&self, entity: &Entity, mode: SaveMode) -> RepositoryResult<()> {
        self.persist_calls.fetch_add(1, Ordering::SeqCst);
        self.log.lock().unwrap().push(format!("persist({mode})"));
        if self.fail.load(Ordering::SeqCst) {
            return Err(RepositoryError::Backend("store unavailable".into()));
        }
        self.inner.persist(entity, mode).await
    }

    async fn load(&self, id: &EntityId) -> RepositoryResult<Option<Entity>> {
        self.inner.load(id).await
    }
}

/// Supplier rules: derive the friendly name from the official name, then
/// require a friendly name.
pub struct SupplierHooks;

#[async_trait]
impl EntityHooks for SupplierHooks {
    fn name(&self) -> &str {
        "supplier"
    }

    async fn on_validating(&self, entity: &mut Entity) -> Result<(), HookError> {
        if entity.is_blank("/friendly_name") && !entity.is_blank("/official_name") {
            let official = entity.get_str("/official_name").unwrap_or_default().to_string();
            entity
                .set("/friendly_name", serde_json::Value::String(official))
                .map_err(|e| HookError::with_source("derive friendly name", e))?;
        }
        Ok(())
    }

    async fn validate(&self, entity: &Entity) -> Result<(), ValidationFailure> {
        if entity.is_blank("/friendly_name") {
            return Err(ValidationFailure::field("/friendly_name", "friendly name is required"));
        }
        Ok(())
    }
}

/// Sends a "welcome" notification the first time an entity is inserted.
pub struct WelcomeNotifier {
    pub sent: Arc<AtomicUsize>,
}

#[async_trait]
impl EntityHooks for WelcomeNotifier {
    fn name(&self) -> &str {
        "welcome-notifier"
    }

    async fn on_saved(&self, _entity: &Entity, mode: SaveMode) -> Result<(), HookError> {
        if mode.is_insert() {
            // Stands in for an async call to a notification service.
            tokio::task::yield_now().await;
            self.sent.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }
}
