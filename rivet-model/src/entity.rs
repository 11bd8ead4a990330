use crate::{EntityState, ModelError, ModelResult, SaveMode};
use rivet_types::{EntityId, now_millis};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A generic record persisted through the save lifecycle.
///
/// The `data` field holds arbitrary JSON whose structure is defined by the
/// application for each `entity_type`. Fields are addressed with JSON
/// pointers (e.g. `"/friendly_name"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub entity_type: String,
    pub data: Value,
    pub created_at: i64,
    pub modified_at: i64,
    pub created_by: String,
    /// Not serialized: anything read back from storage is clean.
    #[serde(skip, default = "persisted_state")]
    pub state: EntityState,
}

fn persisted_state() -> EntityState {
    EntityState::Clean
}

impl Entity {
    /// Creates an entity that has never been persisted.
    pub fn new(entity_type: impl Into<String>, data: Value, created_by: impl Into<String>) -> Self {
        let now = now_millis();
        Self {
            id: EntityId::new(),
            entity_type: entity_type.into(),
            data,
            created_at: now,
            modified_at: now,
            created_by: created_by.into(),
            state: EntityState::New,
        }
    }

    /// Extract a string value from `data` using a JSON pointer (e.g., "/title").
    pub fn get_str(&self, pointer: &str) -> Option<&str> {
        self.data.pointer(pointer).and_then(|v| v.as_str())
    }

    /// Extract a boolean value from `data` using a JSON pointer.
    pub fn get_bool(&self, pointer: &str) -> Option<bool> {
        self.data.pointer(pointer).and_then(|v| v.as_bool())
    }

    /// Extract a numeric value from `data` using a JSON pointer.
    pub fn get_number(&self, pointer: &str) -> Option<f64> {
        self.data.pointer(pointer).and_then(|v| v.as_f64())
    }

    /// Returns true when the field is missing, null, or an empty string.
    pub fn is_blank(&self, pointer: &str) -> bool {
        match self.data.pointer(pointer) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(_) => false,
        }
    }

    /// Writes `value` at `pointer`, creating intermediate objects as needed.
    ///
    /// A clean entity becomes dirty; a new entity stays new.
    pub fn set(&mut self, pointer: &str, value: Value) -> ModelResult<()> {
        let segments = parse_pointer(pointer)?;
        if self.data.is_null() {
            self.data = Value::Object(Map::new());
        }

        let mut current = &mut self.data;
        let mut walked = String::new();
        for segment in &segments[..segments.len() - 1] {
            let Value::Object(map) = current else {
                return Err(ModelError::NotAnObject(display_path(&walked)));
            };
            walked.push('/');
            walked.push_str(segment);
            current = map
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Map::new()));
        }

        let Value::Object(map) = current else {
            return Err(ModelError::NotAnObject(display_path(&walked)));
        };
        map.insert(segments[segments.len() - 1].clone(), value);
        self.touch();
        Ok(())
    }

    /// Marks a clean entity dirty. New and dirty entities are unchanged.
    pub fn touch(&mut self) {
        if self.state == EntityState::Clean {
            self.state = EntityState::Dirty;
        }
    }

    #[must_use]
    pub fn is_new(&self) -> bool {
        self.state == EntityState::New
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.state == EntityState::Dirty
    }

    /// Insert for an entity that has never been persisted, update otherwise.
    #[must_use]
    pub fn save_mode(&self) -> SaveMode {
        self.state.save_mode()
    }

    /// Records that the current contents have been persisted.
    pub fn mark_persisted(&mut self) {
        self.state = EntityState::Clean;
    }
}

fn parse_pointer(pointer: &str) -> ModelResult<Vec<String>> {
    let Some(rest) = pointer.strip_prefix('/') else {
        return Err(ModelError::InvalidPointer(pointer.to_string()));
    };
    Ok(rest
        .split('/')
        .map(|s| s.replace("~1", "/").replace("~0", "~"))
        .collect())
}

fn display_path(walked: &str) -> String {
    if walked.is_empty() { "/".to_string() } else { walked.to_string() }
}
