use crate::EntityHooks;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Ordered hook layers, attached by registration.
///
/// Base layers apply to every entity type. Typed layers apply to one
/// `entity_type`. The chain for a type is its base layers followed by its
/// typed layers, each group in registration order.
#[derive(Clone, Default)]
pub struct HookRegistry {
    base: Vec<Arc<dyn EntityHooks>>,
    typed: HashMap<String, Vec<Arc<dyn EntityHooks>>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a layer that runs for every entity type.
    pub fn register_base(&mut self, hooks: Arc<dyn EntityHooks>) {
        self.base.push(hooks);
    }

    /// Appends a layer that runs only for `entity_type`.
    pub fn register(&mut self, entity_type: impl Into<String>, hooks: Arc<dyn EntityHooks>) {
        self.typed.entry(entity_type.into()).or_default().push(hooks);
    }

    #[must_use]
    pub fn with_base(mut self, hooks: impl EntityHooks + 'static) -> Self {
        self.register_base(Arc::new(hooks));
        self
    }

    #[must_use]
    pub fn with_type(mut self, entity_type: impl Into<String>, hooks: impl EntityHooks + 'static) -> Self {
        self.register(entity_type, Arc::new(hooks));
        self
    }

    /// The layers that run for `entity_type`, in invocation order.
    pub fn chain(&self, entity_type: &str) -> Vec<&dyn EntityHooks> {
        self.base
            .iter()
            .chain(self.typed.get(entity_type).into_iter().flatten())
            .map(|h| &**h)
            .collect()
    }

    pub fn layer_count(&self, entity_type: &str) -> usize {
        self.base.len() + self.typed.get(entity_type).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty() && self.typed.values().all(Vec::is_empty)
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = |layers: &[Arc<dyn EntityHooks>]| -> Vec<String> {
            layers.iter().map(|h| h.name().to_string()).collect()
        };
        let mut typed: Vec<_> = self
            .typed
            .iter()
            .map(|(t, layers)| (t.as_str(), names(layers.as_slice())))
            .collect();
        typed.sort_by(|a, b| a.0.cmp(b.0));
        f.debug_struct("HookRegistry")
            .field("base", &names(self.base.as_slice()))
            .field("typed", &typed)
            .finish()
    }
}
