use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use crate::SourceAdapter;
use crate::error::LexisError;

/// Named sources, looked up through a priority list held as data.
pub struct SourceRegistry {
    sources: HashMap<String, Arc<dyn SourceAdapter>>,
}

impl SourceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sources: HashMap::new(),
        }
    }

    /// Registers `source` under `key`, replacing any previous source with that key.
    pub fn register(&mut self, key: &str, source: Arc<dyn SourceAdapter>) {
        info!("Registering source: {key} ({})", source.source_name());
        self.sources.insert(key.to_string(), source);
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<Arc<dyn SourceAdapter>> {
        self.sources.get(key).cloned()
    }

    pub fn require(&self, key: &str) -> Result<Arc<dyn SourceAdapter>, LexisError> {
        self.get(key)
            .ok_or_else(|| LexisError::UnknownSource(key.to_string()))
    }

    /// Resolves a priority list into adapters, skipping unknown keys.
    #[must_use]
    pub fn ordered(&self, priority: &[String]) -> Vec<Arc<dyn SourceAdapter>> {
        priority
            .iter()
            .filter_map(|key| {
                let source = self.get(key);
                if source.is_none() {
                    warn!("Source in priority list is not registered: {key}");
                }
                source
            })
            .collect()
    }

    /// Registered keys, sorted.
    #[must_use]
    pub fn list(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.sources.keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
