use lexis_core::{EntrySource, Fetcher, LexisError, SourceAdapter, SourceRegistry};
use std::collections::HashMap;
use std::sync::Arc;

use crate::builtin;
use crate::collegiate::{CollegiateConfig, CollegiateSource};
use crate::marker_source::{MarkerSource, MarkerSourceConfig};

/// Every configured source, reachable both as a lookup adapter (for priority
/// resolution) and as an entry source (for the cache cascade).
pub struct SourceCatalogue {
    registry: SourceRegistry,
    entry_sources: HashMap<String, Arc<dyn EntrySource>>,
    fetcher: Arc<dyn Fetcher>,
}

impl SourceCatalogue {
    #[must_use]
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            registry: SourceRegistry::new(),
            entry_sources: HashMap::new(),
            fetcher,
        }
    }

    /// All built-in sources. `api_key` is handed to the collegiate API.
    #[must_use]
    pub fn with_builtins(fetcher: Arc<dyn Fetcher>, api_key: Option<String>) -> Self {
        let mut catalogue = Self::new(fetcher);
        for key in builtin::DEFAULT_PRIORITY {
            if let Some(config) = builtin::marker_config(key) {
                catalogue.add_marker(key, config);
            }
        }
        catalogue.add_collegiate(
            builtin::COLLEGIATE,
            CollegiateConfig {
                api_key,
                ..builtin::collegiate()
            },
        );
        catalogue
    }

    pub fn add_marker(&mut self, key: &str, config: MarkerSourceConfig) {
        let source = Arc::new(MarkerSource::new(config, Arc::clone(&self.fetcher)));
        self.insert(key, &source);
    }

    pub fn add_collegiate(&mut self, key: &str, config: CollegiateConfig) {
        let source = Arc::new(CollegiateSource::new(config, Arc::clone(&self.fetcher)));
        self.insert(key, &source);
    }

    fn insert<S: EntrySource + 'static>(&mut self, key: &str, source: &Arc<S>) {
        self.registry
            .register(key, Arc::clone(source) as Arc<dyn SourceAdapter>);
        self.entry_sources
            .insert(key.to_string(), Arc::clone(source) as Arc<dyn EntrySource>);
    }

    #[must_use]
    pub const fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    pub fn entry_source(&self, key: &str) -> Result<Arc<dyn EntrySource>, LexisError> {
        self.entry_sources
            .get(key)
            .cloned()
            .ok_or_else(|| LexisError::UnknownSource(key.to_string()))
    }
}
