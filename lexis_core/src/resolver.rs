//! Walks sources in priority order, taking the first definitions and the first
//! pronunciation found. The two may come from different sources.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::SourceAdapter;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriorityResolution {
    pub definitions: Vec<String>,
    pub definition_source: String,
    pub pronunciation_form: String,
    pub pronunciation_url: String,
    pub pronunciation_source: String,
}

impl PriorityResolution {
    #[must_use]
    pub fn has_definitions(&self) -> bool {
        !self.definitions.is_empty()
    }

    #[must_use]
    pub fn has_pronunciation(&self) -> bool {
        !self.pronunciation_form.is_empty()
    }
}

/// What one source returned for a word, successful or not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceReport {
    pub source: String,
    pub definitions: Vec<String>,
    pub pronunciation_form: String,
    pub pronunciation_url: String,
    pub error: Option<String>,
}

pub struct SourcePriorityResolver {
    sources: Vec<Arc<dyn SourceAdapter>>,
}

impl SourcePriorityResolver {
    #[must_use]
    pub fn new(sources: Vec<Arc<dyn SourceAdapter>>) -> Self {
        Self { sources }
    }

    #[must_use]
    pub fn sources(&self) -> &[Arc<dyn SourceAdapter>] {
        &self.sources
    }

    pub async fn resolve(&self, word: &str) -> PriorityResolution {
        let mut resolution = PriorityResolution::default();

        for source in &self.sources {
            if resolution.has_definitions() && resolution.has_pronunciation() {
                break;
            }

            let name = source.source_name();
            let raw = match source.fetch_entry(word).await {
                Ok(raw) => raw,
                Err(e) => {
                    warn!("Fetch from {name} failed for '{word}': {e}");
                    continue;
                }
            };

            if !resolution.has_definitions() {
                match source.parse_definitions(word, &raw) {
                    Ok(definitions) if !definitions.is_empty() => {
                        debug!(source = name, count = definitions.len(), "Accepted definitions");
                        resolution.definitions = definitions;
                        resolution.definition_source = name.to_string();
                    }
                    Ok(_) => {}
                    Err(e) => warn!("Definitions from {name} unreadable for '{word}': {e}"),
                }
            }

            if !resolution.has_pronunciation() {
                match source.parse_pronunciation(word, &raw) {
                    Ok((form, url)) if !form.is_empty() => {
                        debug!(source = name, form = %form, "Accepted pronunciation");
                        resolution.pronunciation_form = form;
                        resolution.pronunciation_url = url;
                        resolution.pronunciation_source = name.to_string();
                    }
                    Ok(_) => {}
                    Err(e) => warn!("Pronunciation from {name} unreadable for '{word}': {e}"),
                }
            }
        }

        info!(
            "Resolved '{word}': definitions from [{}], pronunciation from [{}]",
            resolution.definition_source, resolution.pronunciation_source
        );
        resolution
    }

    /// Queries every source independently.
    pub async fn lookup_each(&self, word: &str) -> Vec<SourceReport> {
        let mut reports = Vec::with_capacity(self.sources.len());
        for source in &self.sources {
            let mut report = SourceReport {
                source: source.source_name().to_string(),
                ..SourceReport::default()
            };
            match source.fetch_entry(word).await {
                Ok(raw) => {
                    match source.parse_definitions(word, &raw) {
                        Ok(definitions) => report.definitions = definitions,
                        Err(e) => report.error = Some(e.to_string()),
                    }
                    match source.parse_pronunciation(word, &raw) {
                        Ok((form, url)) => {
                            report.pronunciation_form = form;
                            report.pronunciation_url = url;
                        }
                        Err(e) => report.error = Some(e.to_string()),
                    }
                }
                Err(e) => report.error = Some(e.to_string()),
            }
            reports.push(report);
        }
        reports
    }
}
