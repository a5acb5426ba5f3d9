//! Sources described entirely by pattern markers over their HTML.

use async_trait::async_trait;
use lexis_core::marker::{CleanseRules, MarkerPair, find_enclosed_text, find_first_enclosed};
use lexis_core::{
    EntryParser, EntrySource, FetchError, Fetcher, ParseError, SourceAdapter, WordEntry,
    WordPronunciation, WordSense,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Declarative description of a marker-scraped source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerSourceConfig {
    pub name: String,
    /// Entry page URL; `{WORD}` and `{KEY}` are substituted.
    pub entry_url: String,
    /// Audio URL; `{PATH}` receives the matched pronunciation fragment.
    pub audio_url: String,
    pub api_key: Option<String>,
    pub cleanse: CleanseRules,
    /// Results of every pair are concatenated in pair order.
    pub definition_markers: Vec<MarkerPair>,
    pub pronunciation_url_marker: Option<MarkerPair>,
    pub pronunciation_word_marker: Option<MarkerPair>,
}

impl MarkerSourceConfig {
    #[must_use]
    pub fn build_entry_url(&self, word: &str) -> String {
        self.entry_url
            .replace("{WORD}", word)
            .replace("{KEY}", self.api_key.as_deref().unwrap_or_default())
            .replace(' ', "%20")
    }

    #[must_use]
    pub fn build_audio_url(&self, path: &str) -> String {
        self.audio_url.replace("{PATH}", path)
    }
}

pub struct MarkerSource {
    config: Arc<MarkerSourceConfig>,
    fetcher: Arc<dyn Fetcher>,
}

impl MarkerSource {
    #[must_use]
    pub fn new(config: MarkerSourceConfig, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            config: Arc::new(config),
            fetcher,
        }
    }

    #[must_use]
    pub fn config(&self) -> &MarkerSourceConfig {
        &self.config
    }
}

/// Extracts definitions from `raw` under `config`.
#[must_use]
pub fn extract_definitions(config: &MarkerSourceConfig, raw: &str) -> Vec<String> {
    let text = config.cleanse.apply(raw);
    config
        .definition_markers
        .iter()
        .flat_map(|pair| find_enclosed_text(&pair.start, &pair.end, &text))
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .collect()
}

/// Extracts `(form, audio_url)`; the form is only read once an audio URL matched.
#[must_use]
pub fn extract_pronunciation(config: &MarkerSourceConfig, raw: &str) -> (String, String) {
    let Some(url_marker) = &config.pronunciation_url_marker else {
        return (String::new(), String::new());
    };
    let text = config.cleanse.apply(raw);
    let Some(path) = find_first_enclosed(&url_marker.start, &url_marker.end, &text) else {
        return (String::new(), String::new());
    };

    let url = config.build_audio_url(&path);
    let form = config
        .pronunciation_word_marker
        .as_ref()
        .and_then(|m| find_first_enclosed(&m.start, &m.end, &text))
        .map(|w| w.trim().to_string())
        .unwrap_or_default();
    (form, url)
}

#[async_trait]
impl SourceAdapter for MarkerSource {
    fn source_name(&self) -> &str {
        &self.config.name
    }

    async fn fetch_entry(&self, word: &str) -> Result<String, FetchError> {
        let url = self.config.build_entry_url(word);
        debug!(source = %self.config.name, url = %url, "Fetching entry");
        self.fetcher.fetch_text(&url).await
    }

    fn parse_definitions(&self, _word: &str, raw: &str) -> Result<Vec<String>, ParseError> {
        Ok(extract_definitions(&self.config, raw))
    }

    fn parse_pronunciation(&self, _word: &str, raw: &str) -> Result<(String, String), ParseError> {
        Ok(extract_pronunciation(&self.config, raw))
    }
}

/// A marker source yields at most one entry: its definitions and pronunciation
/// attached to the queried word.
impl EntryParser for MarkerSource {
    fn parse_entries(&self, word: &str, raw: &str) -> Result<Vec<WordEntry>, ParseError> {
        let definitions = extract_definitions(&self.config, raw);
        let (form, url) = extract_pronunciation(&self.config, raw);
        if definitions.is_empty() && form.is_empty() {
            return Ok(Vec::new());
        }

        let mut entry = WordEntry::new(self.config.name.clone(), word);
        entry.head_word = word.to_string();
        entry.senses = definitions.into_iter().map(WordSense::new).collect();
        if !form.is_empty() {
            entry.pronunciation = Some(WordPronunciation::new(url).with_form(&form));
        }
        Ok(vec![entry])
    }
}

impl EntrySource for MarkerSource {}
