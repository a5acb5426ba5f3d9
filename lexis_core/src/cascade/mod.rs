//! Per-word resolution through cache, network and override layers.
//!
//! Definitions and pronunciation resolve on two independent tracks that share
//! one entry:
//!
//! 1. cached raw entry, else a network fetch that is written back to the cache
//! 2. definition override file, then the inline word-list definition
//! 3. cached audio, else an audio download that is written back to the cache
//! 4. pronunciation override file
//!
//! A connectivity failure switches the cascade offline for the rest of the run.
//! Nothing here fails a word: the outcome is always an entry plus diagnostics.

mod diagnostics;
mod paths;

use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::disambiguate::disambiguate;
use crate::entry::{SimplifiedWordEntry, WordEntry, WordPronunciation};
use crate::error::FetchError;
use crate::overrides::{OverrideMerger, OverrideSet};
use crate::wordlist::WordListEntry;
use crate::{EntrySource, Fetcher, FileStore};

pub use diagnostics::{CACHE_SENTINEL, Diagnostic, diagnose, error_line};
pub use paths::CachePaths;

#[derive(Debug, Clone)]
pub struct CascadeSettings {
    pub cache_dir: PathBuf,
    /// Prefix of cached entry and audio file names.
    pub cache_family: String,
    pub audio_extension: String,
    /// Searched in order; the first directory holding the file wins.
    pub override_dirs: Vec<PathBuf>,
    pub override_prefix: String,
    /// Cached entries at or below this size are misses.
    pub min_entry_bytes: u64,
    /// Cached audio at or below this size is a miss.
    pub min_audio_bytes: u64,
    pub error_log: PathBuf,
    pub override_label: String,
    pub word_list_label: String,
}

impl Default for CascadeSettings {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from("cache"),
            cache_family: "sb".to_string(),
            audio_extension: "wav".to_string(),
            override_dirs: vec![PathBuf::from("override")],
            override_prefix: "sb".to_string(),
            min_entry_bytes: 100,
            min_audio_bytes: 1000,
            error_log: PathBuf::from("lexis_errors.log"),
            override_label: "Override".to_string(),
            word_list_label: "Word List".to_string(),
        }
    }
}

/// The resolved entry for one word together with what is still wrong with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub entry: SimplifiedWordEntry,
    pub diagnostics: Vec<Diagnostic>,
    /// Free-form study note from a `.msg` override file.
    pub tip: Option<String>,
}

impl Resolution {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

pub struct CacheResolutionCascade {
    primary: Arc<dyn EntrySource>,
    fetcher: Arc<dyn Fetcher>,
    store: Arc<dyn FileStore>,
    settings: CascadeSettings,
    override_merger: OverrideMerger,
    word_list_merger: OverrideMerger,
    offline: bool,
}

impl CacheResolutionCascade {
    #[must_use]
    pub fn new(
        primary: Arc<dyn EntrySource>,
        fetcher: Arc<dyn Fetcher>,
        store: Arc<dyn FileStore>,
        settings: CascadeSettings,
    ) -> Self {
        let override_merger = OverrideMerger::new(settings.override_label.clone());
        let word_list_merger = OverrideMerger::new(settings.word_list_label.clone());
        Self {
            primary,
            fetcher,
            store,
            settings,
            override_merger,
            word_list_merger,
            offline: false,
        }
    }

    /// Starts the run with network steps already disabled.
    #[must_use]
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    #[must_use]
    pub const fn is_offline(&self) -> bool {
        self.offline
    }

    #[must_use]
    pub const fn settings(&self) -> &CascadeSettings {
        &self.settings
    }

    fn paths_for(&self, word: &str) -> CachePaths {
        CachePaths::new(
            &self.settings.cache_dir,
            &self.settings.cache_family,
            &self.settings.override_prefix,
            word,
            self.primary.cache_extension(),
            &self.settings.audio_extension,
        )
    }

    /// Resolves every item in order, one word at a time.
    pub async fn resolve_all(&mut self, items: &[WordListEntry]) -> Vec<Resolution> {
        let mut resolutions = Vec::with_capacity(items.len());
        for item in items {
            resolutions.push(self.resolve(item).await);
        }
        resolutions
    }

    pub async fn resolve(&mut self, item: &WordListEntry) -> Resolution {
        let word = item.word.trim();
        let paths = self.paths_for(word);

        let entries = self.load_entries(word, &paths).await;
        let mut entry = disambiguate(word, &entries);

        if let Some(text) = self.find_override(&paths.definition_override).await {
            info!("Applying definition override for '{word}'");
            entry = self
                .override_merger
                .merge(entry, word, &OverrideSet::from_text(&text));
        }

        if let Some(definition) = &item.inline_definition {
            entry = self
                .word_list_merger
                .merge(entry, word, &OverrideSet::parse([format!("* {definition}")]));
        }

        entry = self.bind_audio(word, entry, &paths).await;

        if let Some(path) = self.find_override_path(&paths.pronunciation_override).await {
            info!("Applying pronunciation override for '{word}'");
            // The override clip speaks the queried word itself.
            let mut pronunciation = entry
                .pronunciation
                .take()
                .unwrap_or_default()
                .with_form(word);
            pronunciation.audio_file = path.display().to_string();
            entry.pronunciation = Some(pronunciation);
        }

        let tip = self
            .find_override(&paths.tip_override)
            .await
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());

        let diagnostics = diagnose(word, &entry, item.mispronounced);
        if let Some(line) = error_line(word, &diagnostics) {
            warn!("{}", line.trim_end());
            if let Err(e) = self.store.append(&self.settings.error_log, &line).await {
                warn!("Failed to append to error log: {e}");
            }
        }

        Resolution {
            entry,
            diagnostics,
            tip,
        }
    }

    async fn load_entries(&mut self, word: &str, paths: &CachePaths) -> Vec<WordEntry> {
        let cached = self
            .store
            .size(&paths.entry)
            .await
            .is_some_and(|size| size > self.settings.min_entry_bytes);

        let raw = if cached {
            debug!(word, path = %paths.entry.display(), "Entry cache hit");
            match self.store.read(&paths.entry).await {
                Ok(raw) => Some(raw),
                Err(e) => {
                    warn!("Failed to read cached entry for '{word}': {e}");
                    self.download_entry(word, paths).await
                }
            }
        } else {
            self.download_entry(word, paths).await
        };

        let Some(raw) = raw else {
            return Vec::new();
        };

        match self.primary.parse_entries(word, &raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Entry for '{word}' from {} unreadable: {e}", self.primary.source_name());
                Vec::new()
            }
        }
    }

    async fn download_entry(&mut self, word: &str, paths: &CachePaths) -> Option<String> {
        if self.offline {
            debug!(word, "Offline, skipping entry download");
            return None;
        }

        match self.primary.fetch_entry(word).await {
            Ok(raw) => {
                if let Err(e) = self.store.write(&paths.entry, &raw).await {
                    warn!("Failed to cache entry for '{word}': {e}");
                }
                Some(raw)
            }
            Err(e) => {
                self.note_fetch_failure(word, &e);
                None
            }
        }
    }

    async fn bind_audio(
        &mut self,
        word: &str,
        mut entry: SimplifiedWordEntry,
        paths: &CachePaths,
    ) -> SimplifiedWordEntry {
        let cached_size = self.store.size(&paths.audio).await;
        let audio_file = paths.audio.display().to_string();

        if cached_size.is_some_and(|size| size > self.settings.min_audio_bytes) {
            debug!(word, path = %audio_file, "Audio cache hit");
            let mut pronunciation = entry.pronunciation.take().unwrap_or_else(|| WordPronunciation {
                audio_url: CACHE_SENTINEL.to_string(),
                form: CACHE_SENTINEL.to_string(),
                spelling: CACHE_SENTINEL.to_string(),
                ..WordPronunciation::default()
            });
            pronunciation.audio_file = audio_file;
            entry.pronunciation = Some(pronunciation);
            return entry;
        }

        if self.offline {
            return entry;
        }

        let Some(url) = entry
            .pronunciation
            .as_ref()
            .map(|p| p.audio_url.clone())
            .filter(|url| !url.is_empty() && url != CACHE_SENTINEL)
        else {
            return entry;
        };

        match self.fetcher.fetch_bytes(&url).await {
            Ok(bytes) => {
                if let Err(e) = self.store.write_bytes(&paths.audio, &bytes).await {
                    warn!("Failed to cache audio for '{word}': {e}");
                    return entry;
                }
                if let Some(pronunciation) = entry.pronunciation.as_mut() {
                    pronunciation.audio_file = audio_file;
                }
            }
            Err(e) => self.note_fetch_failure(word, &e),
        }
        entry
    }

    fn note_fetch_failure(&mut self, word: &str, error: &FetchError) {
        if error.is_connectivity() {
            warn!("Network unreachable while resolving '{word}', continuing offline: {error}");
            self.offline = true;
        } else {
            warn!("Fetch failed for '{word}': {error}");
        }
    }

    async fn find_override_path(&self, file_name: &str) -> Option<PathBuf> {
        for dir in &self.settings.override_dirs {
            let path = dir.join(file_name);
            if self.store.size(&path).await.is_some_and(|size| size > 0) {
                return Some(path);
            }
        }
        None
    }

    async fn find_override(&self, file_name: &str) -> Option<String> {
        let path = self.find_override_path(file_name).await?;
        match self.store.read(&path).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("Failed to read override {}: {e}", path.display());
                None
            }
        }
    }
}
