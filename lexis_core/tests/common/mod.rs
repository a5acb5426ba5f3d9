//! In-memory collaborators shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use lexis_core::{
    EntryParser, EntrySource, FetchError, Fetcher, FileStore, ParseError, SourceAdapter,
    StoreError, WordEntry, WordPronunciation, WordSense,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn unreachable_network(url: &str) -> FetchError {
    FetchError::Connectivity {
        url: url.to_string(),
        message: "network is unreachable".to_string(),
    }
}

/// A marker-style source answering with fixed results and counting fetches.
pub struct FakeSource {
    name: String,
    definitions: Vec<String>,
    pronunciation: (String, String),
    fails: bool,
    pub fetches: AtomicUsize,
}

impl FakeSource {
    pub fn new(name: &str, definitions: &[&str], form: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            definitions: definitions.iter().map(ToString::to_string).collect(),
            pronunciation: (form.to_string(), url.to_string()),
            fails: false,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn failing(name: &str) -> Self {
        Self {
            fails: true,
            ..Self::new(name, &[], "", "")
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SourceAdapter for FakeSource {
    fn source_name(&self) -> &str {
        &self.name
    }

    async fn fetch_entry(&self, word: &str) -> Result<String, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.fails {
            return Err(unreachable_network(word));
        }
        Ok(format!("<raw {word}>"))
    }

    fn parse_definitions(&self, _word: &str, _raw: &str) -> Result<Vec<String>, ParseError> {
        Ok(self.definitions.clone())
    }

    fn parse_pronunciation(&self, _word: &str, _raw: &str) -> Result<(String, String), ParseError> {
        Ok(self.pronunciation.clone())
    }
}

/// A structured source whose raw format is one entry per line:
/// `entry_word|functional_label|definition|audio_url`.
pub struct LineSource {
    responses: HashMap<String, String>,
    offline: bool,
    pub fetches: AtomicUsize,
}

impl LineSource {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            offline: false,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            offline: true,
            ..Self::new()
        }
    }

    pub fn with_response(mut self, word: &str, raw: &str) -> Self {
        self.responses.insert(word.to_string(), raw.to_string());
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SourceAdapter for LineSource {
    fn source_name(&self) -> &str {
        "Lines"
    }

    async fn fetch_entry(&self, word: &str) -> Result<String, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.offline {
            return Err(unreachable_network(word));
        }
        Ok(self.responses.get(word).cloned().unwrap_or_default())
    }

    fn parse_definitions(&self, word: &str, raw: &str) -> Result<Vec<String>, ParseError> {
        Ok(self
            .parse_entries(word, raw)?
            .into_iter()
            .flat_map(|e| e.senses.into_iter().map(|s| s.definition))
            .collect())
    }

    fn parse_pronunciation(&self, _word: &str, _raw: &str) -> Result<(String, String), ParseError> {
        Ok((String::new(), String::new()))
    }
}

impl EntryParser for LineSource {
    fn parse_entries(&self, _word: &str, raw: &str) -> Result<Vec<WordEntry>, ParseError> {
        Ok(raw
            .lines()
            .filter(|line| !line.starts_with('#'))
            .filter_map(|line| {
                let parts: Vec<&str> = line.split('|').collect();
                if parts.len() < 3 {
                    return None;
                }
                let mut entry = WordEntry::new("Lines", parts[0]);
                entry.functional_label = parts[1].to_string();
                entry.senses.push(WordSense::new(parts[2]));
                if let Some(url) = parts.get(3).filter(|u| !u.is_empty()) {
                    entry.pronunciation = Some(WordPronunciation::new(*url).with_form(parts[0]));
                }
                Some(entry)
            })
            .collect())
    }
}

impl EntrySource for LineSource {
    fn cache_extension(&self) -> &str {
        "txt"
    }
}

/// Serves audio bytes by URL, or fails every call as unreachable.
pub struct FakeFetcher {
    audio: HashMap<String, Vec<u8>>,
    offline: bool,
    pub calls: AtomicUsize,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self {
            audio: HashMap::new(),
            offline: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            offline: true,
            ..Self::new()
        }
    }

    pub fn with_audio(mut self, url: &str, size: usize) -> Self {
        self.audio.insert(url.to_string(), vec![7; size]);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let bytes = self.fetch_bytes(url).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.offline {
            return Err(unreachable_network(url));
        }
        self.audio.get(url).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}

#[derive(Default)]
pub struct MemoryStore {
    files: Mutex<HashMap<PathBuf, Vec<u8>>>,
    pub writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, path: impl Into<PathBuf>, text: &str) {
        lock(&self.files).insert(path.into(), text.as_bytes().to_vec());
    }

    pub fn put_bytes(&self, path: impl Into<PathBuf>, size: usize) {
        lock(&self.files).insert(path.into(), vec![1; size]);
    }

    pub fn text(&self, path: impl AsRef<Path>) -> Option<String> {
        lock(&self.files)
            .get(path.as_ref())
            .map(|b| String::from_utf8_lossy(b).into_owned())
    }

    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        lock(&self.files).contains_key(path.as_ref())
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FileStore for MemoryStore {
    async fn read(&self, path: &Path) -> Result<String, StoreError> {
        self.text(path).ok_or_else(|| StoreError::Io {
            path: path.display().to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        })
    }

    async fn write(&self, path: &Path, text: &str) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.put(path, text);
        Ok(())
    }

    async fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        lock(&self.files).insert(path.to_path_buf(), bytes.to_vec());
        Ok(())
    }

    async fn append(&self, path: &Path, text: &str) -> Result<(), StoreError> {
        lock(&self.files)
            .entry(path.to_path_buf())
            .or_default()
            .extend_from_slice(text.as_bytes());
        Ok(())
    }

    async fn size(&self, path: &Path) -> Option<u64> {
        lock(&self.files).get(path).map(|b| b.len() as u64)
    }
}
