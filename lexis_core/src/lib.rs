#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use async_trait::async_trait;
use std::path::Path;

pub mod cascade;
pub mod disambiguate;
pub mod entry;
pub mod error;
pub mod marker;
pub mod overrides;
pub mod registry;
pub mod resolver;
pub mod util;
pub mod wordlist;

pub use cascade::{CacheResolutionCascade, CascadeSettings, Diagnostic, Resolution};
pub use disambiguate::{MatchType, disambiguate};
pub use entry::{
    SimplifiedWordEntry, WordEntry, WordIllustration, WordInflection, WordPronunciation,
    WordRespelling, WordSense,
};
pub use error::{FetchError, LexisError, ParseError, StoreError};
pub use marker::{CleanseRules, MarkerPair, cleanse_text, find_enclosed_text};
pub use overrides::{OverrideMerger, OverrideSet, render_override};
pub use registry::SourceRegistry;
pub use resolver::{PriorityResolution, SourcePriorityResolver};
pub use wordlist::{WordList, WordListEntry};

/// HTTP access used by sources and the audio download step.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Whole-file UTF-8 storage for caches, overrides and the error log.
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn read(&self, path: &Path) -> Result<String, StoreError>;
    async fn write(&self, path: &Path, text: &str) -> Result<(), StoreError>;
    async fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<(), StoreError>;
    async fn append(&self, path: &Path, text: &str) -> Result<(), StoreError>;
    /// Size in bytes, `None` when nothing exists at `path`.
    async fn size(&self, path: &Path) -> Option<u64>;
}

#[async_trait]
pub trait AudioPlayer: Send + Sync {
    async fn play(&self, path: &Path) -> anyhow::Result<()>;
}

/// One configured external lexical source.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    fn source_name(&self) -> &str;

    /// Downloads the raw entry markup. Failures are returned untouched.
    async fn fetch_entry(&self, word: &str) -> Result<String, FetchError>;

    fn parse_definitions(&self, word: &str, raw: &str) -> Result<Vec<String>, ParseError>;

    /// Returns `(form, audio_url)`, both empty when the source has none.
    fn parse_pronunciation(&self, word: &str, raw: &str) -> Result<(String, String), ParseError>;
}

/// Turns raw markup into structured entries.
pub trait EntryParser: Send + Sync {
    fn parse_entries(&self, word: &str, raw: &str) -> Result<Vec<WordEntry>, ParseError>;
}

/// A source whose responses can be both fetched and parsed into entries.
/// The cascade resolves words through one of these.
pub trait EntrySource: SourceAdapter + EntryParser {
    /// File extension of cached raw responses.
    fn cache_extension(&self) -> &str {
        "html"
    }
}
