use std::path::{Path, PathBuf};

use crate::util::sanitize_filename;

/// File locations consulted while resolving one word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachePaths {
    pub entry: PathBuf,
    pub audio: PathBuf,
    /// Override file names, searched for across the override directories.
    pub definition_override: String,
    pub pronunciation_override: String,
    pub tip_override: String,
}

impl CachePaths {
    #[must_use]
    pub fn new(
        cache_dir: &Path,
        family: &str,
        override_prefix: &str,
        word: &str,
        entry_extension: &str,
        audio_extension: &str,
    ) -> Self {
        let stem = sanitize_filename(word);
        Self {
            entry: cache_dir.join(format!("{family}_{stem}.{entry_extension}")),
            audio: cache_dir.join(format!("{family}_{stem}.{audio_extension}")),
            definition_override: format!("{override_prefix}_{stem}.dat"),
            pronunciation_override: format!("{override_prefix}_{stem}.mp3"),
            tip_override: format!("{override_prefix}_{stem}.msg"),
        }
    }
}
