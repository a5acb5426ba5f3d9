use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use lexis_core::{CascadeSettings, Fetcher};
use lexis_sources::{MarkerSourceConfig, SourceCatalogue, builtin};
// Fetch and playback settings live beside the code that uses them
use lexis_tools::{PlayerConfig, WebFetchConfig};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub fetch: WebFetchConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub overrides: OverridesConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub audio: PlayerConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SourcesConfig {
    /// Source keys consulted in order by `lookup`.
    #[serde(default = "SourcesConfig::default_priority")]
    pub priority: Vec<String>,
    /// Source whose entries feed the cache cascade.
    #[serde(default = "SourcesConfig::default_primary")]
    pub primary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Additional marker sources, or replacements for built-in keys.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub markers: BTreeMap<String, MarkerSourceConfig>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            priority: Self::default_priority(),
            primary: Self::default_primary(),
            api_key: None,
            markers: BTreeMap::new(),
        }
    }
}

impl SourcesConfig {
    fn default_priority() -> Vec<String> {
        builtin::DEFAULT_PRIORITY
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    fn default_primary() -> String {
        builtin::COLLEGIATE.to_string()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CacheConfig {
    #[serde(default = "CacheConfig::default_dir")]
    pub dir: PathBuf,
    #[serde(default = "CacheConfig::default_family")]
    pub family: String,
    #[serde(default = "CacheConfig::default_audio_extension")]
    pub audio_extension: String,
    #[serde(default = "CacheConfig::default_min_entry_bytes")]
    pub min_entry_bytes: u64,
    #[serde(default = "CacheConfig::default_min_audio_bytes")]
    pub min_audio_bytes: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: Self::default_dir(),
            family: Self::default_family(),
            audio_extension: Self::default_audio_extension(),
            min_entry_bytes: Self::default_min_entry_bytes(),
            min_audio_bytes: Self::default_min_audio_bytes(),
        }
    }
}

impl CacheConfig {
    fn default_dir() -> PathBuf {
        PathBuf::from("cache")
    }

    fn default_family() -> String {
        "sb".to_string()
    }

    fn default_audio_extension() -> String {
        "wav".to_string()
    }

    const fn default_min_entry_bytes() -> u64 {
        100
    }

    const fn default_min_audio_bytes() -> u64 {
        1000
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OverridesConfig {
    /// Searched in order; relative entries resolve against the config directory.
    #[serde(default = "OverridesConfig::default_dirs")]
    pub dirs: Vec<PathBuf>,
    #[serde(default = "OverridesConfig::default_prefix")]
    pub prefix: String,
    /// Provenance recorded for override files.
    #[serde(default = "OverridesConfig::default_label")]
    pub label: String,
}

impl Default for OverridesConfig {
    fn default() -> Self {
        Self {
            dirs: Self::default_dirs(),
            prefix: Self::default_prefix(),
            label: Self::default_label(),
        }
    }
}

impl OverridesConfig {
    fn default_dirs() -> Vec<PathBuf> {
        vec![PathBuf::from("override")]
    }

    fn default_prefix() -> String {
        "sb".to_string()
    }

    fn default_label() -> String {
        "Override".to_string()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PathsConfig {
    #[serde(default = "PathsConfig::default_error_log")]
    pub error_log: PathBuf,
    /// Word list used by `resolve` when no words are given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_list: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            error_log: Self::default_error_log(),
            word_list: None,
        }
    }
}

impl PathsConfig {
    fn default_error_log() -> PathBuf {
        PathBuf::from("lexis_errors.log")
    }
}

fn resolve_under(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("lexis"))
    }

    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_dir()?.join("config.json");

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'lexis init' to create config.",
                config_path.display()
            );
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("Invalid config at {}", path.display()))
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    /// Cascade settings with relative paths resolved under `base`.
    #[must_use]
    pub fn cascade_settings(&self, base: &Path) -> CascadeSettings {
        CascadeSettings {
            cache_dir: resolve_under(base, &self.cache.dir),
            cache_family: self.cache.family.clone(),
            audio_extension: self.cache.audio_extension.clone(),
            override_dirs: self
                .overrides
                .dirs
                .iter()
                .map(|dir| resolve_under(base, dir))
                .collect(),
            override_prefix: self.overrides.prefix.clone(),
            min_entry_bytes: self.cache.min_entry_bytes,
            min_audio_bytes: self.cache.min_audio_bytes,
            error_log: resolve_under(base, &self.paths.error_log),
            override_label: self.overrides.label.clone(),
            ..CascadeSettings::default()
        }
    }

    #[must_use]
    pub fn word_list_path(&self, base: &Path) -> Option<PathBuf> {
        self.paths
            .word_list
            .as_deref()
            .map(|path| resolve_under(base, path))
    }

    /// Built-in sources plus every configured marker source.
    #[must_use]
    pub fn catalogue(&self, fetcher: Arc<dyn Fetcher>) -> SourceCatalogue {
        let mut catalogue = SourceCatalogue::with_builtins(fetcher, self.sources.api_key.clone());
        for (key, marker) in &self.sources.markers {
            info!("Configured marker source: {key}");
            catalogue.add_marker(key, marker.clone());
        }
        catalogue
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join("config.json");

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        std::fs::write(&config_path, CONFIG_TEMPLATE)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Add your dictionary API key under sources.api_key");
        println!("   2. Put hand-written overrides in {}", config_dir.join("override").display());
        println!("   3. Run 'lexis resolve <word>' to build the cache");
        println!();
        println!("🔧 Configuration options:");
        println!("   - sources.priority: order in which 'lexis lookup' consults sources");
        println!("   - sources.primary: source whose entries are cached and resolved");
        println!("   - cache.min_entry_bytes / min_audio_bytes: smaller cache files are refetched");
        println!("   - audio.command: player program, {{FILE}} marks the clip path");
        println!();
        Ok(())
    }
}

pub const CONFIG_TEMPLATE: &str = r#"{
  "fetch": {
    "timeout": 10,
    "user_agent": "Mozilla/5.0 (compatible; lexis/1.0)",
    "max_size": 4000000
  },
  "sources": {
    "priority": ["cambridge", "collins", "randomhouse", "google", "freedictionary", "youtube", "oxford", "collegiate"],
    "primary": "collegiate",
    "api_key": "your-dictionaryapi-key-here"
  },
  "cache": {
    "dir": "cache",
    "family": "sb",
    "audio_extension": "wav",
    "min_entry_bytes": 100,
    "min_audio_bytes": 1000
  },
  "overrides": {
    "dirs": ["override"],
    "prefix": "sb",
    "label": "Override"
  },
  "paths": {
    "error_log": "lexis_errors.log"
  },
  "audio": {
    "timeout": 30
  }
}"#;
