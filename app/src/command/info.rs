use lexis_config::Config;
use lexis_core::{LexisError, SourceAdapter};
use lexis_tools::HttpFetcher;
use std::sync::Arc;

/// Strategy for displaying configuration information.
///
/// This strategy outputs:
/// - Source priority, primary source and API key (masked)
/// - Cache, override and log locations
/// - Fetch and audio player settings
///
/// # Design
/// - Static dispatch: All method calls are monomorphized
/// - Stateless: No internal state
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let base_dir = Config::config_dir()?;
        let settings = config.cascade_settings(&base_dir);

        println!("=== lexis Configuration ===\n");

        println!("Sources:");
        let catalogue = config.catalogue(Arc::new(HttpFetcher::new(config.fetch.clone())?));
        for key in &config.sources.priority {
            let status = match catalogue.registry().require(key) {
                Ok(source) => source.source_name().to_string(),
                Err(LexisError::UnknownSource(_)) => "(not registered)".to_string(),
                Err(e) => e.to_string(),
            };
            println!("  {key}: {status}");
        }
        println!("  Primary: {}", config.sources.primary);
        println!(
            "  API Key: {}",
            config
                .sources
                .api_key
                .as_deref()
                .map_or_else(|| "(not set)".to_string(), mask)
        );
        println!();

        println!("Cache:");
        println!("  Directory: {}", settings.cache_dir.display());
        println!("  Family: {}", settings.cache_family);
        println!("  Min Entry Bytes: {}", settings.min_entry_bytes);
        println!("  Min Audio Bytes: {}", settings.min_audio_bytes);
        println!();

        println!("Overrides:");
        for dir in &settings.override_dirs {
            println!("  {}", dir.display());
        }
        println!("  Prefix: {}", settings.override_prefix);
        println!();

        println!("Error Log: {}", settings.error_log.display());
        if let Some(list) = config.word_list_path(&base_dir) {
            println!("Word List: {}", list.display());
        }
        println!();

        println!("Fetch:");
        println!("  Timeout: {}s", config.fetch.timeout);
        println!("  User Agent: {}", config.fetch.user_agent);
        println!("  Max Size: {}", config.fetch.max_size);
        println!();

        println!("Audio:");
        println!(
            "  Command: {} {}",
            config.audio.command.program,
            config.audio.command.args.join(" ")
        );
        println!("  Timeout: {}s", config.audio.timeout);

        Ok(())
    }
}

fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "***".to_string()
    }
}
