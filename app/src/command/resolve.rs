//! Resolves words through the cache cascade and reports what is missing.

use anyhow::Context;
use lexis_core::{AudioPlayer, Resolution, WordList};
use lexis_tools::CommandPlayer;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::AppContext;

/// Input parameters for the Resolve command strategy.
#[derive(Debug, Clone)]
pub struct ResolveInput {
    /// Words given on the command line; take precedence over any list file.
    pub words: Vec<String>,
    pub list: Option<PathBuf>,
    /// Skip every network step.
    pub offline: bool,
    /// Play each bound audio clip after printing the entry.
    pub play: bool,
}

/// Strategy for resolving a word list.
///
/// Words are processed one after another. Each is printed with its
/// diagnostics; failures are appended to the configured error log by the
/// cascade itself.
#[derive(Debug, Clone, Copy)]
pub struct ResolveStrategy;

impl super::CommandStrategy for ResolveStrategy {
    type Input = ResolveInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let context = AppContext::load()?;
        let words = if input.words.is_empty() {
            let path = input
                .list
                .clone()
                .or_else(|| context.config.word_list_path(&context.base_dir))
                .context("No words given and no word list configured")?;
            read_word_list(&path).await?
        } else {
            WordList::from_words(input.words)
        };
        info!("Resolving {} word(s)", words.len());

        let mut cascade = context.cascade(input.offline)?;
        let player = input
            .play
            .then(|| CommandPlayer::new(context.config.audio.clone()));

        let mut incomplete = 0usize;
        for item in &words.entries {
            let resolution = cascade.resolve(item).await;
            print_resolution(&resolution);
            if !resolution.is_complete() {
                incomplete += 1;
            }

            if let Some(player) = &player {
                play(player, &resolution).await;
            }
        }

        println!(
            "{} word(s) resolved, {incomplete} with diagnostics{}",
            words.len(),
            if cascade.is_offline() { " (offline)" } else { "" }
        );
        Ok(())
    }
}

async fn read_word_list(path: &Path) -> anyhow::Result<WordList> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read word list {}", path.display()))?;
    Ok(WordList::parse(&text))
}

fn print_resolution(resolution: &Resolution) {
    println!("{}", resolution.entry);
    if let Some(tip) = &resolution.tip {
        println!("Tip: {tip}");
    }
    for diagnostic in &resolution.diagnostics {
        println!("!! {diagnostic}");
    }
    println!();
}

async fn play(player: &CommandPlayer, resolution: &Resolution) {
    let Some(file) = resolution
        .entry
        .pronunciation
        .as_ref()
        .map(|p| p.audio_file.as_str())
        .filter(|f| !f.is_empty())
    else {
        return;
    };
    if let Err(e) = player.play(Path::new(file)).await {
        warn!("Playback failed for '{}': {e:#}", resolution.entry.key_word);
    }
}
