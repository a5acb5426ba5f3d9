use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use lexis_core::AudioPlayer;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::command_runner::{CommandSpec, build_command, default_player};

/// Audio playback configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Player program and arguments; `{FILE}` marks the clip path.
    #[serde(default = "default_player")]
    pub command: CommandSpec,

    /// Seconds before a hung player is abandoned
    #[serde(default = "PlayerConfig::default_timeout")]
    pub timeout: u64,
}

impl PlayerConfig {
    const fn default_timeout() -> u64 {
        30
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            command: default_player(),
            timeout: Self::default_timeout(),
        }
    }
}

/// Plays clips by running an external command and waiting for it to exit.
pub struct CommandPlayer {
    config: PlayerConfig,
}

impl CommandPlayer {
    #[must_use]
    pub const fn new(config: PlayerConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl AudioPlayer for CommandPlayer {
    async fn play(&self, path: &Path) -> Result<()> {
        if !path.is_file() {
            bail!("Audio file not found: {}", path.display());
        }

        let spec = self.config.command.for_file(path);
        info!("Playing {} with {}", path.display(), spec.program);

        let status = tokio::time::timeout(
            Duration::from_secs(self.config.timeout),
            build_command(&spec).status(),
        )
        .await
        .with_context(|| format!("Player timed out after {}s", self.config.timeout))?
        .with_context(|| format!("Failed to run {}", spec.program))?;

        if !status.success() {
            bail!("{} exited with {status}", spec.program);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_clip_is_an_error() {
        let player = CommandPlayer::new(PlayerConfig::default());
        let Err(err) = player.play(Path::new("/nonexistent/sb_fog.wav")).await else {
            panic!("missing file must not play");
        };
        assert!(err.to_string().contains("not found"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_runs_configured_command() {
        let dir = std::env::temp_dir().join(format!("lexis_player_{}", uuid::Uuid::now_v7()));
        let _ = std::fs::create_dir_all(&dir);
        let clip = dir.join("sb_fog.wav");
        let _ = std::fs::write(&clip, b"RIFF");

        let ok = CommandPlayer::new(PlayerConfig {
            command: CommandSpec {
                program: "true".to_string(),
                args: Vec::new(),
            },
            timeout: 5,
        });
        assert!(ok.play(&clip).await.is_ok());

        let failing = CommandPlayer::new(PlayerConfig {
            command: CommandSpec {
                program: "false".to_string(),
                args: Vec::new(),
            },
            timeout: 5,
        });
        assert!(failing.play(&clip).await.is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
