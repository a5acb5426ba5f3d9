use serde::{Deserialize, Serialize};
use std::path::Path;

/// Placeholder replaced by the audio file path in command arguments.
pub const FILE_PLACEHOLDER: &str = "{FILE}";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Substitutes `path` for every `{FILE}` argument. A command without the
    /// placeholder gets the path appended as its last argument.
    #[must_use]
    pub fn for_file(&self, path: &Path) -> Self {
        let file = path.display().to_string();
        let mut args: Vec<String> = self
            .args
            .iter()
            .map(|arg| arg.replace(FILE_PLACEHOLDER, &file))
            .collect();
        if !self.args.iter().any(|arg| arg.contains(FILE_PLACEHOLDER)) {
            args.push(file);
        }
        Self {
            program: self.program.clone(),
            args,
        }
    }
}

/// The stock command-line player of the current platform.
#[must_use]
pub fn default_player() -> CommandSpec {
    if cfg!(target_os = "windows") {
        CommandSpec {
            program: "powershell".to_string(),
            args: vec![
                "-NoProfile".to_string(),
                "-NonInteractive".to_string(),
                "-Command".to_string(),
                format!("(New-Object Media.SoundPlayer '{FILE_PLACEHOLDER}').PlaySync()"),
            ],
        }
    } else if cfg!(target_os = "macos") {
        CommandSpec {
            program: "afplay".to_string(),
            args: vec![FILE_PLACEHOLDER.to_string()],
        }
    } else {
        CommandSpec {
            program: "aplay".to_string(),
            args: vec!["-q".to_string(), FILE_PLACEHOLDER.to_string()],
        }
    }
}

#[must_use]
pub fn build_command(spec: &CommandSpec) -> tokio::process::Command {
    let mut cmd = tokio::process::Command::new(&spec.program);
    cmd.args(&spec.args);
    cmd.stdin(std::process::Stdio::null());
    cmd
}
