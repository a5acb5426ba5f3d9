use std::fmt;

use crate::entry::SimplifiedWordEntry;
use crate::util::normalize_token;

/// Placeholder for pronunciation fields that a cached audio file cannot recover.
pub const CACHE_SENTINEL: &str = "[cached]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    DefinitionMissing,
    AudioMissing,
    AudioMismatch,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::DefinitionMissing => "Definition Missing",
            Self::AudioMissing => "Audio Missing",
            Self::AudioMismatch => "Audio Mismatch",
        };
        f.write_str(text)
    }
}

/// Classifies a fully resolved entry.
#[must_use]
pub fn diagnose(word: &str, entry: &SimplifiedWordEntry, mispronounced: bool) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    if entry.definitions.is_empty() {
        diagnostics.push(Diagnostic::DefinitionMissing);
    }

    match &entry.pronunciation {
        None => diagnostics.push(Diagnostic::AudioMissing),
        Some(p) => {
            let spelled_differently = !p.spelling.is_empty()
                && p.spelling != CACHE_SENTINEL
                && normalize_token(&p.spelling) != normalize_token(word);
            if spelled_differently || mispronounced {
                diagnostics.push(Diagnostic::AudioMismatch);
            }
        }
    }

    if mispronounced && entry.pronunciation.is_none() {
        diagnostics.push(Diagnostic::AudioMismatch);
    }

    diagnostics
}

/// `ERROR:<word>:>Reason1>Reason2\n`, or `None` when nothing fired.
#[must_use]
pub fn error_line(word: &str, diagnostics: &[Diagnostic]) -> Option<String> {
    if diagnostics.is_empty() {
        return None;
    }
    let reasons: String = diagnostics.iter().map(|d| format!(">{d}")).collect();
    Some(format!("ERROR:{word}:{reasons}\n"))
}
