//! Hand-authored corrections layered over fetched entries.
//!
//! An override is a list of lines. Lines shaped `#!Key: value` are directives,
//! every other non-blank line is a definition placed in front of the fetched
//! ones. For a repeated directive the last value wins.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::entry::{SimplifiedWordEntry, WordPronunciation, WordRespelling};
use crate::util::strip_syllable_marks;

static DIRECTIVE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^#!\s*(?P<key>[A-Za-z][A-Za-z0-9_ ]*?)\s*:\s*(?P<value>.*?)\s*$").ok());

pub const KEY_SOURCE: &str = "Source";
pub const KEY_WORD: &str = "Word";
pub const KEY_RESPELLING: &str = "Respelling";
pub const KEY_AUDIO_URL: &str = "AudioURL";
pub const KEY_ETYMOLOGY: &str = "Etymology";
pub const KEY_SENTENCE: &str = "Sentence";
pub const KEY_EXAMPLES: &str = "Examples";

/// Parsed override lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideSet {
    /// Directives in first-seen key order, each holding its last value.
    directives: Vec<(String, String)>,
    lines: Vec<String>,
}

impl OverrideSet {
    pub fn parse<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for line in lines {
            let line = line.as_ref().trim_end();
            if line.trim().is_empty() {
                continue;
            }
            if line.starts_with("#!") {
                set.push_directive(line);
            } else {
                set.lines.push(line.to_string());
            }
        }
        set
    }

    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self::parse(text.lines())
    }

    fn push_directive(&mut self, line: &str) {
        let Some(caps) = DIRECTIVE.as_ref().and_then(|re| re.captures(line)) else {
            debug!(line, "Ignoring malformed override directive");
            return;
        };
        let (Some(key), Some(value)) = (caps.name("key"), caps.name("value")) else {
            return;
        };
        // Empty values leave the field alone.
        if value.as_str().is_empty() {
            return;
        }
        let key = key.as_str().to_string();
        let value = value.as_str().to_string();
        match self.directives.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.directives.push((key, value)),
        }
    }

    #[must_use]
    pub fn directive(&self, key: &str) -> Option<&str> {
        self.directives
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty() && self.lines.is_empty()
    }

    /// Free-text lines followed by `Key: value` lines for unrecognized directives.
    fn definition_lines(&self) -> Vec<String> {
        let mut lines = self.lines.clone();
        lines.extend(
            self.directives
                .iter()
                .filter(|(k, _)| !is_known_key(k))
                .map(|(k, v)| format!("{k}: {v}")),
        );
        lines
    }
}

fn is_known_key(key: &str) -> bool {
    matches!(
        key,
        KEY_SOURCE
            | KEY_WORD
            | KEY_RESPELLING
            | KEY_AUDIO_URL
            | KEY_ETYMOLOGY
            | KEY_SENTENCE
            | KEY_EXAMPLES
    )
}

/// Comparison form of a definition line.
#[must_use]
pub fn normalize_definition(text: &str) -> String {
    let trimmed = text.trim();
    let mut chars = trimmed.chars();
    let rest = match chars.next() {
        Some(c) if !c.is_alphanumeric() => chars.as_str(),
        _ => trimmed,
    };
    rest.trim_start()
        .trim_end_matches(['.', ' '])
        .to_string()
}

fn append_provenance(existing: &str, label: &str) -> String {
    if existing.is_empty() {
        label.to_string()
    } else {
        format!("{existing};{label}")
    }
}

/// Applies override sets to entries under a default attribution label.
#[derive(Debug, Clone)]
pub struct OverrideMerger {
    default_label: String,
}

impl OverrideMerger {
    #[must_use]
    pub fn new(default_label: impl Into<String>) -> Self {
        Self {
            default_label: default_label.into(),
        }
    }

    #[must_use]
    pub fn default_label(&self) -> &str {
        &self.default_label
    }

    /// Returns `entry` enriched by `overrides`.
    ///
    /// `word` is the canonical word, used as the form of a pronunciation or
    /// respelling created here when no `Word` directive names one.
    #[must_use]
    pub fn merge(
        &self,
        entry: SimplifiedWordEntry,
        word: &str,
        overrides: &OverrideSet,
    ) -> SimplifiedWordEntry {
        if overrides.is_empty() {
            return entry;
        }

        let mut merged = entry;
        let label = overrides
            .directive(KEY_SOURCE)
            .unwrap_or(&self.default_label)
            .to_string();
        let named_word = overrides.directive(KEY_WORD);

        if let Some(etymology) = overrides.directive(KEY_ETYMOLOGY) {
            merged.etymology = etymology.to_string();
        }

        if let Some(url) = overrides.directive(KEY_AUDIO_URL) {
            let mut pronunciation = merged
                .pronunciation
                .take()
                .unwrap_or_else(|| WordPronunciation::default().with_form(word));
            pronunciation.audio_url = url.to_string();
            if let Some(form) = named_word {
                pronunciation.form = form.to_string();
                pronunciation.spelling = strip_syllable_marks(form);
            }
            merged.pronunciation = Some(pronunciation);
        }

        if let Some(text) = overrides.directive(KEY_RESPELLING) {
            let mut respelling = match merged.respelling.take() {
                Some(mut existing) => {
                    existing.source = append_provenance(&existing.source, &label);
                    existing.text = text.to_string();
                    existing
                }
                None => WordRespelling::new(text, label.clone()).with_form(word),
            };
            if let Some(form) = named_word {
                respelling.form = form.to_string();
                respelling.spelling = strip_syllable_marks(form);
            }
            merged.respelling = Some(respelling);
        }

        if let Some(sentence) = overrides.directive(KEY_SENTENCE) {
            merged.usage.insert(0, sentence.to_string());
        }

        if let Some(examples) = overrides.directive(KEY_EXAMPLES) {
            merged.examples = examples.to_string();
        }

        let front = overrides.definition_lines();
        if !front.is_empty() {
            let replaced: Vec<String> = front.iter().map(|l| normalize_definition(l)).collect();
            let remaining = merged
                .definitions
                .into_iter()
                .filter(|d| !replaced.contains(&normalize_definition(d)));
            merged.definitions = front.into_iter().chain(remaining).collect();
        }

        merged.source = append_provenance(&merged.source, &label);
        debug!(word, source = %merged.source, definitions = merged.definitions.len(), "Applied override");
        merged
    }
}

fn push_directive(lines: &mut Vec<String>, key: &str, value: &str) {
    if !value.is_empty() {
        lines.push(format!("#!{key}: {value}"));
    }
}

/// Renders an entry as override text that can be edited and merged back.
#[must_use]
pub fn render_override(entry: &SimplifiedWordEntry) -> String {
    let mut lines = Vec::new();

    push_directive(&mut lines, KEY_SOURCE, &entry.source);
    let word = entry
        .pronunciation
        .as_ref()
        .map(|p| p.form.as_str())
        .filter(|f| !f.is_empty())
        .unwrap_or(&entry.key_word);
    push_directive(&mut lines, KEY_WORD, word);
    if let Some(respelling) = &entry.respelling {
        push_directive(&mut lines, KEY_RESPELLING, &respelling.text);
    }
    if let Some(pronunciation) = &entry.pronunciation {
        push_directive(&mut lines, KEY_AUDIO_URL, &pronunciation.audio_url);
    }
    push_directive(&mut lines, KEY_ETYMOLOGY, &entry.etymology);
    if let Some(sentence) = entry.usage.first() {
        push_directive(&mut lines, KEY_SENTENCE, sentence);
    }
    push_directive(&mut lines, KEY_EXAMPLES, &entry.examples);

    lines.extend(entry.definitions.iter().cloned());
    let mut text = lines.join("\n");
    text.push('\n');
    text
}
