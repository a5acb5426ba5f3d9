//! Active word list: one word per line.
//!
//! `word | definition` carries an inline definition, a leading `~` flags the
//! stored pronunciation as wrong, blank lines and `#` comments are skipped.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordListEntry {
    pub word: String,
    pub inline_definition: Option<String>,
    pub mispronounced: bool,
}

impl WordListEntry {
    #[must_use]
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            ..Self::default()
        }
    }

    fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        let (mispronounced, line) = match line.strip_prefix('~') {
            Some(rest) => (true, rest.trim_start()),
            None => (false, line),
        };

        let (word, inline_definition) = match line.split_once('|') {
            Some((word, definition)) => {
                let definition = definition.trim();
                (
                    word.trim(),
                    (!definition.is_empty()).then(|| definition.to_string()),
                )
            }
            None => (line, None),
        };

        if word.is_empty() {
            return None;
        }

        Some(Self {
            word: word.to_string(),
            inline_definition,
            mispronounced,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    pub entries: Vec<WordListEntry>,
}

impl WordList {
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self {
            entries: text.lines().filter_map(WordListEntry::parse_line).collect(),
        }
    }

    #[must_use]
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: words.into_iter().map(WordListEntry::new).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
