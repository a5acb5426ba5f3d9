//! Lexical data model shared by every source, the disambiguator and the cascade.
//!
//! Every text field defaults to an empty string and every collection to an empty
//! list, so consumers only ever branch on `Option` for pronunciation and respelling.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordPronunciation {
    pub audio_url: String,
    /// Phonetic rendering as published by the source.
    pub word_pronunciation: String,
    pub form: String,
    pub spelling: String,
    /// Local cache path once the audio has been bound.
    pub audio_file: String,
}

impl WordPronunciation {
    #[must_use]
    pub fn new(audio_url: impl Into<String>) -> Self {
        Self {
            audio_url: audio_url.into(),
            ..Self::default()
        }
    }

    /// Applies a surface form to both `form` and `spelling`.
    #[must_use]
    pub fn with_form(mut self, form: &str) -> Self {
        self.form = form.to_string();
        self.spelling = crate::util::strip_syllable_marks(form);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordRespelling {
    pub text: String,
    pub source: String,
    pub form: String,
    pub spelling: String,
}

impl WordRespelling {
    #[must_use]
    pub fn new(text: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: source.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_form(mut self, form: &str) -> Self {
        self.form = form.to_string();
        self.spelling = crate::util::strip_syllable_marks(form);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordIllustration {
    pub illustration_url: String,
    pub caption: String,
    pub form: String,
    pub spelling: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordSense {
    pub definition: String,
    pub examples: Vec<String>,
    pub date: String,
}

impl WordSense {
    #[must_use]
    pub fn new(definition: impl Into<String>) -> Self {
        Self {
            definition: definition.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordInflection {
    pub form: String,
    pub spelling: String,
    pub functional_label: String,
    pub pronunciation: Option<WordPronunciation>,
    pub respelling: Option<WordRespelling>,
    pub senses: Vec<WordSense>,
}

impl WordInflection {
    #[must_use]
    pub fn new(form: &str, functional_label: impl Into<String>) -> Self {
        Self {
            form: form.to_string(),
            spelling: crate::util::strip_syllable_marks(form),
            functional_label: functional_label.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordEntry {
    pub source: String,
    pub entry_word: String,
    pub head_word: String,
    pub functional_label: String,
    pub word_syllables: String,
    pub etymology: String,
    pub pronunciation: Option<WordPronunciation>,
    pub respelling: Option<WordRespelling>,
    pub senses: Vec<WordSense>,
    pub inflections: Vec<WordInflection>,
    pub illustrations: Vec<WordIllustration>,
}

impl WordEntry {
    #[must_use]
    pub fn new(source: impl Into<String>, entry_word: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            entry_word: entry_word.into(),
            ..Self::default()
        }
    }
}

/// The single display-ready entry produced for one queried word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimplifiedWordEntry {
    pub source: String,
    pub key_word: String,
    pub entry_word: String,
    pub functional_label: String,
    pub etymology: String,
    pub pronunciation: Option<WordPronunciation>,
    pub respelling: Option<WordRespelling>,
    pub definitions: Vec<String>,
    pub usage: Vec<String>,
    pub examples: String,
}

impl SimplifiedWordEntry {
    /// An entry carrying nothing but the queried word.
    #[must_use]
    pub fn skeleton(key_word: impl Into<String>) -> Self {
        Self {
            key_word: key_word.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn has_definitions(&self) -> bool {
        !self.definitions.is_empty()
    }
}

impl fmt::Display for SimplifiedWordEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[Source       ]: {}", self.source)?;
        writeln!(f, "[Key Word     ]: {}", self.key_word)?;
        writeln!(f, "[Entry Word   ]: {}", self.entry_word)?;
        writeln!(f, "[Func. Label  ]: {}", self.functional_label)?;
        writeln!(f, "[Etymology    ]: {}", self.etymology)?;
        match &self.pronunciation {
            Some(p) => writeln!(
                f,
                "[Pronunciation]: {} ({}) url={} file={}",
                p.form, p.word_pronunciation, p.audio_url, p.audio_file
            )?,
            None => writeln!(f, "[Pronunciation]: -")?,
        }
        match &self.respelling {
            Some(r) => writeln!(f, "[Respelling   ]: {} [{}]", r.text, r.source)?,
            None => writeln!(f, "[Respelling   ]: -")?,
        }
        writeln!(f, "[Definitions  ]:")?;
        for definition in &self.definitions {
            writeln!(f, "  - {definition}")?;
        }
        if !self.usage.is_empty() {
            writeln!(f, "[Usage        ]: {}", self.usage.join(" | "))?;
        }
        if !self.examples.is_empty() {
            writeln!(f, "[Examples     ]: {}", self.examples)?;
        }
        Ok(())
    }
}
