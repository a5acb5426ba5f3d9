//! Pattern-marker text extraction.
//!
//! Sources describe where their content lives with pairs of regular expressions.
//! These helpers never fail: a pattern that does not compile is skipped with a
//! warning, and a pattern that does not match leaves the text untouched.

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A start and end pattern bracketing a span of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerPair {
    pub start: String,
    pub end: String,
}

impl MarkerPair {
    #[must_use]
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// The three cleansing passes applied to raw markup, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanseRules {
    /// Patterns deleted outright.
    pub remove: Vec<String>,
    /// Pairs whose enclosed content is dropped while the delimiters stay.
    pub collapse_inner: Vec<MarkerPair>,
    /// Pairs whose delimiters are dropped while the content stays.
    pub strip_outer: Vec<MarkerPair>,
}

impl CleanseRules {
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        cleanse_text(text, &self.remove, &self.collapse_inner, &self.strip_outer)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remove.is_empty() && self.collapse_inner.is_empty() && self.strip_outer.is_empty()
    }
}

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!(pattern, error = %e, "Skipping invalid marker pattern");
            None
        }
    }
}

/// Every non-overlapping, non-greedy span between `start` and `end`, in document order.
#[must_use]
pub fn find_enclosed_text(start: &str, end: &str, text: &str) -> Vec<String> {
    let Some(re) = compile(&format!("{start}(?P<lexis_inner>.*?){end}")) else {
        return Vec::new();
    };

    re.captures_iter(text)
        .filter_map(|caps| caps.name("lexis_inner"))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// First span between `start` and `end`, if any.
#[must_use]
pub fn find_first_enclosed(start: &str, end: &str, text: &str) -> Option<String> {
    find_enclosed_text(start, end, text).into_iter().next()
}

#[must_use]
pub fn cleanse_text(
    text: &str,
    remove: &[String],
    collapse_inner: &[MarkerPair],
    strip_outer: &[MarkerPair],
) -> String {
    let mut cleansed = text.to_string();

    for pattern in remove {
        if let Some(re) = compile(pattern) {
            cleansed = re.replace_all(&cleansed, "").into_owned();
        }
    }

    for pair in collapse_inner {
        let pattern = format!(
            "(?P<lexis_open>{}).*?(?P<lexis_close>{})",
            pair.start, pair.end
        );
        if let Some(re) = compile(&pattern) {
            cleansed = re
                .replace_all(&cleansed, "${lexis_open}${lexis_close}")
                .into_owned();
        }
    }

    for pair in strip_outer {
        let pattern = format!("{}(?P<lexis_inner>.*?){}", pair.start, pair.end);
        if let Some(re) = compile(&pattern) {
            cleansed = re.replace_all(&cleansed, "${lexis_inner}").into_owned();
        }
    }

    cleansed
}
