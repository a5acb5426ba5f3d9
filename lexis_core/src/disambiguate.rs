//! Collapses the entries parsed from one response into a single entry for the
//! queried word.
//!
//! Matching runs in three passes, each only when the previous one found nothing:
//! exact entry word, then inflection spelling, then the first entry as a default.
//! Consolidation then spans every matched entry and all of their inflections.

use tracing::debug;

use crate::entry::{
    SimplifiedWordEntry, WordEntry, WordInflection, WordPronunciation, WordRespelling, WordSense,
};
use crate::util::{coalesce, push_unique};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchType {
    EntryWord,
    Inflection,
    Default,
    None,
}

#[derive(Debug, Clone)]
pub struct EntryMatch<'a> {
    pub match_type: MatchType,
    pub entries: Vec<&'a WordEntry>,
    pub inflection: Option<&'a WordInflection>,
}

#[must_use]
pub fn find_matches<'a>(key_word: &str, entries: &'a [WordEntry]) -> EntryMatch<'a> {
    let exact: Vec<&WordEntry> = entries.iter().filter(|e| e.entry_word == key_word).collect();
    if !exact.is_empty() {
        return EntryMatch {
            match_type: MatchType::EntryWord,
            entries: exact,
            inflection: None,
        };
    }

    for entry in entries {
        if let Some(inflection) = entry.inflections.iter().find(|i| i.spelling == key_word) {
            return EntryMatch {
                match_type: MatchType::Inflection,
                entries: vec![entry],
                inflection: Some(inflection),
            };
        }
    }

    match entries.first() {
        Some(first) => EntryMatch {
            match_type: MatchType::Default,
            entries: vec![first],
            inflection: None,
        },
        None => EntryMatch {
            match_type: MatchType::None,
            entries: Vec::new(),
            inflection: None,
        },
    }
}

/// Builds the canonical entry for `key_word`. An empty input yields a skeleton.
#[must_use]
pub fn disambiguate(key_word: &str, entries: &[WordEntry]) -> SimplifiedWordEntry {
    let found = find_matches(key_word, entries);
    debug!(key_word, match_type = ?found.match_type, matched = found.entries.len(), "Disambiguated entries");

    let Some(first) = found.entries.first() else {
        return SimplifiedWordEntry::skeleton(key_word);
    };

    let mut simplified = SimplifiedWordEntry {
        source: first.source.clone(),
        key_word: key_word.to_string(),
        entry_word: first.entry_word.clone(),
        ..SimplifiedWordEntry::default()
    };

    match found.inflection {
        Some(inflection) => {
            simplified.functional_label =
                coalesce(&[&inflection.functional_label, &first.functional_label]).to_string();
            simplified.pronunciation = merge_pronunciation(
                inflection.pronunciation.as_ref(),
                first.pronunciation.as_ref(),
            );
            simplified.respelling =
                merge_respelling(inflection.respelling.as_ref(), first.respelling.as_ref());
        }
        None => {
            simplified.functional_label.clone_from(&first.functional_label);
            simplified.pronunciation.clone_from(&first.pronunciation);
            simplified.respelling.clone_from(&first.respelling);
        }
    }

    consolidate(&mut simplified, &found.entries);
    simplified
}

fn consolidate(simplified: &mut SimplifiedWordEntry, entries: &[&WordEntry]) {
    let mut etymologies = Vec::new();
    let mut definitions = Vec::new();
    let mut examples = Vec::new();

    for entry in entries {
        push_unique(&mut etymologies, entry.etymology.clone());
        collect_senses(&entry.functional_label, &entry.senses, &mut definitions, &mut examples);
        for inflection in &entry.inflections {
            collect_senses(
                &inflection.functional_label,
                &inflection.senses,
                &mut definitions,
                &mut examples,
            );
        }
    }

    simplified.etymology = etymologies.join("; ");
    simplified.definitions = definitions;
    simplified.examples = examples.join("; ");
}

fn collect_senses(
    label: &str,
    senses: &[WordSense],
    definitions: &mut Vec<String>,
    examples: &mut Vec<String>,
) {
    for sense in senses {
        let text = if label.is_empty() {
            sense.definition.clone()
        } else {
            format!("({label}) {}", sense.definition)
        };
        push_unique(definitions, text);
        for example in &sense.examples {
            push_unique(examples, example.clone());
        }
    }
}

fn merge_pronunciation(
    primary: Option<&WordPronunciation>,
    fallback: Option<&WordPronunciation>,
) -> Option<WordPronunciation> {
    if primary.is_none() && fallback.is_none() {
        return None;
    }
    let empty = WordPronunciation::default();
    let p = primary.unwrap_or(&empty);
    let f = fallback.unwrap_or(&empty);
    Some(WordPronunciation {
        audio_url: coalesce(&[&p.audio_url, &f.audio_url]).to_string(),
        word_pronunciation: coalesce(&[&p.word_pronunciation, &f.word_pronunciation]).to_string(),
        form: coalesce(&[&p.form, &f.form]).to_string(),
        spelling: coalesce(&[&p.spelling, &f.spelling]).to_string(),
        audio_file: coalesce(&[&p.audio_file, &f.audio_file]).to_string(),
    })
}

fn merge_respelling(
    primary: Option<&WordRespelling>,
    fallback: Option<&WordRespelling>,
) -> Option<WordRespelling> {
    if primary.is_none() && fallback.is_none() {
        return None;
    }
    let empty = WordRespelling::default();
    let p = primary.unwrap_or(&empty);
    let f = fallback.unwrap_or(&empty);
    Some(WordRespelling {
        text: coalesce(&[&p.text, &f.text]).to_string(),
        source: coalesce(&[&p.source, &f.source]).to_string(),
        form: coalesce(&[&p.form, &f.form]).to_string(),
        spelling: coalesce(&[&p.spelling, &f.spelling]).to_string(),
    })
}
