//! Structured XML source: the Merriam-Webster Collegiate dictionary API.
//!
//! Responses are read into a small element tree with `quick-xml` and then
//! walked entry by entry. Each `<entry>` becomes one [`WordEntry`]; its
//! inflection, run-on and cross-reference blocks become [`WordInflection`]s.

use async_trait::async_trait;
use lexis_core::util::{coalesce, strip_syllable_marks};
use lexis_core::{
    EntryParser, EntrySource, FetchError, Fetcher, ParseError, SourceAdapter, WordEntry,
    WordIllustration, WordInflection, WordPronunciation, WordRespelling, WordSense, disambiguate,
};
use once_cell::sync::Lazy;
use quick_xml::Reader;
use quick_xml::events::Event;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Endpoints and credentials of the collegiate API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollegiateConfig {
    #[serde(default = "CollegiateConfig::default_name")]
    pub name: String,
    #[serde(default = "CollegiateConfig::default_entry_url")]
    pub entry_url: String,
    #[serde(default = "CollegiateConfig::default_audio_url")]
    pub audio_url: String,
    #[serde(default = "CollegiateConfig::default_illustration_url")]
    pub illustration_url: String,
    pub api_key: Option<String>,
}

impl CollegiateConfig {
    fn default_name() -> String {
        "Merriam-Webster's Collegiate Dictionary".to_string()
    }

    fn default_entry_url() -> String {
        "http://www.dictionaryapi.com/api/v1/references/collegiate/xml/{WORD}?key={KEY}"
            .to_string()
    }

    fn default_audio_url() -> String {
        "http://media.merriam-webster.com/soundc11/{FOLDER}/{CLIP}".to_string()
    }

    fn default_illustration_url() -> String {
        "https://www.merriam-webster.com/art/dict/{CLIP}.htm".to_string()
    }

    #[must_use]
    pub fn build_entry_url(&self, word: &str) -> String {
        self.entry_url
            .replace("{WORD}", word)
            .replace("{KEY}", self.api_key.as_deref().unwrap_or_default())
            .replace(' ', "%20")
    }

    /// Maps a `<wav>` clip name to its download URL. The folder is derived
    /// from the clip name: `number` for clips starting with a digit, `gg` or
    /// `bix` for those prefixes, and the first letter otherwise.
    #[must_use]
    pub fn build_audio_url(&self, clip: &str) -> String {
        let clip = clip.trim();
        if clip.is_empty() {
            return String::new();
        }
        let clip = if clip.contains('.') {
            clip.to_string()
        } else {
            format!("{clip}.wav")
        };
        self.audio_url
            .replace("{FOLDER}", &audio_folder(&clip))
            .replace("{CLIP}", &clip)
    }

    #[must_use]
    pub fn build_illustration_url(&self, clip: &str) -> String {
        let clip = clip.trim().trim_end_matches(".bmp");
        if clip.is_empty() {
            return String::new();
        }
        self.illustration_url.replace("{CLIP}", clip)
    }
}

impl Default for CollegiateConfig {
    fn default() -> Self {
        Self {
            name: Self::default_name(),
            entry_url: Self::default_entry_url(),
            audio_url: Self::default_audio_url(),
            illustration_url: Self::default_illustration_url(),
            api_key: None,
        }
    }
}

fn audio_folder(clip: &str) -> String {
    if clip.starts_with(|c: char| c.is_ascii_digit()) {
        return "number".to_string();
    }
    for prefix in ["bix", "gg"] {
        if clip.starts_with(prefix) {
            return prefix.to_string();
        }
    }
    clip.chars().next().map(String::from).unwrap_or_default()
}

pub struct CollegiateSource {
    config: Arc<CollegiateConfig>,
    fetcher: Arc<dyn Fetcher>,
}

impl CollegiateSource {
    #[must_use]
    pub fn new(config: CollegiateConfig, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            config: Arc::new(config),
            fetcher,
        }
    }

    #[must_use]
    pub fn config(&self) -> &CollegiateConfig {
        &self.config
    }

    fn markup_error(&self, message: impl Into<String>) -> ParseError {
        ParseError::Markup {
            source_name: self.config.name.clone(),
            message: message.into(),
        }
    }
}

#[async_trait]
impl SourceAdapter for CollegiateSource {
    fn source_name(&self) -> &str {
        &self.config.name
    }

    async fn fetch_entry(&self, word: &str) -> Result<String, FetchError> {
        let url = self.config.build_entry_url(word);
        debug!(source = %self.config.name, word, "Fetching collegiate entry");
        self.fetcher.fetch_text(&url).await
    }

    fn parse_definitions(&self, word: &str, raw: &str) -> Result<Vec<String>, ParseError> {
        let entries = self.parse_entries(word, raw)?;
        Ok(disambiguate(word, &entries).definitions)
    }

    fn parse_pronunciation(&self, word: &str, raw: &str) -> Result<(String, String), ParseError> {
        let entries = self.parse_entries(word, raw)?;
        Ok(disambiguate(word, &entries)
            .pronunciation
            .map(|p| (p.form, p.audio_url))
            .unwrap_or_default())
    }
}

impl EntryParser for CollegiateSource {
    fn parse_entries(&self, _word: &str, raw: &str) -> Result<Vec<WordEntry>, ParseError> {
        let document = parse_document(raw).map_err(|e| self.markup_error(e))?;
        let entries: Vec<WordEntry> = document
            .find(&["entry"], &[])
            .into_iter()
            .map(|node| EntryBuilder::new(&self.config).build(node))
            .collect();
        debug!(count = entries.len(), "Parsed collegiate entries");
        Ok(entries)
    }
}

impl EntrySource for CollegiateSource {
    fn cache_extension(&self) -> &str {
        "xml"
    }
}

// Element tree

#[derive(Debug)]
enum Child {
    Element(Node),
    Text(String),
}

#[derive(Debug)]
struct Node {
    name: String,
    children: Vec<Child>,
}

impl Node {
    const fn new(name: String) -> Self {
        Self {
            name,
            children: Vec::new(),
        }
    }

    fn is(&self, names: &[&str]) -> bool {
        names.contains(&self.name.as_str())
    }

    /// Concatenated descendant text, skipping subtrees named in `skip`.
    fn text_without(&self, skip: &[&str]) -> String {
        let mut out = String::new();
        self.collect_text(skip, &mut out);
        out
    }

    fn text(&self) -> String {
        collapse(&self.text_without(&[]))
    }

    fn collect_text(&self, skip: &[&str], out: &mut String) {
        for child in &self.children {
            match child {
                Child::Text(text) => out.push_str(text),
                Child::Element(node) if !node.is(skip) => node.collect_text(skip, out),
                Child::Element(_) => {}
            }
        }
    }

    /// Descendants named in `names`, in document order. Matches are not
    /// searched further and subtrees named in `skip` are never entered.
    fn find<'a>(&'a self, names: &[&str], skip: &[&str]) -> Vec<&'a Self> {
        let mut found = Vec::new();
        self.collect(names, skip, &mut found);
        found
    }

    fn collect<'a>(&'a self, names: &[&str], skip: &[&str], found: &mut Vec<&'a Self>) {
        for child in &self.children {
            let Child::Element(node) = child else {
                continue;
            };
            if node.is(names) {
                found.push(node);
            } else if !node.is(skip) {
                node.collect(names, skip, found);
            }
        }
    }

    fn first_text(&self, name: &str, skip: &[&str]) -> String {
        self.find(&[name], skip)
            .first()
            .map(|n| n.text())
            .unwrap_or_default()
    }
}

fn parse_document(raw: &str) -> Result<Node, String> {
    let mut reader = Reader::from_str(raw);
    let mut stack = vec![Node::new(String::new())];

    loop {
        let event = reader
            .read_event()
            .map_err(|e| format!("{e} at position {}", reader.buffer_position()))?;
        match event {
            Event::Start(e) => {
                stack.push(Node::new(String::from_utf8_lossy(e.name().as_ref()).into_owned()));
            }
            Event::Empty(e) => {
                let node = Node::new(String::from_utf8_lossy(e.name().as_ref()).into_owned());
                attach(&mut stack, Child::Element(node))?;
            }
            Event::End(_) => {
                let node = match stack.pop() {
                    Some(node) if !stack.is_empty() => node,
                    _ => return Err("unbalanced closing tag".to_string()),
                };
                attach(&mut stack, Child::Element(node))?;
            }
            Event::Text(e) => {
                let text = e.unescape().map_err(|e| e.to_string())?;
                attach(&mut stack, Child::Text(text.into_owned()))?;
            }
            Event::CData(e) => {
                attach(&mut stack, Child::Text(String::from_utf8_lossy(&e).into_owned()))?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    match (stack.pop(), stack.is_empty()) {
        (Some(root), true) => Ok(root),
        _ => Err("unexpected end of document".to_string()),
    }
}

fn attach(stack: &mut [Node], child: Child) -> Result<(), String> {
    let Some(parent) = stack.last_mut() else {
        return Err("content outside of the document".to_string());
    };
    parent.children.push(child);
    Ok(())
}

// Text clean-up

static CALLED_ALSO: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"called also").ok());
static COMPARE_TAIL: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"[ ]+\x{2014}[ ]+compare.*").ok());
static LEADING_COLON: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^[ ]*:[ ]*").ok());
static INNER_COLON: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"[ ]*:[ ]*").ok());

fn replace_all(re: &Lazy<Option<Regex>>, text: &str, replacement: &str) -> String {
    match re.as_ref() {
        Some(re) => re.replace_all(text, replacement).into_owned(),
        None => text.to_string(),
    }
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalises a `<dt>` body into a single definition line.
fn clean_definition(text: &str) -> String {
    let text = collapse(text);
    let text = replace_all(&CALLED_ALSO, &text, "- called also");
    let text = replace_all(&COMPARE_TAIL, &text, "");
    let text = replace_all(&LEADING_COLON, &text, "");
    let text = replace_all(&INNER_COLON, &text, "; ");
    collapse(&text)
}

// Entry assembly

const RUN_ON_BLOCKS: [&str; 3] = ["in", "dro", "uro"];
const SENSE_EXCLUDED: [&str; 7] = ["vi", "wsgram", "dx", "snote", "un", "sxn", "ca"];
const MAIN_FIELDS: [&str; 7] = ["fl", "et", "pr", "sound", "art", "def", "cx"];
const BLOCK_FIELDS: [&str; 9] = ["if", "ure", "drp", "il", "fl", "pr", "sound", "def", "cx"];

struct EntryBuilder<'a> {
    config: &'a CollegiateConfig,
}

impl<'a> EntryBuilder<'a> {
    const fn new(config: &'a CollegiateConfig) -> Self {
        Self { config }
    }

    fn build(&self, entry: &Node) -> WordEntry {
        let head = entry.first_text("hw", &RUN_ON_BLOCKS);
        let explicit = entry.first_text("ew", &RUN_ON_BLOCKS);
        let stripped_head = strip_syllable_marks(&head);
        let entry_word = coalesce(&[&explicit, &stripped_head]).to_string();

        let mut word = WordEntry::new(self.config.name.clone(), entry_word.clone());
        word.head_word = stripped_head.clone();
        word.word_syllables = head.replace('*', "\u{b7}");

        for node in entry.find(&MAIN_FIELDS, &RUN_ON_BLOCKS) {
            match node.name.as_str() {
                "fl" if word.functional_label.is_empty() => word.functional_label = node.text(),
                "et" if word.etymology.is_empty() => word.etymology = node.text(),
                "pr" if word.respelling.is_none() => {
                    word.respelling = Some(self.respelling(node, &entry_word));
                }
                "sound" if word.pronunciation.is_none() => {
                    word.pronunciation = self.pronunciation(node, &entry_word);
                }
                "art" => word.illustrations.extend(self.illustration(node, &entry_word)),
                "def" => word.senses.extend(senses(node)),
                "cx" => word.inflections.extend(cross_reference(node)),
                _ => {}
            }
        }

        for block in entry.find(&RUN_ON_BLOCKS, &[]) {
            word.inflections.extend(self.run_on_block(block));
        }
        word
    }

    fn respelling(&self, node: &Node, form: &str) -> WordRespelling {
        WordRespelling::new(format!("\\{}\\", node.text()), self.config.name.clone()).with_form(form)
    }

    fn pronunciation(&self, node: &Node, form: &str) -> Option<WordPronunciation> {
        let url = self.config.build_audio_url(&node.first_text("wav", &[]));
        if url.is_empty() {
            return None;
        }
        let mut pronunciation = WordPronunciation::new(url).with_form(form);
        pronunciation.word_pronunciation = node.first_text("wpr", &[]);
        Some(pronunciation)
    }

    fn illustration(&self, node: &Node, form: &str) -> Option<WordIllustration> {
        let url = self.config.build_illustration_url(&node.first_text("bmp", &[]));
        if url.is_empty() {
            return None;
        }
        Some(WordIllustration {
            illustration_url: url,
            caption: node.first_text("cap", &[]),
            form: form.to_string(),
            spelling: strip_syllable_marks(form),
        })
    }

    /// An `<in>` block may list several forms. An `<il>` labels the form that
    /// follows it, while `<pr>`, `<sound>` and `<def>` belong to the form before
    /// them. `<uro>` and `<dro>` blocks describe a single form.
    fn run_on_block(&self, block: &Node) -> Vec<WordInflection> {
        let mut inflections: Vec<WordInflection> = Vec::new();
        let mut pending_label = String::new();

        for node in block.find(&BLOCK_FIELDS, &[]) {
            match node.name.as_str() {
                "if" => {
                    let label = std::mem::take(&mut pending_label);
                    inflections.push(WordInflection::new(&node.text(), label));
                }
                "ure" => {
                    inflections.push(WordInflection::new(&node.text(), "undefined run-on entry"));
                }
                "drp" => {
                    inflections.push(WordInflection::new(&node.text(), "defined run-on phrase"));
                }
                "il" => pending_label = node.text(),
                "cx" => inflections.extend(cross_reference(node)),
                name => {
                    let Some(current) = inflections.last_mut() else {
                        continue;
                    };
                    let form = current.form.clone();
                    match name {
                        "fl" => current.functional_label = node.text(),
                        "pr" => current.respelling = Some(self.respelling(node, &form)),
                        "sound" => current.pronunciation = self.pronunciation(node, &form),
                        "def" => current.senses.extend(senses(node)),
                        _ => {}
                    }
                }
            }
        }
        inflections
    }
}

fn senses(def: &Node) -> Vec<WordSense> {
    let mut date = String::new();
    let mut senses = Vec::new();

    for node in def.find(&["date", "dt"], &SENSE_EXCLUDED) {
        if node.name == "date" {
            date = node.text();
            continue;
        }

        let mut definition = clean_definition(&node.text_without(&SENSE_EXCLUDED));
        if definition.is_empty() {
            definition = clean_definition(&node.first_text("un", &[]));
        }
        if definition.is_empty() {
            continue;
        }

        let mut sense = WordSense::new(definition);
        sense.date.clone_from(&date);
        sense.examples = node
            .find(&["vi"], &[])
            .into_iter()
            .map(Node::text)
            .filter(|v| !v.is_empty())
            .collect();
        senses.push(sense);
    }
    senses
}

/// `<cx><cl>label</cl><ct>target</ct></cx>` points at another headword.
fn cross_reference(cx: &Node) -> Option<WordInflection> {
    let label = cx.first_text("cl", &[]);
    let target = cx.first_text("ct", &[]);
    if target.is_empty() {
        return None;
    }
    // The label already leads the sense, so the inflection itself stays unlabelled.
    let mut inflection = WordInflection::new(&target, String::new());
    inflection.senses.push(WordSense::new(collapse(&format!("{label} {target}"))));
    Some(inflection)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_folder_rules() {
        assert_eq!(audio_folder("3d000001.wav"), "number");
        assert_eq!(audio_folder("ggmain01.wav"), "gg");
        assert_eq!(audio_folder("bixcl01.wav"), "bix");
        assert_eq!(audio_folder("cloud001.wav"), "c");
    }

    #[test]
    fn test_audio_url_appends_extension() {
        let config = CollegiateConfig::default();
        assert_eq!(
            config.build_audio_url("cloud001"),
            "http://media.merriam-webster.com/soundc11/c/cloud001.wav"
        );
        assert!(config.build_audio_url("  ").is_empty());
    }

    #[test]
    fn test_illustration_url_drops_bmp() {
        let config = CollegiateConfig::default();
        assert_eq!(
            config.build_illustration_url("cloud.bmp"),
            "https://www.merriam-webster.com/art/dict/cloud.htm"
        );
    }

    #[test]
    fn test_entry_url_substitutes_key() {
        let config = CollegiateConfig {
            api_key: Some("abc".to_string()),
            ..CollegiateConfig::default()
        };
        assert_eq!(
            config.build_entry_url("ice cream"),
            "http://www.dictionaryapi.com/api/v1/references/collegiate/xml/ice%20cream?key=abc"
        );
    }

    #[test]
    fn test_clean_definition() {
        assert_eq!(clean_definition(" :a visible mass :fog "), "a visible mass; fog");
        assert_eq!(
            clean_definition(":a dark area \u{2014} compare shadow"),
            "a dark area"
        );
        assert_eq!(
            clean_definition(":a cirrus cloud called also mare's tail"),
            "a cirrus cloud - called also mare's tail"
        );
    }

    #[test]
    fn test_tree_keeps_inline_spacing() {
        let Ok(root) = parse_document("<dt>:a <sx>mass</sx> of vapor</dt>") else {
            panic!("well-formed markup should parse");
        };
        let found = root.find(&["dt"], &[]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text(), ":a mass of vapor");
    }

    #[test]
    fn test_mismatched_tags_are_rejected() {
        assert!(parse_document("<entry><hw>cloud</fl></entry>").is_err());
    }

    #[test]
    fn test_cross_reference_becomes_inflection() {
        let Ok(root) = parse_document("<cx><cl>chiefly British spelling of</cl> <ct>color</ct></cx>")
        else {
            panic!("well-formed markup should parse");
        };
        let cx = root.find(&["cx"], &[]);
        let Some(inflection) = cross_reference(cx[0]) else {
            panic!("cross reference with a target should map");
        };
        assert_eq!(inflection.form, "color");
        assert!(inflection.functional_label.is_empty());
        assert_eq!(inflection.senses[0].definition, "chiefly British spelling of color");
    }
}
