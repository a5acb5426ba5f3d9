//! Built-in source catalogue.

use lexis_core::marker::{CleanseRules, MarkerPair};

use crate::collegiate::CollegiateConfig;
use crate::marker_source::MarkerSourceConfig;

pub const CAMBRIDGE: &str = "cambridge";
pub const COLLINS: &str = "collins";
pub const RANDOMHOUSE: &str = "randomhouse";
pub const GOOGLE: &str = "google";
pub const FREEDICTIONARY: &str = "freedictionary";
pub const YOUTUBE: &str = "youtube";
pub const OXFORD: &str = "oxford";
pub const COLLEGIATE: &str = "collegiate";

/// Lookup order used when the configuration names none.
pub const DEFAULT_PRIORITY: [&str; 8] = [
    CAMBRIDGE,
    COLLINS,
    RANDOMHOUSE,
    GOOGLE,
    FREEDICTIONARY,
    YOUTUBE,
    OXFORD,
    COLLEGIATE,
];

fn pair(start: &str, end: &str) -> MarkerPair {
    MarkerPair::new(start, end)
}

fn patterns(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

const SCRIPT_BLOCK: &str = r"<script.*?>.*?</script>";
const STYLE_BLOCK: &str = r"<style.*?>.*?</style>";

#[must_use]
pub fn cambridge() -> MarkerSourceConfig {
    MarkerSourceConfig {
        name: "Cambridge Dictionaries Online".to_string(),
        entry_url: "http://dictionary.cambridge.org/us/dictionary/english/{WORD}".to_string(),
        audio_url: "http://dictionary.cambridge.org{PATH}".to_string(),
        api_key: None,
        cleanse: CleanseRules {
            remove: patterns(&["\u{200b}", ": "]),
            collapse_inner: Vec::new(),
            strip_outer: vec![
                pair(r"<a.*?>", r"</a>"),
                pair(r"<b>", r"</b>"),
                pair(r"<i>", r"</i>"),
                pair(r"<u>", r"</u>"),
            ],
        },
        definition_markers: vec![pair(r#"<span class="def">"#, r"</span>")],
        pronunciation_url_marker: Some(pair(r#"data-src-mp3=""#, r#"""#)),
        pronunciation_word_marker: Some(pair(r#"<span class="hw">"#, r"</span>")),
    }
}

#[must_use]
pub fn collins() -> MarkerSourceConfig {
    MarkerSourceConfig {
        name: "Collins American English Dictionary".to_string(),
        entry_url: "http://www.collinsdictionary.com/dictionary/american/{WORD}".to_string(),
        audio_url: "http://www.collinsdictionary.com{PATH}".to_string(),
        api_key: None,
        cleanse: CleanseRules::default(),
        definition_markers: vec![pair(r#"<span class="def">\s*"#, r"\s*</span>")],
        pronunciation_url_marker: Some(pair(r#"data-src-mp3=""#, r#"""#)),
        pronunciation_word_marker: Some(pair(r#"<h1 class="orth h1_entry">"#, r"<")),
    }
}

#[must_use]
pub fn randomhouse() -> MarkerSourceConfig {
    MarkerSourceConfig {
        name: "Dictionary.com (Random House Unabridged Dictionary)".to_string(),
        entry_url: "http://www.dictionary.com/browse/{WORD}?s=t".to_string(),
        audio_url: "{PATH}".to_string(),
        api_key: None,
        cleanse: CleanseRules {
            remove: patterns(&[
                r#":\s*<div class="def-block def-inline-example">.*?</div>"#,
                r#"[:]*\s*<span class="dbox-ex">.*?</span>"#,
            ]),
            collapse_inner: Vec::new(),
            strip_outer: vec![pair(r"<span.*?>", r"</span>"), pair(r"<a.*?>", r"</a>")],
        },
        definition_markers: vec![pair(r#"<div class="def-content">\s*"#, r"\s*</div>")],
        pronunciation_url_marker: Some(pair(
            r#"type="audio/ogg"> <source src=""#,
            r#"" type="audio/mpeg"> </audio>"#,
        )),
        pronunciation_word_marker: Some(pair(r#"<h1 class="head-entry">"#, r"</h1>")),
    }
}

#[must_use]
pub fn google() -> MarkerSourceConfig {
    MarkerSourceConfig {
        name: "Google".to_string(),
        entry_url: "http://www.google.com/search?hl=en&q=define+{WORD}".to_string(),
        audio_url: "http:{PATH}".to_string(),
        api_key: None,
        cleanse: CleanseRules {
            remove: patterns(&["\u{b7}", "&quot;", SCRIPT_BLOCK, STYLE_BLOCK]),
            collapse_inner: Vec::new(),
            strip_outer: vec![
                pair(r"<b>", r"</b>"),
                pair(r"<i>", r"</i>"),
                pair(r"<u>", r"</u>"),
            ],
        },
        definition_markers: vec![
            pair(r#"<div style="display:inline" data-dobid="dfn"><span>"#, r"</span>"),
            pair(
                r#"<div class="_oDd" data-hveid=".*?"><span class="_Tgc">"#,
                r"</span></div>",
            ),
        ],
        pronunciation_url_marker: Some(pair(r#"<audio src=""#, r#"" data-dobid="aud""#)),
        pronunciation_word_marker: Some(pair(r#"<span data-dobid="hdw">"#, r"</span>")),
    }
}

#[must_use]
pub fn freedictionary() -> MarkerSourceConfig {
    MarkerSourceConfig {
        name: "The Free Dictionary by Farlex".to_string(),
        entry_url: "http://www.thefreedictionary.com/{WORD}".to_string(),
        audio_url: "http://img2.tfd.com/pron/mp3/{PATH}.mp3".to_string(),
        api_key: None,
        cleanse: CleanseRules {
            remove: patterns(&[
                r#"<div class="sds-list">.*?<span lang=.*?</div>"#,
                r#"<span class="illustration">.*?</span>"#,
                SCRIPT_BLOCK,
                STYLE_BLOCK,
            ]),
            ..CleanseRules::default()
        },
        definition_markers: vec![pair(r#"<div class="sds-list"><b>.*?</b>\s*"#, r"\s*</div>")],
        pronunciation_url_marker: Some(pair(r#"data-snd=""#, r#"""#)),
        pronunciation_word_marker: Some(pair(r"<h1>", r"</h1>")),
    }
}

/// Pronunciation videos only; never yields definitions.
#[must_use]
pub fn youtube() -> MarkerSourceConfig {
    MarkerSourceConfig {
        name: "YouTube".to_string(),
        entry_url:
            "http://www.google.com/search?hl=en&q=YouTube+Pronunciation+Guide+How+to+Pronounce+{WORD}"
                .to_string(),
        audio_url: "{PATH}".to_string(),
        api_key: None,
        cleanse: CleanseRules {
            remove: patterns(&[SCRIPT_BLOCK, STYLE_BLOCK]),
            ..CleanseRules::default()
        },
        definition_markers: Vec::new(),
        pronunciation_url_marker: Some(pair(
            r#"<div class="rc" data-hveid=.*?<h3 class="r"><a href=""#,
            r#"" onmousedown.*?>How to Pronounce.*? - YouTube</a></h3>.*?<div class="f slp">.*?Uploaded by Pronunciation Guide</div>"#,
        )),
        pronunciation_word_marker: Some(pair(
            r#"<div class="rc" data-hveid=.*?<h3 class="r"><a href=".*?" onmousedown.*?>How to Pronounce\s*"#,
            r#"\s*- YouTube</a></h3>.*?<div class="f slp">.*?Uploaded by Pronunciation Guide</div>"#,
        )),
    }
}

#[must_use]
pub fn oxford() -> MarkerSourceConfig {
    MarkerSourceConfig {
        name: "Oxford Dictionaries".to_string(),
        entry_url:
            "http://www.oxforddictionaries.com/us/definition/american_english/{WORD}?searchDictCode=all"
                .to_string(),
        audio_url: "{PATH}".to_string(),
        api_key: None,
        cleanse: CleanseRules {
            remove: patterns(&["\u{b7}", r#"<span class="punctuation">"#]),
            ..CleanseRules::default()
        },
        definition_markers: vec![pair(r#"<span class="definition">"#, r"[:]*</span>")],
        pronunciation_url_marker: Some(pair(r#"data-src-mp3=""#, r#"""#)),
        pronunciation_word_marker: Some(pair(r#"<h2 class="pageTitle">"#, r"\n</h2>")),
    }
}

#[must_use]
pub fn collegiate() -> CollegiateConfig {
    CollegiateConfig::default()
}

/// Marker configuration for a built-in key, if the key names a marker source.
#[must_use]
pub fn marker_config(key: &str) -> Option<MarkerSourceConfig> {
    match key {
        CAMBRIDGE => Some(cambridge()),
        COLLINS => Some(collins()),
        RANDOMHOUSE => Some(randomhouse()),
        GOOGLE => Some(google()),
        FREEDICTIONARY => Some(freedictionary()),
        YOUTUBE => Some(youtube()),
        OXFORD => Some(oxford()),
        _ => None,
    }
}
