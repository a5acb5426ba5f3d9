//! Parsing of collegiate API responses into entries.

use async_trait::async_trait;
use lexis_core::{EntryParser, FetchError, Fetcher, ParseError, SourceAdapter, disambiguate};
use lexis_sources::{CollegiateConfig, CollegiateSource};
use std::sync::Arc;
use std::sync::Mutex;

const CLOUD: &str = r#"<?xml version="1.0" encoding="utf-8" ?>
<entry_list version="1.0">
  <entry id="cloud[1]">
    <ew>cloud</ew>
    <hw hindex="1">cloud</hw>
    <sound><wav>cloud001.wav</wav><wpr>!klaud</wpr></sound>
    <pr>ˈklau̇d</pr>
    <fl>noun</fl>
    <et>Middle English <it>clud</it> rock, mass of earth</et>
    <def>
      <date>13th century</date>
      <sn>1 a</sn>
      <dt>:a visible mass of particles of condensed vapor suspended in the atmosphere <vi>dark <it>clouds</it> overhead</vi></dt>
      <sn>b</sn>
      <dt>:a usually visible mass of minute particles suspended in the air <sx>smoke</sx> or dust <dx>compare <dxt>haze</dxt></dx></dt>
      <sn>2</sn>
      <dt>:<un>used of something that obscures or blemishes</un></dt>
    </def>
    <art><bmp>cloud.bmp</bmp><cap>clouds: 1 cirrus, 2 cumulus</cap></art>
    <uro><ure>cloud*less</ure> <sound><wav>cloud002.wav</wav></sound> <fl>adjective</fl></uro>
    <dro><drp>in the clouds</drp> <def><dt>:not in touch with reality</dt></def></dro>
  </entry>
  <entry id="cloud[2]">
    <ew>cloud</ew>
    <hw hindex="2">cloud</hw>
    <fl>verb</fl>
    <in><if>cloud*ed</if>; <if>cloud*ing</if></in>
    <def>
      <date>14th century</date>
      <dt>:to make opaque especially with steam or smoke</dt>
      <dt>:to make unclear or confused</dt>
    </def>
  </entry>
  <entry id="clouded leopard">
    <ew>clouded leopard</ew>
    <hw>clouded leopard</hw>
    <fl>noun</fl>
    <def><dt>:a medium-sized arboreal cat of southeastern Asia</dt></def>
  </entry>
</entry_list>"#;

struct Recorder {
    urls: Mutex<Vec<String>>,
}

#[async_trait]
impl Fetcher for Recorder {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        if let Ok(mut urls) = self.urls.lock() {
            urls.push(url.to_string());
        }
        Ok(CLOUD.to_string())
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.fetch_text(url).await.map(String::into_bytes)
    }
}

fn source() -> CollegiateSource {
    CollegiateSource::new(
        CollegiateConfig::default(),
        Arc::new(Recorder {
            urls: Mutex::new(Vec::new()),
        }),
    )
}

#[test]
fn test_entries_and_headword_fields() {
    let Ok(entries) = source().parse_entries("cloud", CLOUD) else {
        panic!("response should parse");
    };

    assert_eq!(entries.len(), 3);
    let noun = &entries[0];
    assert_eq!(noun.source, "Merriam-Webster's Collegiate Dictionary");
    assert_eq!(noun.entry_word, "cloud");
    assert_eq!(noun.head_word, "cloud");
    assert_eq!(noun.functional_label, "noun");
    assert_eq!(noun.etymology, "Middle English clud rock, mass of earth");
    assert_eq!(entries[1].functional_label, "verb");
    assert_eq!(entries[2].entry_word, "clouded leopard");
}

#[test]
fn test_pronunciation_and_respelling() {
    let Ok(entries) = source().parse_entries("cloud", CLOUD) else {
        panic!("response should parse");
    };

    let Some(pronunciation) = &entries[0].pronunciation else {
        panic!("first entry carries a sound element");
    };
    assert_eq!(
        pronunciation.audio_url,
        "http://media.merriam-webster.com/soundc11/c/cloud001.wav"
    );
    assert_eq!(pronunciation.word_pronunciation, "!klaud");
    assert_eq!(pronunciation.spelling, "cloud");

    let Some(respelling) = &entries[0].respelling else {
        panic!("first entry carries a pr element");
    };
    assert_eq!(respelling.text, "\\ˈklau̇d\\");
    assert_eq!(respelling.form, "cloud");
    assert!(entries[1].pronunciation.is_none());
}

#[test]
fn test_senses_are_cleaned() {
    let Ok(entries) = source().parse_entries("cloud", CLOUD) else {
        panic!("response should parse");
    };

    let senses = &entries[0].senses;
    assert_eq!(senses.len(), 3);
    assert_eq!(
        senses[0].definition,
        "a visible mass of particles of condensed vapor suspended in the atmosphere"
    );
    assert_eq!(senses[0].examples, vec!["dark clouds overhead"]);
    assert_eq!(senses[0].date, "13th century");
    assert_eq!(
        senses[1].definition,
        "a usually visible mass of minute particles suspended in the air smoke or dust"
    );
    assert_eq!(senses[2].definition, "used of something that obscures or blemishes");
}

#[test]
fn test_run_on_blocks_become_inflections() {
    let Ok(entries) = source().parse_entries("cloud", CLOUD) else {
        panic!("response should parse");
    };

    let noun = &entries[0].inflections;
    assert_eq!(noun.len(), 2);
    assert_eq!(noun[0].form, "cloud*less");
    assert_eq!(noun[0].spelling, "cloudless");
    assert_eq!(noun[0].functional_label, "adjective");
    let Some(p) = &noun[0].pronunciation else {
        panic!("run-on entry carries a sound element");
    };
    assert_eq!(p.spelling, "cloudless");
    assert_eq!(noun[1].functional_label, "defined run-on phrase");
    assert_eq!(noun[1].senses[0].definition, "not in touch with reality");

    let verb = &entries[1].inflections;
    let forms: Vec<&str> = verb.iter().map(|i| i.spelling.as_str()).collect();
    assert_eq!(forms, vec!["clouded", "clouding"]);
    assert_eq!(entries[1].senses.len(), 2);
}

#[test]
fn test_illustrations() {
    let Ok(entries) = source().parse_entries("cloud", CLOUD) else {
        panic!("response should parse");
    };

    assert_eq!(entries[0].illustrations.len(), 1);
    assert_eq!(
        entries[0].illustrations[0].illustration_url,
        "https://www.merriam-webster.com/art/dict/cloud.htm"
    );
    assert_eq!(entries[0].illustrations[0].caption, "clouds: 1 cirrus, 2 cumulus");
}

#[test]
fn test_suggestions_only_yield_no_entries() {
    let raw = r#"<?xml version="1.0" encoding="utf-8" ?>
<entry_list version="1.0"><suggestion>clout</suggestion><suggestion>cloudy</suggestion></entry_list>"#;
    let Ok(entries) = source().parse_entries("clowd", raw) else {
        panic!("suggestion list is well-formed");
    };
    assert!(entries.is_empty());
}

#[test]
fn test_malformed_markup_is_a_parse_error() {
    let result = source().parse_entries("cloud", "<entry_list><entry><hw>cloud</fl></entry_list>");
    assert!(matches!(result, Err(ParseError::Markup { .. })));
}

#[test]
fn test_adapter_view_disambiguates() {
    let source = source();
    let Ok(definitions) = source.parse_definitions("cloud", CLOUD) else {
        panic!("response should parse");
    };
    assert_eq!(
        definitions[0],
        "(noun) a visible mass of particles of condensed vapor suspended in the atmosphere"
    );
    assert!(definitions.contains(&"(verb) to make unclear or confused".to_string()));
    assert!(!definitions.iter().any(|d| d.contains("arboreal")));

    let Ok((form, url)) = source.parse_pronunciation("cloud", CLOUD) else {
        panic!("response should parse");
    };
    assert_eq!(form, "cloud");
    assert!(url.ends_with("/c/cloud001.wav"));
}

#[tokio::test]
async fn test_fetch_builds_keyed_url() {
    let recorder = Arc::new(Recorder {
        urls: Mutex::new(Vec::new()),
    });
    let source = CollegiateSource::new(
        CollegiateConfig {
            api_key: Some("secret".to_string()),
            ..CollegiateConfig::default()
        },
        Arc::clone(&recorder) as Arc<dyn Fetcher>,
    );

    let Ok(raw) = source.fetch_entry("cloud").await else {
        panic!("recorder never fails");
    };
    assert!(raw.contains("entry_list"));
    let Ok(urls) = recorder.urls.lock() else {
        panic!("lock poisoned");
    };
    assert_eq!(
        urls.as_slice(),
        ["http://www.dictionaryapi.com/api/v1/references/collegiate/xml/cloud?key=secret"]
    );
}

const COLOUR: &str = r#"<entry_list version="1.0">
  <entry id="colour">
    <ew>colour</ew>
    <hw>col*our</hw>
    <fl>noun</fl>
    <cx><cl>chiefly British spelling of</cl> <ct>color</ct></cx>
  </entry>
</entry_list>"#;

const DREAM: &str = r#"<entry_list version="1.0">
  <entry id="dream[2]">
    <ew>dream</ew>
    <hw>dream</hw>
    <fl>verb</fl>
    <in><if>dreamed</if> <pr>ˈdrēmd</pr> <sound><wav>dream002.wav</wav></sound>
      <il>or</il> <if>dreamt</if> <pr>ˈdremt</pr> <sound><wav>dream003.wav</wav></sound></in>
    <def><dt>:to have a dream</dt></def>
  </entry>
</entry_list>"#;

#[test]
fn test_cross_reference_reads_once() {
    let Ok(entries) = source().parse_entries("colour", COLOUR) else {
        panic!("response should parse");
    };
    let inflections = &entries[0].inflections;
    assert_eq!(inflections.len(), 1);
    assert_eq!(inflections[0].form, "color");
    assert!(inflections[0].functional_label.is_empty());

    let simplified = disambiguate("colour", &entries);
    assert_eq!(
        simplified.definitions,
        vec!["chiefly British spelling of color"]
    );
}

#[test]
fn test_inflection_block_attaches_to_neighbouring_forms() {
    let Ok(entries) = source().parse_entries("dream", DREAM) else {
        panic!("response should parse");
    };
    let inflections = &entries[0].inflections;
    assert_eq!(inflections.len(), 2);

    assert_eq!(inflections[0].form, "dreamed");
    assert!(inflections[0].functional_label.is_empty());
    let Some(first) = &inflections[0].pronunciation else {
        panic!("dreamed carries its own sound");
    };
    assert!(first.audio_url.ends_with("/d/dream002.wav"));

    assert_eq!(inflections[1].form, "dreamt");
    assert_eq!(inflections[1].functional_label, "or");
    let Some(second) = &inflections[1].pronunciation else {
        panic!("dreamt carries its own sound");
    };
    assert!(second.audio_url.ends_with("/d/dream003.wav"));
    let Some(respelling) = &inflections[1].respelling else {
        panic!("dreamt carries its own pr");
    };
    assert_eq!(respelling.text, "\\ˈdremt\\");
}
