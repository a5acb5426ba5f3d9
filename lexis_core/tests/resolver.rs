//! Integration tests for priority resolution across sources.
//!
//! These tests verify that definitions and pronunciation are accepted
//! independently and that no source is queried once both are settled.

mod common;

use common::FakeSource;
use lexis_core::{SourceAdapter, SourcePriorityResolver};
use std::sync::Arc;

fn resolver_over(sources: &[Arc<FakeSource>]) -> SourcePriorityResolver {
    SourcePriorityResolver::new(
        sources
            .iter()
            .map(|s| Arc::clone(s) as Arc<dyn SourceAdapter>)
            .collect(),
    )
}

#[tokio::test]
async fn test_second_source_supplies_both_fields() {
    let empty = Arc::new(FakeSource::new("Adapter1", &[], "", ""));
    let full = Arc::new(FakeSource::new(
        "Adapter2",
        &["(noun) a visible mass of water droplets"],
        "cloud",
        "http://x/cloud.mp3",
    ));
    let resolver = resolver_over(&[Arc::clone(&empty), Arc::clone(&full)]);

    let resolution = resolver.resolve("cloud").await;

    assert_eq!(
        resolution.definitions,
        vec!["(noun) a visible mass of water droplets"]
    );
    assert_eq!(resolution.definition_source, "Adapter2");
    assert_eq!(resolution.pronunciation_form, "cloud");
    assert_eq!(resolution.pronunciation_url, "http://x/cloud.mp3");
    assert_eq!(resolution.pronunciation_source, "Adapter2");
    assert_eq!(empty.fetch_count() + full.fetch_count(), 2);
}

#[tokio::test]
async fn test_stops_once_both_fields_are_accepted() {
    let first = Arc::new(FakeSource::new("First", &["a definition"], "word", "http://x/w.mp3"));
    let second = Arc::new(FakeSource::new("Second", &["other"], "word", "http://y/w.mp3"));
    let resolver = resolver_over(&[Arc::clone(&first), Arc::clone(&second)]);

    let resolution = resolver.resolve("word").await;

    assert_eq!(resolution.definition_source, "First");
    assert_eq!(first.fetch_count(), 1);
    assert_eq!(second.fetch_count(), 0);
}

#[tokio::test]
async fn test_fields_may_come_from_different_sources() {
    let definitions_only = Arc::new(FakeSource::new("Text", &["a definition"], "", ""));
    let video = Arc::new(FakeSource::new("Video", &[], "word", "http://v/word"));
    let unused = Arc::new(FakeSource::new("Unused", &["late"], "word", "http://u/word"));
    let resolver = resolver_over(&[
        Arc::clone(&definitions_only),
        Arc::clone(&video),
        Arc::clone(&unused),
    ]);

    let resolution = resolver.resolve("word").await;

    assert_eq!(resolution.definition_source, "Text");
    assert_eq!(resolution.pronunciation_source, "Video");
    assert_eq!(unused.fetch_count(), 0);
}

#[tokio::test]
async fn test_failing_source_is_skipped() {
    let down = Arc::new(FakeSource::failing("Down"));
    let up = Arc::new(FakeSource::new("Up", &["a definition"], "word", "http://x/w"));
    let resolver = resolver_over(&[Arc::clone(&down), Arc::clone(&up)]);

    let resolution = resolver.resolve("word").await;

    assert_eq!(down.fetch_count(), 1);
    assert_eq!(resolution.definition_source, "Up");
    assert!(resolution.has_pronunciation());
}

#[tokio::test]
async fn test_nothing_found_exhausts_the_list() {
    let a = Arc::new(FakeSource::new("A", &[], "", ""));
    let b = Arc::new(FakeSource::new("B", &[], "", ""));
    let resolver = resolver_over(&[Arc::clone(&a), Arc::clone(&b)]);

    let resolution = resolver.resolve("zzz").await;

    assert!(!resolution.has_definitions());
    assert!(!resolution.has_pronunciation());
    assert_eq!(a.fetch_count() + b.fetch_count(), 2);
}

#[tokio::test]
async fn test_lookup_each_queries_every_source() {
    let a = Arc::new(FakeSource::new("A", &["one"], "a", "http://a"));
    let down = Arc::new(FakeSource::failing("Down"));
    let resolver = resolver_over(&[Arc::clone(&a), Arc::clone(&down)]);

    let reports = resolver.lookup_each("a").await;

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].definitions, vec!["one"]);
    assert!(reports[0].error.is_none());
    assert!(reports[1].error.is_some());
    assert_eq!(a.fetch_count(), 1);
}
