//! Priority lookup across the configured sources.

use lexis_core::SourcePriorityResolver;
use lexis_core::resolver::{PriorityResolution, SourceReport};
use tracing::info;

use super::AppContext;

/// Input parameters for the Lookup command strategy.
#[derive(Debug, Clone)]
pub struct LookupInput {
    pub word: String,
    /// A single source key, or `all` to report every source separately.
    pub source: Option<String>,
    /// Also print which source supplied each field.
    pub verbose: bool,
}

/// Strategy for looking a word up through the source priority list.
///
/// Definitions and pronunciation are taken from the first source that has
/// each; `--source all` instead prints what every source returned.
#[derive(Debug, Clone, Copy)]
pub struct LookupStrategy;

impl super::CommandStrategy for LookupStrategy {
    type Input = LookupInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let context = AppContext::load()?;
        let registry = context.catalogue.registry();

        let resolver = match input.source.as_deref() {
            None | Some("all") => {
                SourcePriorityResolver::new(registry.ordered(&context.config.sources.priority))
            }
            Some(key) => SourcePriorityResolver::new(vec![registry.require(key)?]),
        };
        info!(
            "Looking up '{}' across {} source(s)",
            input.word,
            resolver.sources().len()
        );

        if input.source.as_deref() == Some("all") {
            for report in resolver.lookup_each(&input.word).await {
                print_report(&report);
            }
        } else {
            let resolution = resolver.resolve(&input.word).await;
            print_resolution(&input.word, &resolution, input.verbose);
        }
        Ok(())
    }
}

fn print_resolution(word: &str, resolution: &PriorityResolution, verbose: bool) {
    println!("{word}");
    if resolution.has_definitions() {
        for definition in &resolution.definitions {
            println!("  - {definition}");
        }
    } else {
        println!("  (no definitions found)");
    }

    if resolution.has_pronunciation() {
        println!(
            "  Pronunciation: {} <{}>",
            resolution.pronunciation_form, resolution.pronunciation_url
        );
    } else {
        println!("  (no pronunciation found)");
    }

    if verbose {
        println!("  Definitions from: {}", resolution.definition_source);
        println!("  Pronunciation from: {}", resolution.pronunciation_source);
    }
}

fn print_report(report: &SourceReport) {
    println!("=== {} ===", report.source);
    if let Some(error) = &report.error {
        println!("  Error: {error}");
    }
    for definition in &report.definitions {
        println!("  - {definition}");
    }
    if !report.pronunciation_url.is_empty() {
        println!(
            "  Pronunciation: {} <{}>",
            report.pronunciation_form, report.pronunciation_url
        );
    }
    println!();
}
