use lexis_core::{EntryParser, SourceAdapter, disambiguate, render_override};
use tracing::info;

use super::AppContext;

/// Input parameters for the Draft command strategy.
#[derive(Debug, Clone)]
pub struct DraftInput {
    pub word: String,
    /// Source key; defaults to the primary source.
    pub source: Option<String>,
}

/// Strategy for drafting an override file.
///
/// Fetches the word from one source, collapses its entries and prints the
/// result in override-file form, ready to be edited and saved.
#[derive(Debug, Clone, Copy)]
pub struct DraftStrategy;

impl super::CommandStrategy for DraftStrategy {
    type Input = DraftInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let context = AppContext::load()?;
        let key = input
            .source
            .as_deref()
            .unwrap_or(&context.config.sources.primary);
        let source = context.catalogue.entry_source(key)?;

        info!("Drafting override for '{}' from {key}", input.word);
        let raw = source.fetch_entry(&input.word).await?;
        let entries = source.parse_entries(&input.word, &raw)?;
        let entry = disambiguate(&input.word, &entries);

        print!("{}", render_override(&entry));
        Ok(())
    }
}
