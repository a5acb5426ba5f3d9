//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy with its own input type, dispatched
//! statically from `main`.

use lexis_config::Config;
use lexis_core::{CacheResolutionCascade, Fetcher, FileStore};
use lexis_sources::SourceCatalogue;
use lexis_tools::{HttpFetcher, LocalFileStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

mod draft;
mod info;
mod init;
mod lookup;
mod resolve;
mod version;

pub use draft::{DraftInput, DraftStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use lookup::{LookupInput, LookupStrategy};
pub use resolve::{ResolveInput, ResolveStrategy};
pub use version::VersionStrategy;

/// Components shared by the commands that talk to sources.
pub struct AppContext {
    pub config: Config,
    /// Directory that relative config paths resolve against.
    pub base_dir: PathBuf,
    pub fetcher: Arc<dyn Fetcher>,
    pub catalogue: SourceCatalogue,
}

impl AppContext {
    pub fn load() -> anyhow::Result<Self> {
        let config = Config::load()?;
        let base_dir = Config::config_dir()?;
        info!("Loaded config from {}", base_dir.join("config.json").display());

        let fetcher: Arc<dyn Fetcher> = Arc::new(HttpFetcher::new(config.fetch.clone())?);
        let catalogue = config.catalogue(Arc::clone(&fetcher));

        Ok(Self {
            config,
            base_dir,
            fetcher,
            catalogue,
        })
    }

    /// Cascade over the configured primary source and the local file system.
    pub fn cascade(&self, offline: bool) -> anyhow::Result<CacheResolutionCascade> {
        let primary = self.catalogue.entry_source(&self.config.sources.primary)?;
        let store: Arc<dyn FileStore> = Arc::new(LocalFileStore);
        Ok(CacheResolutionCascade::new(
            primary,
            Arc::clone(&self.fetcher),
            store,
            self.config.cascade_settings(&self.base_dir),
        )
        .offline(offline))
    }
}

/// Core trait defining the contract for all command strategies.
///
/// # Design Principles
/// - **Static dispatch**: All calls are monomorphized at compile time
/// - **Type safety**: Each strategy defines its own input type via associated type
/// - **Extensibility**: Adding new commands requires only implementing this trait
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}
