#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod command;

use clap::{Parser, Subcommand};
use command::{
    CommandStrategy, DraftInput, DraftStrategy, InfoStrategy, InitStrategy, LookupInput,
    LookupStrategy, ResolveInput, ResolveStrategy, VersionStrategy,
};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "lexis")]
#[command(about = "Multi-source dictionary lookup with offline cache and overrides", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration
    Init,
    /// Show version
    Version,
    /// Show configuration
    Info,
    /// Look a word up through the source priority list
    Lookup {
        word: String,

        /// Query only this source, or `all` to report every source
        #[arg(short, long)]
        source: Option<String>,
    },
    /// Resolve words through cache, network and overrides
    Resolve {
        words: Vec<String>,

        /// Word list file, used when no words are given
        #[arg(short, long)]
        list: Option<PathBuf>,

        /// Never touch the network
        #[arg(long)]
        offline: bool,

        /// Play each resolved pronunciation
        #[arg(short, long)]
        play: bool,
    },
    /// Print an override file drafted from a source entry
    Draft {
        word: String,

        /// Source to draft from (defaults to the primary source)
        #[arg(short, long)]
        source: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Version => VersionStrategy.execute(()).await,
        Commands::Info => InfoStrategy.execute(()).await,
        Commands::Lookup { word, source } => {
            LookupStrategy
                .execute(LookupInput {
                    word,
                    source,
                    verbose: cli.verbose,
                })
                .await
        }
        Commands::Resolve {
            words,
            list,
            offline,
            play,
        } => {
            ResolveStrategy
                .execute(ResolveInput {
                    words,
                    list,
                    offline,
                    play,
                })
                .await
        }
        Commands::Draft { word, source } => {
            DraftStrategy.execute(DraftInput { word, source }).await
        }
    }
}
