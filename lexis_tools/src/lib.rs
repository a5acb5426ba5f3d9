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

pub mod command_runner;
pub mod fs_store;
pub mod player;
pub mod web_fetch;

pub use fs_store::LocalFileStore;
pub use player::{CommandPlayer, PlayerConfig};
pub use web_fetch::{HttpFetcher, WebFetchConfig};
