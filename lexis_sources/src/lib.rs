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

pub mod builtin;
pub mod catalogue;
pub mod collegiate;
pub mod marker_source;

pub use catalogue::SourceCatalogue;
pub use collegiate::{CollegiateConfig, CollegiateSource};
pub use marker_source::{MarkerSource, MarkerSourceConfig};
