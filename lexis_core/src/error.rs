use thiserror::Error;

pub type Result<T> = std::result::Result<T, LexisError>;

/// Failures talking to an external source.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Connection failed for {url}: {message}")]
    Connectivity { url: String, message: String },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Failed to read response from {url}: {message}")]
    Body { url: String, message: String },
}

impl FetchError {
    /// Whether the failure means the network itself is unreachable.
    #[must_use]
    pub const fn is_connectivity(&self) -> bool {
        matches!(self, Self::Connectivity { .. })
    }
}

/// Raw markup that could not be interpreted.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Malformed markup from {source_name}: {message}")]
    Markup {
        source_name: String,
        message: String,
    },

    #[error("Invalid pattern {pattern}: {message}")]
    Pattern { pattern: String, message: String },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum LexisError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Unknown source: {0}")]
    UnknownSource(String),
}
