// src/error.rs
use thiserror::Error;

/// Transport/HTTP failure for a single request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("could not build HTTP client: {0}")]
    Client(String),

    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("could not read body of {url}: {message}")]
    Body { url: String, message: String },

    #[error("fetching {url} panicked: {message}")]
    Panicked { url: String, message: String },
}

impl FetchError {
    pub fn transport(url: &str, err: impl std::fmt::Display) -> Self {
        FetchError::Transport { url: s!(url), message: err.to_string() }
    }
}

/// Fatal outcome of a crawl. The variant names the stage that failed.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("event index unavailable: {0}")]
    Index(#[source] FetchError),

    #[error("event {location} failed: {source}")]
    Event {
        location: String,
        #[source]
        source: FetchError,
    },

    #[error("giving up after {consecutive} consecutive event failures (last: {last})")]
    TooManyFailures { consecutive: usize, last: FetchError },
}

/// Splitting an `"A-B"` stat pair failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("no '{delim}' in {input:?}")]
    MissingDelimiter { input: String, delim: char },

    #[error("{part:?} in {input:?} is not a number")]
    NotANumber { input: String, part: String },
}
