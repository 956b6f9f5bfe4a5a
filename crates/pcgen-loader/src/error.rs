//! Loader error types.

use pcgen_core::PcgenError;
use thiserror::Error;

use crate::locations::Document;

/// Loader result type.
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Failure to fetch a document's raw text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Transport-level failure (DNS, connect, TLS, body read).
    #[error("request failed: {0}")]
    Http(String),

    /// The server answered with a non-success status.
    #[error("HTTP status {0}")]
    Status(u16),

    /// Filesystem failure.
    #[error("IO error: {0}")]
    Io(String),

    /// The location cannot be handled by this source.
    #[error("unsupported location")]
    Unsupported,
}

impl From<std::io::Error> for FetchError {
    fn from(e: std::io::Error) -> Self {
        FetchError::Io(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => FetchError::Status(status.as_u16()),
            None => FetchError::Http(e.to_string()),
        }
    }
}

/// Failure to load one of the startup documents.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoaderError {
    /// The document could not be fetched.
    #[error("{document} ({location}): {source}")]
    Fetch {
        /// Which document.
        document: Document,
        /// Where it was fetched from.
        location: String,
        /// Underlying failure.
        #[source]
        source: FetchError,
    },

    /// The document is not valid JSON of the expected shape.
    #[error("{document} ({location}): invalid JSON: {message}")]
    Parse {
        /// Which document.
        document: Document,
        /// Where it was fetched from.
        location: String,
        /// Parser diagnostic.
        message: String,
    },
}

impl LoaderError {
    /// The document that failed.
    pub fn document(&self) -> Document {
        match self {
            Self::Fetch { document, .. } | Self::Parse { document, .. } => *document,
        }
    }
}

impl From<LoaderError> for PcgenError {
    fn from(err: LoaderError) -> Self {
        PcgenError::load(err.to_string())
    }
}
