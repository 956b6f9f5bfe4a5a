//! Document sources.
//!
//! A [`DocumentSource`] turns a location into raw text. The loader does the
//! JSON parsing, so sources only deal with transport.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::error::FetchError;

/// Fetches the raw text of a document.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Returns the full body at `location`.
    async fn fetch(&self, location: &str) -> Result<String, FetchError>;
}

/// Returns true for `http://` and `https://` locations.
pub fn is_http(location: &str) -> bool {
    let lower = location.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

// =============================================================================
// FILE SOURCE
// =============================================================================

/// Reads documents from the local filesystem.
///
/// Relative paths resolve against `root` when one is set, otherwise against
/// the working directory. `file://` URLs are accepted.
#[derive(Debug, Clone, Default)]
pub struct FileSource {
    root: Option<PathBuf>,
}

impl FileSource {
    /// Creates a source resolving relative paths against the working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source resolving relative paths against `root`.
    pub fn with_root(root: impl AsRef<Path>) -> Self {
        Self {
            root: Some(root.as_ref().to_path_buf()),
        }
    }

    fn resolve(&self, location: &str) -> Result<PathBuf, FetchError> {
        if location.starts_with("file:") {
            let url = Url::parse(location).map_err(|_| FetchError::Unsupported)?;
            return url.to_file_path().map_err(|()| FetchError::Unsupported);
        }
        if is_http(location) {
            return Err(FetchError::Unsupported);
        }

        let path = Path::new(location);
        Ok(match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        })
    }
}

#[async_trait]
impl DocumentSource for FileSource {
    async fn fetch(&self, location: &str) -> Result<String, FetchError> {
        let path = self.resolve(location)?;
        debug!(path = %path.display(), "reading document");
        Ok(tokio::fs::read_to_string(&path).await?)
    }
}

// =============================================================================
// HTTP SOURCE
// =============================================================================

/// Fetches documents over HTTP(S). Non-success statuses are failures.
#[derive(Debug, Clone, Default)]
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    /// Creates a source with a default client.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentSource for HttpSource {
    async fn fetch(&self, location: &str) -> Result<String, FetchError> {
        if !is_http(location) {
            return Err(FetchError::Unsupported);
        }

        debug!(url = location, "fetching document");
        let response = self.client.get(location).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        Ok(response.text().await?)
    }
}

// =============================================================================
// AUTO SOURCE
// =============================================================================

/// Dispatches HTTP(S) locations to [`HttpSource`] and everything else to
/// [`FileSource`].
#[derive(Debug, Clone, Default)]
pub struct AutoSource {
    files: FileSource,
    http: HttpSource,
}

impl AutoSource {
    /// Creates a dispatching source.
    pub fn new(files: FileSource, http: HttpSource) -> Self {
        Self { files, http }
    }
}

#[async_trait]
impl DocumentSource for AutoSource {
    async fn fetch(&self, location: &str) -> Result<String, FetchError> {
        if is_http(location) {
            self.http.fetch(location).await
        } else {
            self.files.fetch(location).await
        }
    }
}
