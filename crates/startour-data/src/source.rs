//! Catalog sources: one blocking read of the whole resource as text
//!
//! The core only cares that a source produces the full text or fails. Callers
//! needing cancellation wrap the source; `HttpSource` can carry a client timeout.

use crate::error::FetchError;
use std::path::PathBuf;
use std::time::Duration;

/// Platform-agnostic catalog fetcher
pub trait CatalogSource: Send + Sync {
    /// Human-readable location, used in logs
    fn location(&self) -> String;

    /// Read the entire resource
    fn fetch_text(&self) -> Result<String, FetchError>;
}

/// Pick an HTTP source for `http://` and `https://` locations, a file otherwise
pub fn source_for(location: &str) -> Box<dyn CatalogSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpSource::new(location))
    } else {
        Box::new(FileSource::new(location))
    }
}

/// Blocking HTTP GET of the whole resource
#[derive(Clone, Debug)]
pub struct HttpSource {
    url: String,
    timeout: Option<Duration>,
}

impl HttpSource {
    /// No timeout: the fetch runs until the server finishes or fails
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), timeout: None }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl CatalogSource for HttpSource {
    fn location(&self) -> String {
        self.url.clone()
    }

    fn fetch_text(&self) -> Result<String, FetchError> {
        let http_err = |source| FetchError::Http { url: self.url.clone(), source };

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(http_err)?;

        tracing::info!("Fetching catalog from {}", self.url);
        let response = client.get(&self.url).send().map_err(http_err)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: self.url.clone(), status: status.as_u16() });
        }

        response.text().map_err(http_err)
    }
}

/// Local file on disk
#[derive(Clone, Debug)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for FileSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch_text(&self) -> Result<String, FetchError> {
        tracing::info!("Reading catalog from {:?}", self.path);
        std::fs::read_to_string(&self.path).map_err(|source| FetchError::Io {
            path: self.location(),
            source,
        })
    }
}

/// Catalog text already in memory
#[derive(Clone, Debug)]
pub struct StaticSource {
    label: String,
    text: String,
}

impl StaticSource {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self { label: label.into(), text: text.into() }
    }
}

impl CatalogSource for StaticSource {
    fn location(&self) -> String {
        self.label.clone()
    }

    fn fetch_text(&self) -> Result<String, FetchError> {
        Ok(self.text.clone())
    }
}
