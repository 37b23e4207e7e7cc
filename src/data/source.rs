//! Where the dataset comes from.
//!
//! A render is single-shot: one `fetch` per chart, no retry, no timeout of our
//! own. Every source hands the raw text to [`Dataset::from_json`] so payload
//! errors surface identically regardless of transport.

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::Dataset;
use crate::error::Result;

/// Asynchronous provider of a [`Dataset`].
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Retrieve and parse the document.
    ///
    /// # Errors
    ///
    /// [`crate::Error::Network`] for transport failures,
    /// [`crate::Error::Format`] for payloads of the wrong shape.
    async fn fetch(&self) -> Result<Dataset>;

    /// Human-readable location, used in log events.
    fn location(&self) -> String;
}

fn log_outcome(location: &str, result: &Result<Dataset>) {
    match result {
        Ok(ds) => info!(
            source = %location,
            records = ds.len(),
            base_temperature = ds.base_temperature(),
            "Dataset loaded"
        ),
        Err(e) => warn!(source = %location, error = %e, "Dataset fetch failed"),
    }
}

/// Fetches the document over HTTP(S).
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpDataSource {
    client: reqwest::Client,
    url: String,
}

#[cfg(feature = "http")]
impl HttpDataSource {
    /// Source for the document at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Network`] if the HTTP client (TLS backend)
    /// cannot be initialised.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder().tcp_nodelay(true).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Source for the published dataset at [`crate::config::DEFAULT_DATA_URL`].
    ///
    /// # Errors
    ///
    /// See [`HttpDataSource::new`].
    pub fn published() -> Result<Self> {
        Self::new(crate::config::DEFAULT_DATA_URL)
    }

    /// Use a preconfigured client (proxies, timeouts, user agent).
    #[must_use]
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// The URL this source fetches.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn request(&self) -> Result<Dataset> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        let body = response.error_for_status()?.text().await?;
        debug!(%status, bytes = body.len(), "Dataset response received");
        Dataset::from_json(&body)
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl DataSource for HttpDataSource {
    async fn fetch(&self) -> Result<Dataset> {
        debug!(url = %self.url, "Requesting dataset");
        let result = self.request().await;
        log_outcome(&self.url, &result);
        result
    }

    fn location(&self) -> String {
        self.url.clone()
    }
}

/// Reads a local copy of the document.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileDataSource {
    path: PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileDataSource {
    /// Source for the document stored at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait]
impl DataSource for FileDataSource {
    async fn fetch(&self) -> Result<Dataset> {
        let result = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => Dataset::from_json(&text),
            Err(e) => Err(e.into()),
        };
        log_outcome(&self.location(), &result);
        result
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// Serves a document already held in memory (embedded assets, the WASM host).
#[derive(Debug, Clone)]
pub struct StaticDataSource {
    json: String,
}

impl StaticDataSource {
    /// Source that parses `json` on every fetch.
    #[must_use]
    pub fn new(json: impl Into<String>) -> Self {
        Self { json: json.into() }
    }
}

#[async_trait]
impl DataSource for StaticDataSource {
    async fn fetch(&self) -> Result<Dataset> {
        let result = Dataset::from_json(&self.json);
        log_outcome("<static>", &result);
        result
    }

    fn location(&self) -> String {
        "<static>".to_string()
    }
}
