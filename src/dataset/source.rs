//! Where the symbol dataset comes from
//!
//! The key abstraction is the `DatasetSource` trait, which separates the
//! reload path (read the cached copy) from the redownload path (fetch the
//! remote document, then replace the cached copy once it is known to load).
//!
//! Implementations:
//! - `StdDatasetSource`: cache file on disk, blocking HTTP fetch (`fetch` feature)
//! - `MemoryDatasetSource`: in-memory documents (tests, WASM hosts)

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::info;
use parking_lot::RwLock;

use crate::utils::error::{DatasetError, FetchError};

/// Remote location of the W3C character dataset
pub const DEFAULT_DATASET_URL: &str = "https://www.w3.org/Math/characters/unicode.xml";

/// Fetches taking longer than this are failed loads
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// File name of the cached copy inside the data directory
pub const CACHE_FILE_NAME: &str = "latex_unicode.xml";

/// Cache path under the platform data directory
/// (`~/.local/share/latex-unicode/latex_unicode.xml` on Linux)
pub fn default_cache_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("org", "latex-unicode", "latex-unicode")
        .map(|dirs| dirs.data_dir().join(CACHE_FILE_NAME))
}

/// Trait for obtaining the raw dataset document
pub trait DatasetSource: Send + Sync {
    /// Read the locally cached document
    fn load_cached(&self) -> Result<String, DatasetError>;

    /// Whether a cached document exists
    fn has_cache(&self) -> bool;

    /// Fetch the remote document. The cached copy is not touched.
    fn fetch_remote(&self) -> Result<String, FetchError>;

    /// Replace the cached copy with `document`
    fn store_cached(&self, document: &str) -> Result<(), DatasetError>;

    /// Human-readable cache location, for diagnostics
    fn describe(&self) -> String;
}

/// Dataset cached on the local filesystem, fetched over HTTP
#[derive(Debug, Clone)]
pub struct StdDatasetSource {
    cache_path: PathBuf,
    url: String,
    timeout: Duration,
}

impl StdDatasetSource {
    pub fn new(cache_path: impl Into<PathBuf>) -> Self {
        Self {
            cache_path: cache_path.into(),
            url: DEFAULT_DATASET_URL.to_string(),
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Write the cache through a sibling temp file so readers never see a
    /// half-written document
    fn write_cache(&self, body: &str) -> Result<(), DatasetError> {
        if let Some(parent) = self.cache_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DatasetError::io(parent, e))?;
        }
        let tmp = self.cache_path.with_extension("xml.part");
        std::fs::write(&tmp, body).map_err(|e| DatasetError::io(&tmp, e))?;
        std::fs::rename(&tmp, &self.cache_path).map_err(|e| DatasetError::io(&self.cache_path, e))
    }

    #[cfg(feature = "fetch")]
    fn fetch(&self) -> Result<String, FetchError> {
        let transport = |e: reqwest::Error| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: self.url.clone(),
                    seconds: self.timeout.as_secs(),
                }
            } else {
                FetchError::Transport {
                    url: self.url.clone(),
                    message: e.to_string(),
                }
            }
        };

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("latex-unicode/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(transport)?;

        log::debug!("fetching dataset from {}", self.url);
        let response = client.get(&self.url).send().map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }
        response.text().map_err(transport)
    }

    #[cfg(not(feature = "fetch"))]
    fn fetch(&self) -> Result<String, FetchError> {
        Err(FetchError::Unsupported)
    }
}

impl DatasetSource for StdDatasetSource {
    fn load_cached(&self) -> Result<String, DatasetError> {
        match std::fs::read_to_string(&self.cache_path) {
            Ok(body) => Ok(body),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(DatasetError::NotCached {
                path: self.cache_path.clone(),
            }),
            Err(e) => Err(DatasetError::io(&self.cache_path, e)),
        }
    }

    fn has_cache(&self) -> bool {
        self.cache_path.is_file()
    }

    fn fetch_remote(&self) -> Result<String, FetchError> {
        let body = self.fetch()?;
        info!("downloaded {} bytes from {}", body.len(), self.url);
        Ok(body)
    }

    fn store_cached(&self, document: &str) -> Result<(), DatasetError> {
        self.write_cache(document)?;
        info!("cached dataset at {}", self.cache_path.display());
        Ok(())
    }

    fn describe(&self) -> String {
        self.cache_path.display().to_string()
    }
}

/// In-memory dataset source
///
/// `cached` plays the role of the local copy; `remote`, if set, is what a
/// fetch returns.
#[derive(Debug, Default)]
pub struct MemoryDatasetSource {
    cached: RwLock<Option<String>>,
    remote: RwLock<Option<String>>,
}

impl MemoryDatasetSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Source with a cached document and nothing to download
    pub fn with_cached(document: impl Into<String>) -> Self {
        let source = Self::new();
        source.set_cached(document);
        source
    }

    pub fn set_cached(&self, document: impl Into<String>) {
        *self.cached.write() = Some(document.into());
    }

    pub fn set_remote(&self, document: impl Into<String>) {
        *self.remote.write() = Some(document.into());
    }
}

impl DatasetSource for MemoryDatasetSource {
    fn load_cached(&self) -> Result<String, DatasetError> {
        self.cached.read().clone().ok_or_else(|| DatasetError::NotCached {
            path: PathBuf::from(CACHE_FILE_NAME),
        })
    }

    fn has_cache(&self) -> bool {
        self.cached.read().is_some()
    }

    fn fetch_remote(&self) -> Result<String, FetchError> {
        self.remote.read().clone().ok_or(FetchError::Unsupported)
    }

    fn store_cached(&self, document: &str) -> Result<(), DatasetError> {
        self.set_cached(document);
        Ok(())
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}
