//! Byte acquisition for workbook locations.
//!
//! A location is either a local path or an `http(s)` URL. [`DefaultSource`]
//! reads paths with `tokio::fs` and, with the `http` feature, downloads URLs
//! with `reqwest`. Anything implementing [`ByteSource`] can stand in for it.

use crate::error::{Error, Result};
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Where a workbook's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// A file on the local filesystem.
    Path(PathBuf),
    /// A remote `http` or `https` resource.
    Url(Url),
}

impl Location {
    /// Interpret a location string.
    ///
    /// `http` and `https` URLs stay URLs and `file` URLs become local paths.
    /// Strings that do not parse as a URL, or use any other scheme (such as a
    /// Windows drive letter), are taken as filesystem paths. Surrounding
    /// whitespace is ignored.
    ///
    /// A `file` URL naming a remote host is rejected with [`Error::Fetch`].
    pub fn parse(location: &str) -> Result<Self> {
        let trimmed = location.trim();

        let url = match Url::parse(trimmed) {
            Ok(url) => url,
            Err(_) => return Ok(Location::Path(PathBuf::from(trimmed))),
        };

        match url.scheme() {
            "http" | "https" => Ok(Location::Url(url)),
            "file" => url
                .to_file_path()
                .map(Location::Path)
                .map_err(|()| Error::fetch(trimmed, "file URL does not name a local path")),
            _ => Ok(Location::Path(PathBuf::from(trimmed))),
        }
    }

    /// The local path, if this is a path location.
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Location::Path(path) => Some(path),
            Location::Url(_) => None,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Path(path) => write!(f, "{}", path.display()),
            Location::Url(url) => write!(f, "{}", url),
        }
    }
}

impl FromStr for Location {
    type Err = Error;

    fn from_str(location: &str) -> Result<Self> {
        Location::parse(location)
    }
}

impl From<Url> for Location {
    fn from(url: Url) -> Self {
        Location::Url(url)
    }
}

impl From<PathBuf> for Location {
    fn from(path: PathBuf) -> Self {
        Location::Path(path)
    }
}

impl From<&Path> for Location {
    fn from(path: &Path) -> Self {
        Location::Path(path.to_path_buf())
    }
}

/// Something that can turn a [`Location`] into bytes.
///
/// Failures should be reported as [`Error::Fetch`].
pub trait ByteSource {
    fn fetch(&self, location: &Location) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// Options for [`DefaultSource`].
///
/// # Example
///
/// ```
/// use sheetpick::fetch::FetchConfig;
/// use std::time::Duration;
///
/// let config = FetchConfig::new()
///     .with_timeout(Duration::from_secs(30))
///     .with_user_agent("techniques-sync/1.0");
/// assert_eq!(config.timeout, Some(Duration::from_secs(30)));
/// ```
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Overall timeout for HTTP requests (no timeout when `None`)
    pub timeout: Option<Duration>,

    /// User-Agent header sent with HTTP requests
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: format!("sheetpick/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl FetchConfig {
    /// Create default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the HTTP request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Reads local files with tokio and, with the `http` feature, fetches URLs
/// with a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct DefaultSource {
    #[cfg(feature = "http")]
    client: reqwest::Client,
}

impl DefaultSource {
    /// Create a source with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(&FetchConfig::default())
    }

    /// Create a source with the given configuration.
    #[cfg_attr(not(feature = "http"), allow(unused_variables))]
    pub fn with_config(config: &FetchConfig) -> Result<Self> {
        #[cfg(feature = "http")]
        {
            let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
            if let Some(timeout) = config.timeout {
                builder = builder.timeout(timeout);
            }
            let client = builder
                .build()
                .map_err(|e| Error::fetch("<http client>", e))?;
            Ok(Self { client })
        }

        #[cfg(not(feature = "http"))]
        {
            Ok(Self {})
        }
    }

    #[cfg(feature = "http")]
    async fn fetch_url(&self, url: &Url) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| Error::fetch(url, e))?;
        let bytes = response.bytes().await.map_err(|e| Error::fetch(url, e))?;
        Ok(bytes.to_vec())
    }

    #[cfg(not(feature = "http"))]
    async fn fetch_url(&self, url: &Url) -> Result<Vec<u8>> {
        Err(Error::fetch(url, "HTTP support is disabled (enable the `http` feature)"))
    }
}

impl ByteSource for DefaultSource {
    async fn fetch(&self, location: &Location) -> Result<Vec<u8>> {
        let bytes = match location {
            Location::Path(path) => tokio::fs::read(path)
                .await
                .map_err(|e| Error::fetch(path.display(), e))?,
            Location::Url(url) => self.fetch_url(url).await?,
        };
        debug!(%location, bytes = bytes.len(), "fetched workbook bytes");
        Ok(bytes)
    }
}
