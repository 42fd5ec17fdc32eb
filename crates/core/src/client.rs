//! Book acquisition API.
//!
//! The main entry point is [`TextClient`], which ties together address
//! resolution, download, encoding detection and the on-disk cache. For one-off
//! use, the free functions [`get_text_by_id`] and [`get_text_string_by_id`]
//! build a client from a [`TextConfig`].
//!
//! # Example
//!
//! ```rust,no_run
//! use gutentext_core::{TextConfig, get_text_string_by_id, strip_headers_str};
//!
//! let config = TextConfig::builder().cache_dir("/tmp/gutentext").build();
//! let text = get_text_string_by_id(1342, &config)?;
//! println!("{}", strip_headers_str(&text));
//! # Ok::<(), gutentext_core::GutentextError>(())
//! ```

use std::path::{Path, PathBuf};

use crate::cache::CacheStore;
use crate::encoding::{ChardetDetector, EncodingDetector, detect_and_decode};
use crate::fetch::{FetchConfig, Transport};
use crate::resolve::{ARCHIVE_ROOT, resolve_download_uri};
use crate::{Result, WorkId};

#[cfg(feature = "fetch")]
use crate::fetch::HttpTransport;

/// Configuration for book acquisition.
///
/// # Example
///
/// ```rust
/// use gutentext_core::TextConfig;
///
/// let config = TextConfig::builder()
///     .cache_dir("/tmp/books")
///     .timeout(60)
///     .build();
/// assert_eq!(config.fetch.timeout, 60);
/// ```
#[derive(Debug, Clone)]
pub struct TextConfig {
    /// Directory holding the compressed cache files (default: `<user cache dir>/gutentext/texts`).
    pub cache_dir: PathBuf,

    /// Base URL of the archive (default: `https://www.gutenberg.org`).
    pub archive_root: String,

    /// HTTP settings for the default transport.
    pub fetch: FetchConfig,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self { cache_dir: default_cache_dir(), archive_root: ARCHIVE_ROOT.to_string(), fetch: FetchConfig::default() }
    }
}

impl TextConfig {
    /// Creates a new builder for TextConfig.
    pub fn builder() -> TextConfigBuilder {
        TextConfigBuilder::new()
    }
}

/// Default cache directory (`~/.cache/gutentext/texts` on Linux).
///
/// Falls back to `./texts` when the platform has no cache directory.
pub fn default_cache_dir() -> PathBuf {
    match dirs::cache_dir() {
        Some(cache_dir) => cache_dir.join("gutentext").join("texts"),
        None => PathBuf::from("texts"),
    }
}

/// Builder for TextConfig.
pub struct TextConfigBuilder {
    config: TextConfig,
}

impl TextConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: TextConfig::default() }
    }

    /// Sets the cache directory.
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.cache_dir = path.as_ref().to_path_buf();
        self
    }

    /// Sets the archive root, e.g. to use a mirror.
    pub fn archive_root(mut self, root: impl Into<String>) -> Self {
        self.config.archive_root = root.into();
        self
    }

    /// Sets the HTTP timeout in seconds.
    pub fn timeout(mut self, secs: u64) -> Self {
        self.config.fetch.timeout = secs;
        self
    }

    /// Sets the User-Agent sent with every request.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.fetch.user_agent = user_agent.into();
        self
    }

    /// Builds the config.
    pub fn build(self) -> TextConfig {
        self.config
    }
}

impl Default for TextConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache-first book downloader.
///
/// A cache hit is served from disk without touching the network. A miss
/// resolves the download address, fetches the file, decodes it with the
/// detected encoding and stores it as UTF-8 before reading it back.
///
/// Concurrent callers asking for the same uncached id may both download it;
/// the last write wins.
pub struct TextClient<T, D = ChardetDetector> {
    cache: CacheStore,
    archive_root: String,
    transport: T,
    detector: D,
}

#[cfg(feature = "fetch")]
impl TextClient<HttpTransport> {
    /// Creates a client using the blocking HTTP transport.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use gutentext_core::{TextClient, TextConfig, WorkId};
    ///
    /// let client = TextClient::new(&TextConfig::default())?;
    /// let text = client.get_text_by_id(WorkId::new(84)?)?;
    /// # Ok::<(), gutentext_core::GutentextError>(())
    /// ```
    pub fn new(config: &TextConfig) -> Result<Self> {
        Ok(Self::with_transport(config, HttpTransport::new(&config.fetch)?))
    }
}

impl<T: Transport> TextClient<T> {
    /// Creates a client over a custom transport, with the default encoding detector.
    pub fn with_transport(config: &TextConfig, transport: T) -> Self {
        Self::with_parts(config, transport, ChardetDetector)
    }
}

impl<T: Transport, D: EncodingDetector> TextClient<T, D> {
    /// Creates a client from explicit collaborators.
    pub fn with_parts(config: &TextConfig, transport: T, detector: D) -> Self {
        Self { cache: CacheStore::new(&config.cache_dir), archive_root: config.archive_root.clone(), transport, detector }
    }

    /// The cache this client reads from and writes to.
    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// The transport used on cache misses.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the full UTF-8 text of a book, boilerplate included.
    pub fn get_text_by_id(&self, id: WorkId) -> Result<Vec<u8>> {
        self.ensure_cached(id)?;
        self.cache.read(id)
    }

    /// String flavour of [`get_text_by_id`](Self::get_text_by_id).
    pub fn get_text_string_by_id(&self, id: WorkId) -> Result<String> {
        self.ensure_cached(id)?;
        self.cache.read_to_string(id)
    }

    fn ensure_cached(&self, id: WorkId) -> Result<()> {
        if self.cache.exists(id) {
            tracing::debug!(%id, "cache hit");
            Ok(())
        } else {
            self.download(id)
        }
    }

    fn download(&self, id: WorkId) -> Result<()> {
        let uri = resolve_download_uri(&self.transport, &self.archive_root, id)?;
        tracing::info!(%id, %uri, "downloading text");

        let raw = self.transport.fetch(&uri)?;
        let text = detect_and_decode(&self.detector, &raw)?;

        self.cache.write(id, text.as_bytes())
    }
}

/// Downloads (or reads from cache) a book using the default HTTP transport.
///
/// # Example
///
/// ```rust,no_run
/// use gutentext_core::{TextConfig, get_text_by_id};
///
/// let bytes = get_text_by_id(2701, &TextConfig::default())?;
/// # Ok::<(), gutentext_core::GutentextError>(())
/// ```
#[cfg(feature = "fetch")]
pub fn get_text_by_id(id: u64, config: &TextConfig) -> Result<Vec<u8>> {
    TextClient::new(config)?.get_text_by_id(WorkId::new(id)?)
}

/// String flavour of [`get_text_by_id`].
#[cfg(feature = "fetch")]
pub fn get_text_string_by_id(id: u64, config: &TextConfig) -> Result<String> {
    TextClient::new(config)?.get_text_string_by_id(WorkId::new(id)?)
}
