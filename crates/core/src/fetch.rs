//! Network access used by the acquisition pipeline.
//!
//! The pipeline only needs two operations: a header-only probe answering
//! "does this address exist" and a full body download. Both go through the
//! [`Transport`] trait so callers can plug in their own client, a mirror, or a
//! fake in tests. [`HttpTransport`] is the default, blocking implementation.

use crate::Result;

#[cfg(feature = "fetch")]
use std::time::Duration;

#[cfg(feature = "fetch")]
use reqwest::{blocking::Client, redirect::Policy};

#[cfg(feature = "fetch")]
use crate::GutentextError;

/// Capability to probe and download archive files.
pub trait Transport {
    /// Issues a header-only request and returns the response status code.
    ///
    /// The status is the one the address itself answers with: a redirect is
    /// reported as its 3xx code and not followed.
    fn probe(&self, url: &str) -> Result<u16>;

    /// Downloads the whole resource into memory.
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn probe(&self, url: &str) -> Result<u16> {
        (**self).probe(url)
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        (**self).fetch(url)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn probe(&self, url: &str) -> Result<u16> {
        (**self).probe(url)
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        (**self).fetch(url)
    }
}

/// HTTP client configuration.
///
/// This struct controls timeout and user agent settings for HTTP requests.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 30, user_agent: format!("gutentext/{}", env!("CARGO_PKG_VERSION")) }
    }
}

/// Blocking HTTP transport built on reqwest.
///
/// Downloads follow redirects; probes do not.
#[cfg(feature = "fetch")]
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    probe_client: Client,
    timeout: u64,
}

#[cfg(feature = "fetch")]
impl HttpTransport {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(GutentextError::HttpError)?;

        let probe_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.clone())
            .redirect(Policy::none())
            .build()
            .map_err(GutentextError::HttpError)?;

        Ok(Self { client, probe_client, timeout: config.timeout })
    }

    fn map_error(&self, e: reqwest::Error) -> GutentextError {
        if e.is_timeout() { GutentextError::Timeout { timeout: self.timeout } } else { GutentextError::HttpError(e) }
    }
}

#[cfg(feature = "fetch")]
impl Transport for HttpTransport {
    fn probe(&self, url: &str) -> Result<u16> {
        let response = self.probe_client.head(url).send().map_err(|e| self.map_error(e))?;
        tracing::debug!(url, status = response.status().as_u16(), "probed");
        Ok(response.status().as_u16())
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| self.map_error(e))?;

        let body = response.bytes().map_err(|e| self.map_error(e))?;
        Ok(body.to_vec())
    }
}
