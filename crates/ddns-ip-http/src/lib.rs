// # HTTP IP Source
//
// This crate provides the check-IP based IP source for the DDNS system.
//
// ## Architecture
//
// A single GET to an endpoint that echoes the caller's public address as
// plain text (e.g., https://domains.google.com/checkip, https://api.ipify.org).
// One request per engine cycle; nothing is cached and nothing is polled in
// the background.
//
// ## Leniency
//
// The body is returned as-is after trimming whitespace:
// - the HTTP status is not checked
// - the text is not parsed as an IP address
//
// The engine compares and submits the text verbatim.

use async_trait::async_trait;
use ddns_core::traits::IpSource;
use ddns_core::{DynDnsConfig, Error, Result};
use std::time::Duration;

/// Default HTTP timeout for check-IP requests (10 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Check-IP endpoint based IP source
#[derive(Debug, Clone)]
pub struct HttpIpSource {
    /// URL to fetch IP from
    url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpIpSource {
    /// Create a new HTTP IP source
    ///
    /// # Parameters
    ///
    /// - `url`: URL to fetch IP from (e.g., "https://api.ipify.org")
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(url, DEFAULT_HTTP_TIMEOUT)
    }

    /// Create with a custom request timeout
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }

    /// Create from the service configuration (default URL applied)
    pub fn from_config(config: &DynDnsConfig) -> Result<Self> {
        Self::new(config.effective_checkip_url())
    }

    /// URL this source queries
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl IpSource for HttpIpSource {
    async fn current(&self) -> Result<String> {
        let mut response = self.client.get(&self.url).send().await.map_err(|e| {
            Error::ip_source(format!("Unable to determine external IP: {}", e))
        })?;

        tracing::debug!("Check-IP response status: {}", response.status());

        // Read until end of stream; reaching the end is a complete read
        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| Error::ip_source(format!("Failed to read response: {}", e)))?
        {
            body.extend_from_slice(&chunk);
        }

        Ok(String::from_utf8_lossy(&body).trim().to_string())
    }

    fn source_name(&self) -> &str {
        &self.url
    }
}
