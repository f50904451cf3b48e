// # dyndns2 DNS Provider
//
// This crate submits record updates through the dyndns2 `nic/update`
// protocol, as spoken by domains.google.com and most dynamic DNS services.
//
// ## Request
//
// ```http
// GET /nic/update?hostname=home.example.com&myip=203.0.113.9
// Authorization: Basic <username:password>
// User-Agent:
// ```
//
// The `User-Agent` header is sent present but empty: some providers reject
// requests without one, and the client's default agent string must not be
// sent either.
//
// ## Response handling
//
// The body (`good 203.0.113.9`, `nochg ...`, `badauth`, ...) is read in full
// and logged at debug level. The HTTP status and the body text are NOT
// interpreted; a rejected update only shows up in the logs.
//
// ## Proxy
//
// An explicit proxy URL can be configured. Without one, the HTTP client's
// environment proxy resolution applies (`HTTP_PROXY`, `HTTPS_PROXY`,
// `NO_PROXY`).

use async_trait::async_trait;
use ddns_core::traits::DnsProvider;
use ddns_core::{DynDnsConfig, Error, Result};
use reqwest::header::USER_AGENT;
use std::time::Duration;

/// Default HTTP timeout for update requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// dyndns2 update submitter
///
/// Stateless and single-shot: one GET per call, no retry.
#[derive(Debug, Clone)]
pub struct DynDnsProvider {
    /// HTTP client for update requests
    client: reqwest::Client,
}

impl DynDnsProvider {
    /// Create a new provider, optionally routed through `proxy`
    pub fn new(proxy: Option<&str>) -> Result<Self> {
        Self::with_timeout(proxy, DEFAULT_HTTP_TIMEOUT)
    }

    /// Create with a custom request timeout
    pub fn with_timeout(proxy: Option<&str>, timeout: Duration) -> Result<Self> {
        let mut builder = reqwest::Client::builder().timeout(timeout);

        if let Some(proxy) = proxy {
            let proxy = reqwest::Proxy::all(proxy)
                .map_err(|e| Error::config(format!("Invalid proxy URL: {}", e)))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Create from the service configuration
    pub fn from_config(config: &DynDnsConfig) -> Result<Self> {
        Self::new(config.proxy.as_deref())
    }
}

#[async_trait]
impl DnsProvider for DynDnsProvider {
    async fn submit_update(&self, update_url: &str, username: &str, password: &str) -> Result<()> {
        let request = self
            .client
            .get(update_url)
            .header(USER_AGENT, "")
            .basic_auth(username, Some(password))
            .build()
            .map_err(|e| Error::dns_provider(format!("Invalid update request: {}", e)))?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| Error::dns_provider(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::dns_provider(format!("Failed to read response: {}", e)))?;

        tracing::debug!("Update response ({}): {}", status, body);

        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "dyndns2"
    }
}
