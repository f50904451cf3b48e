//! Configuration types for the DDNS system
//!
//! [`DynDnsConfig`] is created once at startup and shared read-only with the
//! reconciliation loop for the lifetime of the process.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

/// Host of the dynamic DNS update service
pub const DDNS_SERVICE_HOST: &str = "domains.google.com";

/// Default endpoint echoing the caller's public IP
pub const DEFAULT_CHECKIP_URL: &str = "https://domains.google.com/checkip";

/// Default DNS server queried for the published record
pub const DEFAULT_DNS_SERVER: &str = "8.8.8.8:53";

/// Minimum number of seconds between two checks
///
/// Updating more often than this gets the account banned by the provider,
/// and records take a while to propagate anyway.
pub const MIN_UPDATE_INTERVAL_SECS: u64 = 60;

const DNS_PORT: u16 = 53;

/// Dynamic DNS service configuration
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct DynDnsConfig {
    /// Hostname whose record is kept in sync (e.g., "home.example.com")
    #[serde(default)]
    pub hostname: String,

    /// Username for the update endpoint
    #[serde(default)]
    pub username: String,

    /// Password for the update endpoint
    /// ⚠️ NEVER log this value
    #[serde(default)]
    pub password: String,

    /// URL returning the caller's public IP as plain text
    #[serde(default)]
    pub checkip_url: String,

    /// DNS server used to read the published record ("ip:port" or "ip")
    #[serde(default)]
    pub dns_server: String,

    /// Seconds between checks (floored at [`MIN_UPDATE_INTERVAL_SECS`])
    #[serde(default)]
    pub frequency_secs: u64,

    /// Scheme and host of the update endpoint
    #[serde(default = "default_update_base_url")]
    pub update_base_url: String,

    /// Outbound proxy for update requests
    #[serde(default)]
    pub proxy: Option<String>,
}

// Custom Debug implementation that hides the password
impl std::fmt::Debug for DynDnsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynDnsConfig")
            .field("hostname", &self.hostname)
            .field("username", &self.username)
            .field("password", &"<REDACTED>")
            .field("checkip_url", &self.checkip_url)
            .field("dns_server", &self.dns_server)
            .field("frequency_secs", &self.frequency_secs)
            .field("update_base_url", &self.update_base_url)
            .field("proxy", &self.proxy)
            .finish()
    }
}

impl DynDnsConfig {
    /// Create a configuration for `hostname` with the given credentials
    pub fn new(
        hostname: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            hostname: hostname.into(),
            username: username.into(),
            password: password.into(),
            update_base_url: default_update_base_url(),
            ..Default::default()
        }
    }

    /// Set the check-IP URL
    pub fn with_checkip_url(mut self, url: impl Into<String>) -> Self {
        self.checkip_url = url.into();
        self
    }

    /// Set the DNS server
    pub fn with_dns_server(mut self, server: impl Into<String>) -> Self {
        self.dns_server = server.into();
        self
    }

    /// Set the check frequency in seconds
    pub fn with_frequency_secs(mut self, secs: u64) -> Self {
        self.frequency_secs = secs;
        self
    }

    /// Set the update endpoint base URL
    pub fn with_update_base_url(mut self, url: impl Into<String>) -> Self {
        self.update_base_url = url.into();
        self
    }

    /// Set the outbound proxy for update requests
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Whether the service should run at all
    ///
    /// A missing hostname or username means dynamic DNS is not configured.
    /// This is not an error.
    pub fn is_enabled(&self) -> bool {
        !self.hostname.is_empty() && !self.username.is_empty()
    }

    /// Check-IP URL with the default applied
    pub fn effective_checkip_url(&self) -> &str {
        if self.checkip_url.is_empty() {
            DEFAULT_CHECKIP_URL
        } else {
            &self.checkip_url
        }
    }

    /// DNS server address with the default applied
    ///
    /// A bare IP address gets the standard DNS port.
    pub fn effective_dns_server(&self) -> Result<SocketAddr, crate::Error> {
        let server = if self.dns_server.is_empty() {
            DEFAULT_DNS_SERVER
        } else {
            self.dns_server.as_str()
        };

        if let Ok(addr) = server.parse::<SocketAddr>() {
            return Ok(addr);
        }

        server
            .parse::<IpAddr>()
            .map(|ip| SocketAddr::new(ip, DNS_PORT))
            .map_err(|_| crate::Error::config(format!("Invalid DNS server address: {}", server)))
    }

    /// Time to wait between two checks
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.frequency_secs.max(MIN_UPDATE_INTERVAL_SECS))
    }

    /// Update request URL for publishing `ip` under the configured hostname
    pub fn update_url(&self, ip: &str) -> String {
        let base = if self.update_base_url.is_empty() {
            default_update_base_url()
        } else {
            self.update_base_url.trim_end_matches('/').to_string()
        };

        format!("{}/nic/update?hostname={}&myip={}", base, self.hostname, ip)
    }

    /// Validate values that would make every cycle fail
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.effective_dns_server()?;

        let checkip = self.effective_checkip_url();
        if !checkip.starts_with("https://") && !checkip.starts_with("http://") {
            return Err(crate::Error::config(format!(
                "Check-IP URL must use HTTP or HTTPS scheme. Got: {}",
                checkip
            )));
        }

        Ok(())
    }
}

fn default_update_base_url() -> String {
    format!("https://{}", DDNS_SERVICE_HOST)
}
