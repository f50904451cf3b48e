// # DNS Provider Trait
//
// Defines the interface for submitting record updates to the DNS provider.
//
// ## Implementations
//
// - dyndns2 `nic/update` endpoint: `ddns-provider-dyndns` crate
//
// ## Usage
//
// ```rust,ignore
// use ddns_core::DnsProvider;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let provider = /* DnsProvider implementation */;
//
//     provider.submit_update(
//         "https://domains.google.com/nic/update?hostname=home.example.com&myip=203.0.113.9",
//         "username",
//         "password",
//     ).await?;
//
//     Ok(())
// }
// ```

use async_trait::async_trait;

/// Trait for DNS provider implementations
///
/// # Trust Level: Untrusted
///
/// ## Allowed Capabilities
/// - ✅ Perform HTTP/HTTPS calls to the given update URL only
/// - ✅ Log the provider's response
///
/// ## Forbidden Capabilities
/// - ❌ Spawn tasks or threads
/// - ❌ Implement retry logic or backoff (the engine's next tick retries)
/// - ❌ Decide whether an update is needed (owned by `DdnsEngine`)
/// - ❌ Log credentials
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Submit a single update request
    ///
    /// The engine builds `update_url` with the hostname and new address
    /// already embedded.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: The request completed and its response was read. The
    ///   provider's HTTP status is not interpreted.
    /// - `Err(Error)`: Request construction, transport or body read failed
    async fn submit_update(
        &self,
        update_url: &str,
        username: &str,
        password: &str,
    ) -> Result<(), crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
