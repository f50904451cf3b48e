// # Host Resolver Trait
//
// Defines the interface for reading the addresses currently published for
// a hostname.
//
// ## Implementations
//
// - Direct UDP queries to one DNS server: `ddns-resolver` crate

use async_trait::async_trait;

/// Trait for authoritative hostname resolution
///
/// Implementations must query a specific upstream DNS server rather than
/// the operating system's resolver, so the answer reflects the provider's
/// live record instead of a local cache.
#[async_trait]
pub trait HostResolver: Send + Sync {
    /// Resolve `hostname` to its published addresses
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<String>)`: Every address in the order the server returned
    ///   them, without sorting or de-duplication
    /// - `Err(Error)`: NXDOMAIN, timeout or network failure, unretried
    async fn resolve(&self, hostname: &str) -> Result<Vec<String>, crate::Error>;
}
