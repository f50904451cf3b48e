// # IP Source Trait
//
// Defines the interface for discovering the host's current public IP.
//
// ## Implementations
//
// - HTTP check-IP endpoint: `ddns-ip-http` crate
//
// ## Usage
//
// ```rust,ignore
// use ddns_core::IpSource;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let source = /* IpSource implementation */;
//
//     let external_ip = source.current().await?;
//     println!("External IP: {}", external_ip);
//
//     Ok(())
// }
// ```

use async_trait::async_trait;

/// Trait for external IP discovery
///
/// Implementations answer one question per call: what address does the
/// outside world see for this host right now. Nothing is cached between
/// calls.
///
/// # Returned value
///
/// The address is returned as text, trimmed of surrounding whitespace. It
/// is NOT parsed or validated: the engine compares it verbatim against the
/// published record and, on mismatch, submits it verbatim.
///
/// # Forbidden Capabilities
/// - ❌ Retry on failure (the next engine tick is the retry)
/// - ❌ Spawn tasks
/// - ❌ Decide whether an update is needed
#[async_trait]
pub trait IpSource: Send + Sync {
    /// Get the current external IP address
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: The trimmed address text
    /// - `Err(Error)`: If the endpoint could not be reached or read
    async fn current(&self) -> Result<String, crate::Error>;

    /// Name of the source (for logging)
    fn source_name(&self) -> &str;
}
