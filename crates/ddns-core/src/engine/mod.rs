//! Core DDNS engine
//!
//! The DdnsEngine is responsible for:
//! - Discovering the external IP via IpSource
//! - Reading the published record via HostResolver
//! - Submitting an update via DnsProvider when the two diverge
//!
//! ## Architecture
//!
//! ```text
//!                            ┌──────────────┐
//!                            │ DdnsEngine   │◄── tick / shutdown
//!                            └──────────────┘
//!                                     │
//!         ┌───────────────────────────┼───────────────────────────┐
//!         │                           │                           │
//!         ▼                           ▼                           ▼
//! ┌─────────────┐           ┌──────────────┐           ┌─────────────┐
//! │  IpSource   │           │ HostResolver │           │ DnsProvider │
//! │ (discover)  │           │ (published)  │           │ (update)    │
//! └─────────────┘           └──────────────┘           └─────────────┘
//! ```
//!
//! ## Cycle
//!
//! 1. Fetch the external IP
//! 2. Resolve the configured hostname against the configured DNS server
//! 3. If any resolved address equals the external IP, do nothing
//! 4. Otherwise submit `nic/update` with the hostname and the external IP
//!
//! Every cycle starts from scratch; nothing is remembered between cycles.
//! Failures abandon the cycle and are logged. The next tick is the retry.

use crate::config::DynDnsConfig;
use crate::traits::{DnsProvider, HostResolver, IpSource};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// What a single reconciliation cycle did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The published record already contains the external IP
    InSync {
        external_ip: String,
    },

    /// An update request was submitted
    Updated {
        external_ip: String,
        published_ips: Vec<String>,
    },

    /// External IP discovery failed, cycle abandoned
    DiscoveryFailed {
        error: String,
    },

    /// Hostname resolution failed, cycle abandoned
    ResolveFailed {
        error: String,
    },

    /// The update request failed
    UpdateFailed {
        external_ip: String,
        error: String,
    },
}

/// Core DDNS engine
///
/// ## Lifecycle
///
/// 1. Create with [`DdnsEngine::new()`] (returns `None` when the
///    configuration lacks a hostname or credentials)
/// 2. Start with [`DdnsEngine::spawn()`] or drive [`DdnsEngine::run()`]
/// 3. Engine checks immediately, then once per interval
/// 4. Engine stops at the next wait point after the shutdown signal
///
/// ## Threading
///
/// The engine runs all cycles sequentially on a single task. The
/// configuration is never mutated after construction.
pub struct DdnsEngine {
    /// Service configuration
    config: DynDnsConfig,

    /// External IP discovery
    ip_source: Box<dyn IpSource>,

    /// Published record lookup
    resolver: Box<dyn HostResolver>,

    /// Update submission
    provider: Box<dyn DnsProvider>,
}

impl DdnsEngine {
    /// Create a new DDNS engine
    ///
    /// # Returns
    ///
    /// `None` if the configuration has no hostname or no username. Nothing
    /// is contacted in that case.
    pub fn new(
        config: DynDnsConfig,
        ip_source: Box<dyn IpSource>,
        resolver: Box<dyn HostResolver>,
        provider: Box<dyn DnsProvider>,
    ) -> Option<Self> {
        if !config.is_enabled() {
            return None;
        }

        Some(Self {
            config,
            ip_source,
            resolver,
            provider,
        })
    }

    /// Configuration this engine was built with
    pub fn config(&self) -> &DynDnsConfig {
        &self.config
    }

    /// Run the engine on a background task
    ///
    /// The returned handle completes once the loop has fully exited, which
    /// is how the owner waits for shutdown to finish.
    pub fn spawn(self, shutdown_rx: oneshot::Receiver<()>) -> JoinHandle<()> {
        tokio::spawn(async move { self.run(shutdown_rx).await })
    }

    /// Run the engine until `shutdown_rx` fires
    ///
    /// Performs one check immediately, then one per
    /// [`DynDnsConfig::poll_interval`]. Dropping the sender counts as a
    /// shutdown signal.
    pub async fn run(&self, mut shutdown_rx: oneshot::Receiver<()>) {
        info!(
            "Starting the DynDNS service: updating hostname {} with {} ({})",
            self.config.hostname,
            self.ip_source.source_name(),
            self.provider.provider_name()
        );

        let interval = self.config.poll_interval();

        self.run_cycle().await;

        loop {
            tokio::select! {
                biased;

                _ = &mut shutdown_rx => {
                    info!("Shutdown signal received, DynDNS service stopped");
                    break;
                }

                _ = tokio::time::sleep(interval) => {
                    self.run_cycle().await;
                }
            }
        }
    }

    /// Run a single reconciliation cycle
    ///
    /// Never fails: every error is logged and reported in the outcome.
    pub async fn run_cycle(&self) -> CycleOutcome {
        info!("Checking DNS with {}", self.ip_source.source_name());

        let external_ip = match self.ip_source.current().await {
            Ok(ip) => ip,
            Err(e) => {
                error!("Unable to get external IP: {}", e);
                return CycleOutcome::DiscoveryFailed {
                    error: e.to_string(),
                };
            }
        };

        let hostname = &self.config.hostname;
        let published_ips = match self.resolver.resolve(hostname).await {
            Ok(ips) => ips,
            Err(e) => {
                error!("Unable to resolve DDNS hostname IP: {}", e);
                return CycleOutcome::ResolveFailed {
                    error: e.to_string(),
                };
            }
        };

        if published_ips.iter().any(|ip| *ip == external_ip) {
            debug!("{} already resolves to {}", hostname, external_ip);
            return CycleOutcome::InSync { external_ip };
        }

        info!(
            "DNS UPDATE REQUIRED. External IP={}. {}={:?}.",
            external_ip, hostname, published_ips
        );

        let update_url = self.config.update_url(&external_ip);
        debug!("Submitting update request to {}", update_url);

        if let Err(e) = self
            .provider
            .submit_update(&update_url, &self.config.username, &self.config.password)
            .await
        {
            error!("Failed to update: {}", e);
            return CycleOutcome::UpdateFailed {
                external_ip,
                error: e.to_string(),
            };
        }

        CycleOutcome::Updated {
            external_ip,
            published_ips,
        }
    }
}

/// Start the dynamic DNS service in the background
///
/// Returns `None` without contacting anything when the configuration lacks
/// a hostname or credentials; the caller has nothing to wait for.
pub fn start(
    config: DynDnsConfig,
    ip_source: Box<dyn IpSource>,
    resolver: Box<dyn HostResolver>,
    provider: Box<dyn DnsProvider>,
    shutdown_rx: oneshot::Receiver<()>,
) -> Option<JoinHandle<()>> {
    DdnsEngine::new(config, ip_source, resolver, provider).map(|engine| engine.spawn(shutdown_rx))
}
