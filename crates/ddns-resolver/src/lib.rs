// # Authoritative Resolver
//
// This crate reads the addresses currently published for a hostname by
// querying one configured DNS server directly over UDP.
//
// ## Why not the system resolver
//
// The OS resolver (and any local cache, nscd, systemd-resolved, /etc/hosts)
// may keep answering with the old address long after the provider's record
// changed, which would make every cycle request a redundant update. The
// lookup here goes straight to the configured server (8.8.8.8:53 by
// default) with no hosts file and a resolver built fresh for every call.
//
// ## Per-call scope
//
// Each `resolve()` builds its own resolver and bounds the whole lookup with
// a timeout. Both are dropped when the call returns, whatever the outcome.

use async_trait::async_trait;
use ddns_core::traits::HostResolver;
use ddns_core::{DynDnsConfig, Error, Result};
use hickory_resolver::TokioAsyncResolver;
use hickory_resolver::config::{
    LookupIpStrategy, NameServerConfig, Protocol, ResolverConfig, ResolverOpts,
};
use std::net::SocketAddr;
use std::time::Duration;

/// Default bound on a single lookup (5 seconds)
const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Resolver querying a single DNS server over UDP
#[derive(Debug, Clone)]
pub struct UdpResolver {
    /// DNS server to query
    server: SocketAddr,

    /// Upper bound for one lookup
    timeout: Duration,
}

impl UdpResolver {
    /// Create a resolver for `server`
    pub fn new(server: SocketAddr) -> Self {
        Self::with_timeout(server, DEFAULT_LOOKUP_TIMEOUT)
    }

    /// Create with a custom lookup timeout
    pub fn with_timeout(server: SocketAddr, timeout: Duration) -> Self {
        Self { server, timeout }
    }

    /// Create from the service configuration (default server applied)
    pub fn from_config(config: &DynDnsConfig) -> Result<Self> {
        Ok(Self::new(config.effective_dns_server()?))
    }

    /// DNS server this resolver queries
    pub fn server(&self) -> SocketAddr {
        self.server
    }

    fn build_resolver(&self) -> TokioAsyncResolver {
        let mut config = ResolverConfig::new();
        config.add_name_server(NameServerConfig::new(self.server, Protocol::Udp));

        let mut opts = ResolverOpts::default();
        opts.ip_strategy = LookupIpStrategy::Ipv4AndIpv6;
        opts.use_hosts_file = false;
        opts.timeout = self.timeout;
        // The engine's next tick is the retry
        opts.attempts = 1;

        TokioAsyncResolver::tokio(config, opts)
    }
}

#[async_trait]
impl HostResolver for UdpResolver {
    async fn resolve(&self, hostname: &str) -> Result<Vec<String>> {
        tracing::debug!("Resolving {} via {}", hostname, self.server);

        let resolver = self.build_resolver();

        let lookup = tokio::time::timeout(self.timeout, resolver.lookup_ip(hostname))
            .await
            .map_err(|_| {
                Error::resolve(format!(
                    "Lookup of {} via {} timed out after {:?}",
                    hostname, self.server, self.timeout
                ))
            })?
            .map_err(|e| Error::resolve(e.to_string()))?;

        let ips: Vec<String> = lookup.iter().map(|ip| ip.to_string()).collect();
        tracing::debug!("{} resolves to {:?}", hostname, ips);

        Ok(ips)
    }
}
