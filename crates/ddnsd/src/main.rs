// # ddnsd - DDNS Daemon
//
// The ddnsd daemon is a thin integration layer. All reconciliation logic
// lives in ddns-core. The daemon is responsible for:
// 1. Reading configuration from environment variables
// 2. Initializing tracing and the runtime
// 3. Building the IP source, resolver and provider
// 4. Starting the DDNS engine and joining it on shutdown
//
// ## Configuration
//
// All configuration is done via environment variables:
//
// ### Record
// - `DDNS_HOSTNAME`: Hostname to keep in sync (required)
// - `DDNS_USERNAME`: Update username (required)
// - `DDNS_PASSWORD`: Update password
//
// ### Lookups
// - `DDNS_CHECKIP_URL`: URL echoing the public IP (default https://domains.google.com/checkip)
// - `DDNS_DNS_SERVER`: DNS server to read the record from (default 8.8.8.8:53)
//
// ### Engine
// - `DDNS_FREQUENCY_SECS`: Seconds between checks (default and minimum 60)
// - `DDNS_UPDATE_BASE_URL`: Update endpoint base (default https://domains.google.com)
// - `DDNS_PROXY`: Outbound proxy for update requests
// - `DDNS_LOG_LEVEL`: trace, debug, info, warn or error (default info)
//
// Without a hostname or username the service is disabled and the daemon
// exits cleanly.
//
// ## Example
//
// ```bash
// export DDNS_HOSTNAME=home.example.com
// export DDNS_USERNAME=generated_user
// export DDNS_PASSWORD=generated_password
//
// ddnsd
// ```

use anyhow::Result;
use ddns_core::{DdnsEngine, DynDnsConfig};
use ddns_ip_http::HttpIpSource;
use ddns_provider_dyndns::DynDnsProvider;
use ddns_resolver::UdpResolver;
use std::env;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum DdnsExitCode {
    /// Clean shutdown (normal exit)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<DdnsExitCode> for ExitCode {
    fn from(code: DdnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
struct Config {
    service: DynDnsConfig,
    log_level: Level,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration from any variable lookup
    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let frequency_secs = match var("DDNS_FREQUENCY_SECS") {
            Some(value) => value.trim().parse().map_err(|_| {
                anyhow::anyhow!(
                    "DDNS_FREQUENCY_SECS must be a number of seconds. Got: {}",
                    value
                )
            })?,
            None => 0,
        };

        let log_level = match var("DDNS_LOG_LEVEL")
            .unwrap_or_else(|| "info".to_string())
            .to_lowercase()
            .as_str()
        {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            other => anyhow::bail!(
                "DDNS_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                other
            ),
        };

        let mut service = DynDnsConfig::new(
            var("DDNS_HOSTNAME").unwrap_or_default(),
            var("DDNS_USERNAME").unwrap_or_default(),
            var("DDNS_PASSWORD").unwrap_or_default(),
        )
        .with_frequency_secs(frequency_secs);

        if let Some(url) = var("DDNS_CHECKIP_URL") {
            service = service.with_checkip_url(url);
        }
        if let Some(server) = var("DDNS_DNS_SERVER") {
            service = service.with_dns_server(server);
        }
        if let Some(url) = var("DDNS_UPDATE_BASE_URL").filter(|u| !u.is_empty()) {
            service = service.with_update_base_url(url);
        }
        if let Some(proxy) = var("DDNS_PROXY").filter(|p| !p.is_empty()) {
            service = service.with_proxy(proxy);
        }

        Ok(Self { service, log_level })
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        self.service.validate()?;
        Ok(())
    }
}

fn main() -> ExitCode {
    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return DdnsExitCode::ConfigError.into();
        }
    };

    // Validate configuration
    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {}", e);
        return DdnsExitCode::ConfigError.into();
    }

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return DdnsExitCode::ConfigError.into();
    }

    info!("Starting ddnsd daemon");

    // Enter tokio runtime
    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return DdnsExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        if let Err(e) = run_daemon(config).await {
            error!("Daemon error: {}", e);
            DdnsExitCode::RuntimeError
        } else {
            DdnsExitCode::CleanShutdown
        }
    });

    result.into()
}

/// Run the daemon
async fn run_daemon(config: Config) -> Result<()> {
    let service = config.service;

    if !service.is_enabled() {
        info!("DDNS_HOSTNAME or DDNS_USERNAME not set, DynDNS service disabled");
        return Ok(());
    }

    let ip_source = HttpIpSource::from_config(&service)?;
    let resolver = UdpResolver::from_config(&service)?;
    let provider = DynDnsProvider::from_config(&service)?;

    info!("Check-IP URL: {}", ip_source.url());
    info!("DNS server: {}", resolver.server());
    info!("Check interval: {:?}", service.poll_interval());

    let Some(engine) = DdnsEngine::new(
        service,
        Box::new(ip_source),
        Box::new(resolver),
        Box::new(provider),
    ) else {
        return Ok(());
    };

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    let engine_handle = engine.spawn(shutdown_rx);

    let signal = wait_for_shutdown().await?;
    info!("Received shutdown signal: {}", signal);
    info!("Shutting down daemon");

    // The engine may already be gone if it panicked
    let _ = shutdown_tx.send(());
    engine_handle
        .await
        .map_err(|e| anyhow::anyhow!("DDNS engine task failed: {}", e))?;

    info!("DDNS engine stopped");
    Ok(())
}

/// Wait for shutdown signals (SIGTERM, SIGINT)
///
/// # Returns
///
/// Returns the name of the signal received.
#[cfg(unix)]
async fn wait_for_shutdown() -> Result<&'static str> {
    let mut sigterm = signal(SignalKind::terminate())
        .map_err(|e| anyhow::anyhow!("Failed to setup SIGTERM handler: {}", e))?;
    let mut sigint = signal(SignalKind::interrupt())
        .map_err(|e| anyhow::anyhow!("Failed to setup SIGINT handler: {}", e))?;

    let signal = tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    };

    Ok(signal)
}

/// Wait for shutdown signals (SIGINT only)
///
/// Fallback implementation for non-Unix platforms.
#[cfg(not(unix))]
async fn wait_for_shutdown() -> Result<&'static str> {
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to wait for CTRL-C: {}", e))?;
    Ok("SIGINT")
}
