// # ddns-core
//
// Core library for the dynamic DNS reconciliation service.
//
// ## Architecture Overview
//
// This library provides the core functionality for dynamic DNS updates:
// - **IpSource**: Trait for discovering the host's external IP
// - **HostResolver**: Trait for reading the addresses a hostname currently publishes
// - **DnsProvider**: Trait for submitting record updates to the provider
// - **DdnsEngine**: Core engine that runs the discover → resolve → compare → update cycle
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Core logic is separate from network implementations
// 2. **Stateless Cycles**: Every cycle re-derives truth from two live queries
// 3. **Library-First**: All core functionality can be used as a library
// 4. **Failures Are Transient**: Errors end the cycle, never the service

pub mod config;
pub mod engine;
pub mod error;
pub mod traits;

// Re-export core types for convenience
pub use config::DynDnsConfig;
pub use engine::{CycleOutcome, DdnsEngine};
pub use error::{Error, Result};
pub use traits::{DnsProvider, HostResolver, IpSource};
