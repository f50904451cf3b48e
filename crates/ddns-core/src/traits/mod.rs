//! Core traits for the DDNS system
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`IpSource`]: Discover the host's external IP
//! - [`HostResolver`]: Read the addresses currently published for a hostname
//! - [`DnsProvider`]: Submit record updates to the provider

pub mod dns_provider;
pub mod ip_source;
pub mod resolver;

pub use dns_provider::DnsProvider;
pub use ip_source::IpSource;
pub use resolver::HostResolver;
