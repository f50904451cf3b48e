//! Contract Test: Scheduling
//!
//! This test verifies when cycles happen, using paused tokio time.
//!
//! Constraints verified:
//! - The first check happens immediately at startup
//! - A zero (or too small) interval is floored at 60 seconds
//! - A failed cycle does not stop the next one
//! - A configuration without hostname or credentials never starts

mod common;

use common::*;
use ddns_core::engine::start;
use ddns_core::DynDnsConfig;
use std::time::Duration;
use tokio::time::sleep;

#[tokio::test(start_paused = true)]
async fn zero_interval_waits_sixty_seconds() {
    let source = ScriptedIpSource::fixed("203.0.113.9");
    let resolver = MockResolver::new(&["203.0.113.9"]);
    let provider = MockDnsProvider::new();
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let handle = start(
        minimal_config("home.example.com").with_frequency_secs(0),
        Box::new(source.clone()),
        Box::new(resolver.clone()),
        Box::new(provider.clone()),
        shutdown_rx,
    )
    .expect("service starts");

    // t=1s: only the immediate check
    sleep(Duration::from_secs(1)).await;
    assert_eq!(source.call_count(), 1, "First check must not wait for a tick");

    // t=59s: still no second check
    sleep(Duration::from_secs(58)).await;
    assert_eq!(source.call_count(), 1, "Interval must be floored at 60s");

    // t=61s: second check done
    sleep(Duration::from_secs(2)).await;
    assert_eq!(source.call_count(), 2);

    shutdown_tx.send(()).unwrap();
    handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn short_interval_is_floored() {
    let source = ScriptedIpSource::fixed("203.0.113.9");
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let handle = start(
        minimal_config("home.example.com").with_frequency_secs(10),
        Box::new(source.clone()),
        Box::new(MockResolver::new(&["203.0.113.9"])),
        Box::new(MockDnsProvider::new()),
        shutdown_rx,
    )
    .expect("service starts");

    sleep(Duration::from_secs(59)).await;
    assert_eq!(source.call_count(), 1);

    sleep(Duration::from_secs(2)).await;
    assert_eq!(source.call_count(), 2);

    shutdown_tx.send(()).unwrap();
    handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn configured_interval_above_floor_is_used() {
    let source = ScriptedIpSource::fixed("203.0.113.9");
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let handle = start(
        minimal_config("home.example.com").with_frequency_secs(300),
        Box::new(source.clone()),
        Box::new(MockResolver::new(&["203.0.113.9"])),
        Box::new(MockDnsProvider::new()),
        shutdown_rx,
    )
    .expect("service starts");

    sleep(Duration::from_secs(299)).await;
    assert_eq!(source.call_count(), 1);

    sleep(Duration::from_secs(2)).await;
    assert_eq!(source.call_count(), 2);

    shutdown_tx.send(()).unwrap();
    handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn failures_do_not_stop_the_loop() {
    let source = ScriptedIpSource::fixed("203.0.113.9").fail_next("timed out");
    let resolver = MockResolver::new(&["203.0.113.5"]).failing_first(1);
    let provider = MockDnsProvider::new();
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let handle = start(
        minimal_config("home.example.com"),
        Box::new(source.clone()),
        Box::new(resolver.clone()),
        Box::new(provider.clone()),
        shutdown_rx,
    )
    .expect("service starts");

    // t=0: discovery fails
    sleep(Duration::from_secs(1)).await;
    assert_eq!(source.call_count(), 1);
    assert_eq!(resolver.call_count(), 0);

    // t=60: discovery succeeds, resolution fails
    sleep(Duration::from_secs(60)).await;
    assert_eq!(source.call_count(), 2);
    assert_eq!(resolver.call_count(), 1);
    assert_eq!(provider.update_call_count(), 0);

    // t=120: everything succeeds, record diverges, update issued
    sleep(Duration::from_secs(60)).await;
    assert_eq!(source.call_count(), 3);
    assert_eq!(provider.update_call_count(), 1);
    assert!(!handle.is_finished(), "Failures must never end the service");

    shutdown_tx.send(()).unwrap();
    tokio_test::assert_ok!(handle.await);
}

#[tokio::test(start_paused = true)]
async fn missing_hostname_or_credentials_never_starts() {
    let configs = [
        DynDnsConfig::new("", "test-user", "test-password"),
        DynDnsConfig::new("home.example.com", "", ""),
        DynDnsConfig::default(),
    ];

    for config in configs {
        let source = ScriptedIpSource::fixed("203.0.113.9");
        let resolver = MockResolver::new(&["203.0.113.5"]);
        let provider = MockDnsProvider::new();
        let (_shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        let handle = start(
            config,
            Box::new(source.clone()),
            Box::new(resolver.clone()),
            Box::new(provider.clone()),
            shutdown_rx,
        );
        assert!(handle.is_none(), "Service must not start");

        sleep(Duration::from_secs(120)).await;
        assert_eq!(source.call_count(), 0);
        assert_eq!(resolver.call_count(), 0);
        assert_eq!(provider.update_call_count(), 0);
    }
}
