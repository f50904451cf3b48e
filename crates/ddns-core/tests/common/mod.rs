//! Test doubles and common utilities for engine contract tests
//!
//! These doubles count every call so tests can assert exactly which
//! network operations a cycle would have performed.

#![allow(dead_code)]

use ddns_core::error::{Error, Result};
use ddns_core::traits::{DnsProvider, HostResolver, IpSource};
use ddns_core::DynDnsConfig;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// An IpSource returning scripted answers, then repeating the last one
#[derive(Clone)]
pub struct ScriptedIpSource {
    answers: Arc<Mutex<VecDeque<Result<String>>>>,
    fallback: String,
    call_count: Arc<AtomicUsize>,
}

impl ScriptedIpSource {
    /// Always answer `ip`
    pub fn fixed(ip: &str) -> Self {
        Self {
            answers: Arc::new(Mutex::new(VecDeque::new())),
            fallback: ip.to_string(),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Fail the next call, then answer normally
    pub fn fail_next(self, message: &str) -> Self {
        self.answers
            .lock()
            .unwrap()
            .push_back(Err(Error::ip_source(message)));
        self
    }

    /// Get the number of times current() was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl IpSource for ScriptedIpSource {
    async fn current(&self) -> Result<String> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        match self.answers.lock().unwrap().pop_front() {
            Some(answer) => answer,
            None => Ok(self.fallback.clone()),
        }
    }

    fn source_name(&self) -> &str {
        "scripted"
    }
}

/// A HostResolver returning a fixed record set (or failing)
#[derive(Clone)]
pub struct MockResolver {
    published: Vec<String>,
    fail_first: Arc<AtomicUsize>,
    call_count: Arc<AtomicUsize>,
    queried: Arc<Mutex<Vec<String>>>,
}

impl MockResolver {
    pub fn new(published: &[&str]) -> Self {
        Self {
            published: published.iter().map(|s| s.to_string()).collect(),
            fail_first: Arc::new(AtomicUsize::new(0)),
            call_count: Arc::new(AtomicUsize::new(0)),
            queried: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Fail the first `n` lookups with an NXDOMAIN-like error
    pub fn failing_first(self, n: usize) -> Self {
        self.fail_first.store(n, Ordering::SeqCst);
        self
    }

    /// Get the number of times resolve() was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Hostnames that were looked up
    pub fn queried(&self) -> Vec<String> {
        self.queried.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl HostResolver for MockResolver {
    async fn resolve(&self, hostname: &str) -> Result<Vec<String>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.queried.lock().unwrap().push(hostname.to_string());

        let remaining = self.fail_first.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_first.store(remaining - 1, Ordering::SeqCst);
            return Err(Error::resolve(format!("no record found for {}", hostname)));
        }

        Ok(self.published.clone())
    }
}

/// A recorded update submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub url: String,
    pub username: String,
    pub password: String,
}

/// A DnsProvider that records every submission
#[derive(Clone)]
pub struct MockDnsProvider {
    submissions: Arc<Mutex<Vec<Submission>>>,
    fail: bool,
}

impl MockDnsProvider {
    pub fn new() -> Self {
        Self {
            submissions: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    /// A provider whose transport always fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Get the number of times submit_update() was called
    pub fn update_call_count(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }

    /// Get every submission so far
    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl DnsProvider for MockDnsProvider {
    async fn submit_update(&self, update_url: &str, username: &str, password: &str) -> Result<()> {
        self.submissions.lock().unwrap().push(Submission {
            url: update_url.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        });

        if self.fail {
            return Err(Error::http("connection refused"));
        }
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Helper to create a minimal enabled configuration for testing
pub fn minimal_config(hostname: &str) -> DynDnsConfig {
    DynDnsConfig::new(hostname, "test-user", "test-password")
}
