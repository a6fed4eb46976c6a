use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use doctor_dns::{DnsResolver, Error, Result, SrvTarget};

/// Mock DNS resolver backed by in-memory records.
///
/// Names without records resolve to an empty list.
#[derive(Clone, Debug, Default)]
pub struct MockDnsResolver {
    srv: HashMap<String, Result<Vec<SrvTarget>>>,
    hosts: HashMap<String, Result<Vec<IpAddr>>>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl MockDnsResolver {
    /// Create a resolver with no records.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add SRV records for `name`.
    #[must_use]
    pub fn with_srv(mut self, name: &str, targets: Vec<SrvTarget>) -> Self {
        self.srv.insert(name.to_string(), Ok(targets));
        self
    }

    /// Make SRV lookups of `name` fail.
    #[must_use]
    pub fn with_srv_failure(mut self, name: &str, reason: &str) -> Self {
        self.srv.insert(name.to_string(), Err(lookup_error(name, reason)));
        self
    }

    /// Add address records for `host`.
    #[must_use]
    pub fn with_host(mut self, host: &str, addresses: Vec<IpAddr>) -> Self {
        self.hosts.insert(host.to_string(), Ok(addresses));
        self
    }

    /// Make address lookups of `host` fail.
    #[must_use]
    pub fn with_host_failure(mut self, host: &str, reason: &str) -> Self {
        self.hosts
            .insert(host.to_string(), Err(lookup_error(host, reason)));
        self
    }

    /// Every query made so far, as `SRV <name>` or `A <host>`.
    #[must_use]
    pub fn queries(&self) -> Vec<String> {
        self.queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, query: String) {
        self.queries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(query);
    }
}

fn lookup_error(name: &str, reason: &str) -> Error {
    Error::Lookup {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

#[async_trait]
impl DnsResolver for MockDnsResolver {
    async fn lookup_srv(&self, name: &str) -> Result<Vec<SrvTarget>> {
        self.record(format!("SRV {name}"));
        self.srv.get(name).cloned().unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn lookup_host(&self, host: &str) -> Result<Vec<IpAddr>> {
        self.record(format!("A {host}"));

        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(vec![ip]);
        }

        self.hosts
            .get(host)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}
