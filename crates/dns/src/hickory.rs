use crate::{DnsResolver, Error, Result, SrvTarget};

use std::net::IpAddr;

use async_trait::async_trait;
use hickory_resolver::TokioAsyncResolver;
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use tracing::debug;

/// [`DnsResolver`] backed by the system resolver configuration.
#[derive(Clone)]
pub struct HickoryDnsResolver {
    resolver: TokioAsyncResolver,
}

impl HickoryDnsResolver {
    /// Create a resolver from the system configuration (`/etc/resolv.conf`
    /// on unix).
    ///
    /// # Errors
    ///
    /// Returns an error if the system configuration cannot be read.
    pub fn from_system_conf() -> Result<Self> {
        let resolver = TokioAsyncResolver::tokio_from_system_conf()
            .map_err(|e| Error::Configuration(e.to_string()))?;

        Ok(Self { resolver })
    }
}

#[async_trait]
impl DnsResolver for HickoryDnsResolver {
    async fn lookup_srv(&self, name: &str) -> Result<Vec<SrvTarget>> {
        debug!("looking up SRV records for {}", name);

        let lookup = match self.resolver.srv_lookup(name).await {
            Ok(lookup) => lookup,
            Err(e) if is_no_records(&e) => return Ok(Vec::new()),
            Err(e) => return Err(lookup_error(name, &e)),
        };

        let mut targets: Vec<SrvTarget> = lookup
            .iter()
            .map(|srv| SrvTarget {
                host: srv.target().to_utf8().trim_end_matches('.').to_string(),
                port: srv.port(),
                priority: srv.priority(),
                weight: srv.weight(),
            })
            .collect();

        // stable, so records of equal priority keep their response order
        targets.sort_by_key(|target| target.priority);

        debug!("{} returned {} SRV records", name, targets.len());

        Ok(targets)
    }

    async fn lookup_host(&self, host: &str) -> Result<Vec<IpAddr>> {
        debug!("looking up addresses for {}", host);

        match self.resolver.lookup_ip(host).await {
            Ok(lookup) => Ok(lookup.iter().collect()),
            Err(e) if is_no_records(&e) => Ok(Vec::new()),
            Err(e) => Err(lookup_error(host, &e)),
        }
    }
}

fn is_no_records(error: &ResolveError) -> bool {
    matches!(error.kind(), ResolveErrorKind::NoRecordsFound { .. })
}

fn lookup_error(name: &str, error: &ResolveError) -> Error {
    Error::Lookup {
        name: name.to_string(),
        reason: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ip_literal_resolves_to_itself() {
        let Ok(resolver) = HickoryDnsResolver::from_system_conf() else {
            // no resolver configuration in this environment
            return;
        };

        let addrs = resolver.lookup_host("127.0.0.1").await.unwrap();
        assert_eq!(addrs, vec!["127.0.0.1".parse::<IpAddr>().unwrap()]);
    }
}
