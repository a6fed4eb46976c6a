//! Informational DNS checks on the bootstrap hosts of a connection string.
//!
//! Nothing here blocks bootstrap. Findings are reported as events and the
//! resolved connection string is left untouched.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

use std::net::IpAddr;
use std::sync::Arc;

use doctor_connstr::{ConnectionSpec, ResolvedConnectionSpec};
use doctor_dns::DnsResolver;
use doctor_reporter::{Reporter, ReporterExt};
use tracing::debug;

/// Runs DNS sanity checks against the hosts of a connection string.
pub struct DnsValidator<D>
where
    D: DnsResolver,
{
    dns: Arc<D>,
    reporter: Arc<dyn Reporter>,
}

impl<D> DnsValidator<D>
where
    D: DnsResolver,
{
    /// Create a new validator
    pub fn new(dns: Arc<D>, reporter: Arc<dyn Reporter>) -> Self {
        Self { dns, reporter }
    }

    /// Check the literal hosts of `spec`, using `resolved` to tell whether
    /// SRV discovery produced the endpoints.
    pub async fn validate(&self, spec: &ConnectionSpec, resolved: &ResolvedConnectionSpec) {
        let srv_record = resolved.srv_record.as_deref();

        if spec.hosts.len() == 1 && srv_record.is_none() {
            self.reporter.warn(
                "Your connection string specifies only a single host. You should consider adding additional static nodes from your cluster to this list to improve your application's fault-tolerance",
            );
        }

        for entry in &spec.hosts {
            let host = entry.host.as_str();
            self.reporter
                .info(format!("Performing DNS lookup for host `{host}`"));

            let addresses = match self.dns.lookup_host(host).await {
                Ok(addresses) => addresses,
                Err(e) => {
                    debug!("lookup of {} failed: {}", host, e);
                    Vec::new()
                }
            };

            if let Some(record) = srv_record {
                if !addresses.is_empty() {
                    self.reporter.warn(format!(
                        "Your connection string uses DNS SRV records via `{record}`, but `{host}` also resolves as a regular A/AAAA record. This may result in unexpected client behaviour."
                    ));
                }
            }

            self.check_bootstrap_host(host, &addresses);
        }

        if resolved.use_ssl {
            self.reporter.warn(
                "Your connection string specifies SSL. The full-text search service does not support SSL connections, so full-text queries cannot be secured.",
            );
        }
    }

    fn check_bootstrap_host(&self, host: &str, addresses: &[IpAddr]) {
        match addresses {
            [] => self.reporter.error(format!(
                "Bootstrap host `{host}` does not have a valid DNS entry."
            )),
            [address] => {
                if address.to_string() != host {
                    self.reporter.info(format!(
                        "Bootstrap host `{host}` refers to a server with the address `{address}`"
                    ));
                }
            }
            _ => self.reporter.warn(format!(
                "Bootstrap host `{host}` has more than one single DNS entry associated. While this is not necessarily an error, it has been known to cause difficult-to-diagnose problems in the future when routing is changed or the cluster layout is updated."
            )),
        }
    }
}
