//! Expansion of a parsed connection string into bootstrap endpoints

use std::collections::BTreeMap;
use std::sync::Arc;

use doctor_dns::DnsResolver;
use doctor_reporter::{Reporter, ReporterExt};
use doctor_topology::Endpoint;
use tracing::debug;

use crate::{ConnectionSpec, HostEntry, ResolveError, Scheme};

/// Default CCCP (memcached) port.
pub const DEFAULT_MEMD_PORT: u16 = 11210;

/// Default CCCP port for secured connections.
pub const DEFAULT_SSL_MEMD_PORT: u16 = 11207;

/// Default HTTP management port.
pub const DEFAULT_HTTP_PORT: u16 = 8091;

/// Default HTTP management port for secured connections.
pub const DEFAULT_SSL_HTTP_PORT: u16 = 18091;

/// A connection string expanded into the endpoints each bootstrap strategy
/// should contact.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedConnectionSpec {
    /// Whether connections are secured
    pub use_ssl: bool,

    /// Endpoints for the binary configuration protocol
    pub cccp_endpoints: Vec<Endpoint>,

    /// Endpoints for HTTP configuration
    pub http_endpoints: Vec<Endpoint>,

    /// Bucket name
    pub bucket: String,

    /// Options carried over from the connection string
    pub options: BTreeMap<String, String>,

    /// SRV record the endpoints came from, if discovery was used
    pub srv_record: Option<String>,
}

/// Resolves parsed connection strings, using DNS SRV discovery where it
/// applies.
pub struct SpecResolver<D>
where
    D: DnsResolver,
{
    dns: Arc<D>,
    reporter: Arc<dyn Reporter>,
}

impl<D> SpecResolver<D>
where
    D: DnsResolver,
{
    /// Create a new resolver
    pub fn new(dns: Arc<D>, reporter: Arc<dyn Reporter>) -> Self {
        Self { dns, reporter }
    }

    /// Expand `spec` into CCCP and HTTP endpoint lists.
    ///
    /// A failed SRV lookup is reported as a warning and treated like a name
    /// without SRV records.
    ///
    /// # Errors
    ///
    /// Returns an error if a literal host carries a port that cannot be
    /// attributed to either protocol.
    pub async fn resolve(
        &self,
        spec: &ConnectionSpec,
    ) -> Result<ResolvedConnectionSpec, ResolveError> {
        let ports = PortPlan::for_scheme(spec.scheme);

        if let Some(record) = spec.srv_record_name() {
            match self.dns.lookup_srv(&record).await {
                Ok(targets) if !targets.is_empty() => {
                    debug!("using {} SRV targets from {}", targets.len(), record);

                    let hosts = targets
                        .into_iter()
                        .map(|target| HostEntry::new(target.host, Some(target.port)))
                        .collect::<Vec<_>>();

                    return Ok(ports.expand(spec, &hosts, Some(record)));
                }
                Ok(_) => debug!("no SRV records for {}, using the literal host", record),
                Err(e) => self.reporter.warn(format!(
                    "DNS SRV lookup for `{record}` failed, treating `{}` as a plain bootstrap host (error: {e})",
                    spec.hosts[0].host
                )),
            }
        }

        for host in &spec.hosts {
            ports.validate(host)?;
        }

        Ok(ports.expand(spec, &spec.hosts, None))
    }
}

/// Default ports for one scheme and how explicit ports map onto them.
#[derive(Clone, Copy, Debug)]
struct PortPlan {
    scheme: Option<Scheme>,
    memd: u16,
    http: u16,
    native: u16,
}

impl PortPlan {
    const fn for_scheme(scheme: Option<Scheme>) -> Self {
        match scheme {
            Some(Scheme::Couchbase) => Self {
                scheme,
                memd: DEFAULT_MEMD_PORT,
                http: DEFAULT_HTTP_PORT,
                native: DEFAULT_MEMD_PORT,
            },
            Some(Scheme::Couchbases) => Self {
                scheme,
                memd: DEFAULT_SSL_MEMD_PORT,
                http: DEFAULT_SSL_HTTP_PORT,
                native: DEFAULT_SSL_MEMD_PORT,
            },
            Some(Scheme::Http) | None => Self {
                scheme,
                memd: DEFAULT_MEMD_PORT,
                http: DEFAULT_HTTP_PORT,
                native: DEFAULT_HTTP_PORT,
            },
        }
    }

    fn validate(self, host: &HostEntry) -> Result<(), ResolveError> {
        let Some(port) = host.port else {
            return Ok(());
        };

        match self.scheme {
            None if port != self.native => Err(ResolveError::AmbiguousPort {
                host: host.host.clone(),
                port,
            }),
            Some(scheme @ (Scheme::Couchbase | Scheme::Couchbases))
                if port == DEFAULT_HTTP_PORT =>
            {
                Err(ResolveError::HttpPortWithMemdScheme {
                    scheme: scheme.as_str(),
                    host: host.host.clone(),
                })
            }
            _ => Ok(()),
        }
    }

    /// One CCCP and one HTTP endpoint per host, in order.
    fn expand(
        self,
        spec: &ConnectionSpec,
        hosts: &[HostEntry],
        srv_record: Option<String>,
    ) -> ResolvedConnectionSpec {
        let (cccp_endpoints, http_endpoints): (Vec<_>, Vec<_>) = hosts
            .iter()
            .map(|entry| {
                let (memd, http) = self.ports_for(entry.port);
                (
                    Endpoint::new(entry.host.clone(), memd),
                    Endpoint::new(entry.host.clone(), http),
                )
            })
            .unzip();

        ResolvedConnectionSpec {
            use_ssl: spec.use_ssl(),
            cccp_endpoints,
            http_endpoints,
            bucket: spec.bucket.clone(),
            options: spec.options.clone(),
            srv_record,
        }
    }

    /// `(memd, http)` ports for an entry. A custom port applies to the
    /// scheme's own protocol; the other one keeps its default.
    fn ports_for(self, port: Option<u16>) -> (u16, u16) {
        match port {
            Some(port) if port != self.native && port != DEFAULT_HTTP_PORT => {
                if self.scheme == Some(Scheme::Http) {
                    (self.memd, port)
                } else {
                    (port, self.http)
                }
            }
            _ => (self.memd, self.http),
        }
    }
}
