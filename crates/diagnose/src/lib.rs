//! Orchestration of a full diagnostic run.
//!
//! A run parses and resolves the connection string, checks DNS, bootstraps
//! against the cluster and probes the services of every node it learns
//! about. Every stage writes to the same [`Reporter`].
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod error;

pub use error::{Error, Result};

use std::sync::Arc;
use std::time::Duration;

use doctor_bootstrap::{
    Bootstrap, BootstrapEngine, ConfigSource, DEFAULT_FETCH_TIMEOUT, HttpConfigSource,
    HttpConfigSourceOptions,
};
use doctor_connstr::{ConnectionSpec, ResolvedConnectionSpec, SpecResolver, parse};
use doctor_dns::{DnsResolver, HickoryDnsResolver};
use doctor_dns_validator::DnsValidator;
use doctor_probe::{HttpServiceCheck, ProbeOptions, ProbeResult, ServiceCheck, ServiceProber};
use doctor_reporter::{Reporter, ReporterExt};
use tracing::info;

/// Options for a diagnostic run against a live cluster.
#[derive(Clone, Debug)]
pub struct DiagnoseOptions {
    /// Timeout for each terse configuration fetch
    pub fetch_timeout: Duration,

    /// Timeout for each service probe; `None` uses the HTTP client default
    pub probe_timeout: Option<Duration>,
}

impl Default for DiagnoseOptions {
    fn default() -> Self {
        Self {
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            probe_timeout: None,
        }
    }
}

/// Everything a completed run learned.
#[derive(Clone, Debug)]
pub struct Diagnostics {
    /// Parsed connection string
    pub spec: ConnectionSpec,

    /// Endpoints derived from it
    pub resolved: ResolvedConnectionSpec,

    /// Bootstrap result
    pub bootstrap: Bootstrap,

    /// Per node and service probe results
    pub probes: Vec<ProbeResult>,
}

/// Runs diagnostics through injected DNS, configuration and service seams.
pub struct Doctor<D, C, S>
where
    D: DnsResolver,
    C: ConfigSource,
    S: ServiceCheck,
{
    dns: Arc<D>,
    source: Arc<C>,
    check: Arc<S>,
    reporter: Arc<dyn Reporter>,
}

impl Doctor<HickoryDnsResolver, HttpConfigSource, HttpServiceCheck> {
    /// Doctor talking to the network through the system resolver and HTTP.
    ///
    /// # Errors
    ///
    /// Returns an error if the system DNS configuration cannot be read.
    pub fn live(options: &DiagnoseOptions, reporter: Arc<dyn Reporter>) -> Result<Self> {
        let dns = HickoryDnsResolver::from_system_conf()?;
        let source = HttpConfigSource::new(HttpConfigSourceOptions {
            timeout: options.fetch_timeout,
        });
        let check = HttpServiceCheck::new(ProbeOptions {
            timeout: options.probe_timeout,
        });

        Ok(Self::new(
            Arc::new(dns),
            Arc::new(source),
            Arc::new(check),
            reporter,
        ))
    }
}

impl<D, C, S> Doctor<D, C, S>
where
    D: DnsResolver,
    C: ConfigSource,
    S: ServiceCheck,
{
    /// Create a new doctor
    pub fn new(dns: Arc<D>, source: Arc<C>, check: Arc<S>, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            dns,
            source,
            check,
            reporter,
        }
    }

    /// Diagnose the cluster behind `connstr`.
    ///
    /// `bucket_password` overrides any password embedded in the connection
    /// string.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection string cannot be parsed or
    /// resolved, or if no bootstrap strategy reached the cluster. The
    /// failure has already been reported when this returns.
    pub async fn diagnose(
        &self,
        connstr: &str,
        bucket_password: Option<&str>,
    ) -> Result<Diagnostics> {
        self.reporter
            .info(format!("Parsing connection string `{connstr}`"));

        let spec = parse(connstr).inspect_err(|e| {
            self.reporter.error(format!(
                "Failed to parse connection string of `{connstr}` (error: {e})"
            ));
        })?;

        if spec.srv_record_name().is_some() {
            self.reporter
                .info("Connection string was parsed as a potential DNS SRV record");
        }

        let resolved = SpecResolver::new(self.dns.clone(), self.reporter.clone())
            .resolve(&spec)
            .await
            .inspect_err(|e| {
                self.reporter.error(format!(
                    "Failed to properly resolve connection string `{connstr}` (error: {e})"
                ));
            })?;

        self.report_resolved(&resolved);

        DnsValidator::new(self.dns.clone(), self.reporter.clone())
            .validate(&spec, &resolved)
            .await;

        let password = bucket_password
            .or_else(|| {
                spec.credentials
                    .as_ref()
                    .and_then(|credentials| credentials.password.as_deref())
            })
            .unwrap_or_default();

        let bootstrap = BootstrapEngine::new(self.source.clone(), self.reporter.clone())
            .bootstrap(&resolved, password)
            .await?;

        info!(
            "probing {} nodes found via {}",
            bootstrap.nodes.len(),
            bootstrap.strategy
        );

        let probes = ServiceProber::new(self.check.clone(), self.reporter.clone())
            .probe(&bootstrap.nodes, resolved.use_ssl)
            .await;

        Ok(Diagnostics {
            spec,
            resolved,
            bootstrap,
            probes,
        })
    }

    fn report_resolved(&self, resolved: &ResolvedConnectionSpec) {
        if resolved.use_ssl {
            self.reporter
                .info("Connection string specifies to use secured connections");
        }

        self.reporter
            .info("Connection string identifies the following CCCP endpoints:");
        for (i, endpoint) in resolved.cccp_endpoints.iter().enumerate() {
            self.reporter.info(format!("  {}. {endpoint}", i + 1));
        }

        self.reporter
            .info("Connection string identifies the following HTTP endpoints:");
        for (i, endpoint) in resolved.http_endpoints.iter().enumerate() {
            self.reporter.info(format!("  {}. {endpoint}", i + 1));
        }

        self.reporter.info(format!(
            "Connection string specifies bucket `{}`",
            resolved.bucket
        ));
    }
}
