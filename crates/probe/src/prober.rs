use std::sync::Arc;

use doctor_reporter::{Reporter, ReporterExt};
use doctor_topology::{ClusterNode, Endpoint, Service};

use crate::{ProbeError, ServiceCheck};

/// What happened when one service of one node was probed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProbeOutcome {
    /// The service answered
    Reachable,

    /// The service could not be reached
    Unreachable(ProbeError),

    /// The service is offered but the doctor cannot test it
    NotTested,
}

/// Probe result for one service of one node.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProbeResult {
    /// Node hostname
    pub hostname: String,

    /// Service probed
    pub service: Service,

    /// Endpoint of the service
    pub endpoint: Endpoint,

    /// What happened
    pub outcome: ProbeOutcome,
}

/// Probes every service every node advertises.
pub struct ServiceProber<S>
where
    S: ServiceCheck,
{
    check: Arc<S>,
    reporter: Arc<dyn Reporter>,
}

impl<S> ServiceProber<S>
where
    S: ServiceCheck,
{
    /// Create a new prober
    pub fn new(check: Arc<S>, reporter: Arc<dyn Reporter>) -> Self {
        Self { check, reporter }
    }

    /// Probe each node's services in the fixed service order, reporting
    /// every result.
    ///
    /// Secured clusters are not probed at all.
    pub async fn probe(&self, nodes: &[ClusterNode], use_ssl: bool) -> Vec<ProbeResult> {
        if use_ssl {
            self.reporter
                .error("Testing of SSL connections is not yet supported");
            return Vec::new();
        }

        let mut results = Vec::new();

        for node in nodes {
            for service in Service::ALL {
                let Some(endpoint) = node.endpoint(service) else {
                    continue;
                };

                let outcome = self.probe_service(service, &endpoint).await;
                results.push(ProbeResult {
                    hostname: node.hostname.clone(),
                    service,
                    endpoint,
                    outcome,
                });
            }
        }

        results
    }

    async fn probe_service(&self, service: Service, endpoint: &Endpoint) -> ProbeOutcome {
        if !service.is_http() {
            self.reporter.info(format!(
                "{service} service at `{endpoint}` was not tested. Not yet implemented."
            ));
            return ProbeOutcome::NotTested;
        }

        match self.check.check(endpoint).await {
            Ok(()) => {
                self.reporter.info(format!(
                    "Successfully connected to {service} service at `{endpoint}`"
                ));
                ProbeOutcome::Reachable
            }
            Err(e) => {
                self.reporter.error(format!(
                    "Failed to connect to {service} service at `{endpoint}` (error: {e})"
                ));
                ProbeOutcome::Unreachable(e)
            }
        }
    }
}
