//! Bootstrap strategies

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use doctor_connstr::ResolvedConnectionSpec;
use doctor_reporter::{Reporter, ReporterExt};
use doctor_topology::{BucketTopology, ClusterNode, Endpoint};
use tracing::debug;

use crate::{ConfigMismatchError, ConfigSource};

/// The ways a client can obtain its first cluster configuration.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum StrategyKind {
    /// Binary configuration protocol over the memcached port
    Cccp,

    /// Terse bucket configuration over HTTP
    TerseHttp,

    /// Full (verbose) bucket configuration over HTTP
    FullHttp,
}

impl StrategyKind {
    /// Name used in diagnostic messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cccp => "CCCP",
            Self::TerseHttp => "HTTP (Terse)",
            Self::FullHttp => "HTTP (Full)",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a single strategy achieved.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// The connection string gives the strategy nothing to contact
    Skipped,

    /// The strategy exists but the doctor cannot exercise it
    Unsupported,

    /// Every endpoint failed or served no usable topology
    Failed,

    /// A topology was obtained and yielded these nodes
    Bootstrapped(Vec<ClusterNode>),
}

/// A way of fetching the initial cluster configuration.
#[async_trait]
pub trait BootstrapStrategy
where
    Self: Send + Sync + 'static,
{
    /// Which strategy this is.
    fn kind(&self) -> StrategyKind;

    /// Endpoints the strategy would contact.
    fn endpoints<'a>(&self, spec: &'a ResolvedConnectionSpec) -> &'a [Endpoint];

    /// Try to bootstrap. Only called when [`endpoints`](Self::endpoints) is
    /// non-empty.
    async fn attempt(&self, spec: &ResolvedConnectionSpec, password: &str) -> Outcome;
}

/// CCCP is recognised but not exercised.
pub struct CccpStrategy {
    reporter: Arc<dyn Reporter>,
}

impl CccpStrategy {
    /// Create a new CCCP strategy
    pub fn new(reporter: Arc<dyn Reporter>) -> Self {
        Self { reporter }
    }
}

#[async_trait]
impl BootstrapStrategy for CccpStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Cccp
    }

    fn endpoints<'a>(&self, spec: &'a ResolvedConnectionSpec) -> &'a [Endpoint] {
        &spec.cccp_endpoints
    }

    async fn attempt(&self, _spec: &ResolvedConnectionSpec, _password: &str) -> Outcome {
        self.reporter.info(format!(
            "Failed to connect via {}, as it is not yet supported by the doctor",
            self.kind()
        ));
        Outcome::Unsupported
    }
}

/// Full HTTP configurations are recognised but not exercised.
pub struct FullHttpStrategy {
    reporter: Arc<dyn Reporter>,
}

impl FullHttpStrategy {
    /// Create a new full HTTP strategy
    pub fn new(reporter: Arc<dyn Reporter>) -> Self {
        Self { reporter }
    }
}

#[async_trait]
impl BootstrapStrategy for FullHttpStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::FullHttp
    }

    fn endpoints<'a>(&self, spec: &'a ResolvedConnectionSpec) -> &'a [Endpoint] {
        &spec.http_endpoints
    }

    async fn attempt(&self, _spec: &ResolvedConnectionSpec, _password: &str) -> Outcome {
        self.reporter.info(format!(
            "Failed to connect via {}, as it is not yet supported by the doctor",
            self.kind()
        ));
        Outcome::Unsupported
    }
}

/// Fetches the terse configuration from every HTTP endpoint.
///
/// The first topology fetched is the master; later ones are only checked for
/// agreement with it.
pub struct TerseHttpStrategy<C>
where
    C: ConfigSource,
{
    source: Arc<C>,
    reporter: Arc<dyn Reporter>,
}

impl<C> TerseHttpStrategy<C>
where
    C: ConfigSource,
{
    /// Create a new terse HTTP strategy
    pub fn new(source: Arc<C>, reporter: Arc<dyn Reporter>) -> Self {
        Self { source, reporter }
    }

    fn check_advertised_hostname(&self, endpoint: &Endpoint, topology: &BucketTopology) {
        let Some(this_node) = topology.self_node() else {
            debug!("configuration from {} does not identify its own node", endpoint);
            return;
        };

        if !this_node.hostname.is_empty() && this_node.hostname != endpoint.host {
            self.reporter.warn(format!(
                "Bootstrap host `{}` is not using the canonical node hostname of `{}`. This is not necessarily an error, but has been known to result in strange and challenging to diagnose errors when DNS entries are reconfigured.",
                endpoint.host, this_node.hostname
            ));
        }
    }
}

#[async_trait]
impl<C> BootstrapStrategy for TerseHttpStrategy<C>
where
    C: ConfigSource,
{
    fn kind(&self) -> StrategyKind {
        StrategyKind::TerseHttp
    }

    fn endpoints<'a>(&self, spec: &'a ResolvedConnectionSpec) -> &'a [Endpoint] {
        &spec.http_endpoints
    }

    async fn attempt(&self, spec: &ResolvedConnectionSpec, password: &str) -> Outcome {
        let mut master: Option<BucketTopology> = None;

        for endpoint in &spec.http_endpoints {
            let topology = match self
                .source
                .fetch_terse_config(endpoint, &spec.bucket, password)
                .await
            {
                Ok(topology) => topology,
                Err(e) => {
                    self.reporter.error(format!(
                        "Failed to fetch terse configuration via http from bootstrap host `{}` (error: {e})",
                        endpoint.host
                    ));
                    continue;
                }
            };

            debug!(
                "fetched terse config rev {} from {} ({} nodes)",
                topology.rev,
                endpoint,
                topology.nodes_ext.len()
            );

            if let Some(master) = &master {
                if master.uuid != topology.uuid {
                    self.reporter.error(
                        ConfigMismatchError {
                            host: endpoint.host.clone(),
                            expected: master.uuid.clone(),
                            found: topology.uuid.clone(),
                        }
                        .to_string(),
                    );
                }
            }

            self.check_advertised_hostname(endpoint, &topology);

            if master.is_none() {
                master = Some(topology);
            }
        }

        let Some(master) = master else {
            return Outcome::Failed;
        };

        let nodes = master.cluster_nodes();
        if nodes.is_empty() {
            self.reporter.warn(format!(
                "Bootstrap host `{}` returned a configuration without any nodes",
                master.source_host
            ));
            return Outcome::Failed;
        }

        Outcome::Bootstrapped(nodes)
    }
}
