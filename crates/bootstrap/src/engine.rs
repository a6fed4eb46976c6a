use std::sync::Arc;

use doctor_connstr::ResolvedConnectionSpec;
use doctor_reporter::{Reporter, ReporterExt};
use doctor_topology::ClusterNode;
use tracing::{debug, info};

use crate::{
    BootstrapStrategy, CccpStrategy, ConfigSource, Error, FullHttpStrategy, Outcome, Result,
    StrategyKind, TerseHttpStrategy,
};

/// Record of one strategy's turn.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Attempt {
    /// Strategy that ran
    pub kind: StrategyKind,

    /// What it achieved
    pub outcome: Outcome,
}

/// Result of a successful bootstrap pass.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Bootstrap {
    /// Strategy that produced the node list
    pub strategy: StrategyKind,

    /// Nodes of the cluster as seen by the master topology
    pub nodes: Vec<ClusterNode>,

    /// Every strategy that ran, in order, including the successful one
    pub attempts: Vec<Attempt>,
}

/// Runs bootstrap strategies in order until one yields cluster nodes.
pub struct BootstrapEngine {
    strategies: Vec<Box<dyn BootstrapStrategy>>,
    reporter: Arc<dyn Reporter>,
}

impl BootstrapEngine {
    /// Engine with the standard order: CCCP, terse HTTP, full HTTP.
    pub fn new<C>(source: Arc<C>, reporter: Arc<dyn Reporter>) -> Self
    where
        C: ConfigSource,
    {
        let strategies: Vec<Box<dyn BootstrapStrategy>> = vec![
            Box::new(CccpStrategy::new(reporter.clone())),
            Box::new(TerseHttpStrategy::new(source, reporter.clone())),
            Box::new(FullHttpStrategy::new(reporter.clone())),
        ];

        Self::with_strategies(strategies, reporter)
    }

    /// Engine running `strategies` in the given order.
    pub fn with_strategies(
        strategies: Vec<Box<dyn BootstrapStrategy>>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            strategies,
            reporter,
        }
    }

    /// Run each strategy in turn, stopping at the first that produces
    /// nodes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Exhausted`] if no strategy produced nodes. The
    /// matching error event has already been reported.
    pub async fn bootstrap(
        &self,
        spec: &ResolvedConnectionSpec,
        password: &str,
    ) -> Result<Bootstrap> {
        let mut attempts = Vec::with_capacity(self.strategies.len());

        for strategy in &self.strategies {
            let kind = strategy.kind();

            let outcome = if strategy.endpoints(spec).is_empty() {
                self.reporter.info(format!(
                    "Not attempting {kind}, as the connection string does not support it"
                ));
                Outcome::Skipped
            } else {
                self.reporter
                    .info(format!("Attempting to connect to cluster via {kind}"));
                strategy.attempt(spec, password).await
            };

            debug!("bootstrap via {} finished: {:?}", kind, outcome);
            attempts.push(Attempt {
                kind,
                outcome: outcome.clone(),
            });

            if let Outcome::Bootstrapped(nodes) = outcome {
                info!("bootstrapped via {} with {} nodes", kind, nodes.len());
                return Ok(Bootstrap {
                    strategy: kind,
                    nodes,
                    attempts,
                });
            }
        }

        self.reporter.error(
            "All endpoints specified by your connection string were unreachable, further cluster diagnostics are not possible",
        );

        Err(Error::Exhausted { attempts })
    }
}
