use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use doctor_bootstrap::{ConfigSource, FetchError};
use doctor_topology::{BucketTopology, Endpoint, NodeExt};

/// Shape of one `nodesExt` entry for [`terse_topology`].
#[derive(Clone, Debug, Default)]
pub struct NodeSpec {
    /// Advertised hostname, empty for "the contacted host"
    pub hostname: String,

    /// Whether this entry is the serving node
    pub this_node: bool,

    /// Service name to port
    pub services: Vec<(&'static str, u16)>,
}

impl NodeSpec {
    /// A node offering the usual KV and management ports.
    #[must_use]
    pub fn new(hostname: &str) -> Self {
        Self {
            hostname: hostname.to_string(),
            this_node: false,
            services: vec![("kv", 11210), ("mgmt", 8091)],
        }
    }

    /// Mark as the serving node.
    #[must_use]
    pub const fn this_node(mut self) -> Self {
        self.this_node = true;
        self
    }

    /// Replace the service ports.
    #[must_use]
    pub fn services(mut self, services: Vec<(&'static str, u16)>) -> Self {
        self.services = services;
        self
    }
}

/// Build a terse topology as a server would serve it.
#[must_use]
pub fn terse_topology(uuid: &str, nodes: Vec<NodeSpec>) -> BucketTopology {
    BucketTopology {
        source_host: String::new(),
        uuid: uuid.to_string(),
        rev: 1,
        nodes_ext: nodes
            .into_iter()
            .map(|node| NodeExt {
                this_node: node.this_node,
                hostname: node.hostname,
                services: node
                    .services
                    .into_iter()
                    .map(|(name, port)| (name.to_string(), port))
                    .collect::<BTreeMap<_, _>>(),
            })
            .collect(),
    }
}

/// Mock config source serving canned topologies per endpoint.
///
/// Endpoints without a canned answer fail as if the connection was refused.
#[derive(Clone, Debug, Default)]
pub struct MockConfigSource {
    responses: HashMap<Endpoint, Result<BucketTopology, FetchError>>,
    fetches: Arc<Mutex<Vec<Endpoint>>>,
}

impl MockConfigSource {
    /// Create a source with no canned answers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `topology` from `endpoint`.
    #[must_use]
    pub fn with_topology(mut self, endpoint: Endpoint, topology: BucketTopology) -> Self {
        self.responses.insert(endpoint, Ok(topology));
        self
    }

    /// Fail fetches from `endpoint` with `error`.
    #[must_use]
    pub fn with_error(mut self, endpoint: Endpoint, error: FetchError) -> Self {
        self.responses.insert(endpoint, Err(error));
        self
    }

    /// Endpoints fetched so far, in order.
    #[must_use]
    pub fn fetches(&self) -> Vec<Endpoint> {
        self.fetches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ConfigSource for MockConfigSource {
    async fn fetch_terse_config(
        &self,
        endpoint: &Endpoint,
        _bucket: &str,
        _password: &str,
    ) -> Result<BucketTopology, FetchError> {
        self.fetches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(endpoint.clone());

        match self.responses.get(endpoint) {
            Some(Ok(topology)) => {
                let mut topology = topology.clone();
                topology.source_host.clone_from(&endpoint.host);
                Ok(topology)
            }
            Some(Err(e)) => Err(e.clone()),
            None => Err(FetchError::Transport(format!(
                "error sending request for url (http://{endpoint}/): connection refused"
            ))),
        }
    }
}
