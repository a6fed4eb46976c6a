//! Terse bucket configuration as served by a single node

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{ClusterNode, Result};

/// Placeholder the server writes where the contacted host belongs.
pub const HOST_PLACEHOLDER: &str = "$HOST";

/// One entry of a terse configuration's `nodesExt` list.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeExt {
    /// Set on the entry describing the node that served the configuration.
    #[serde(default)]
    pub this_node: bool,

    /// Advertised hostname; empty means "the host you contacted".
    #[serde(default)]
    pub hostname: String,

    /// Service name to port.
    #[serde(default)]
    pub services: BTreeMap<String, u16>,
}

/// A bucket topology fetched from one bootstrap host.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketTopology {
    /// Host this topology was fetched from. Not part of the wire format.
    #[serde(skip)]
    pub source_host: String,

    /// Cluster identifier; differs between hosts of different clusters.
    #[serde(default)]
    pub uuid: String,

    /// Configuration revision.
    #[serde(default)]
    pub rev: u64,

    /// Per-node service layout.
    #[serde(default)]
    pub nodes_ext: Vec<NodeExt>,
}

impl BucketTopology {
    /// Decode a terse configuration body served by `source_host`.
    ///
    /// Every `$HOST` placeholder is replaced by `source_host` before decoding.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON for a terse configuration.
    pub fn from_terse_json(body: &str, source_host: &str) -> Result<Self> {
        let body = body.replace(HOST_PLACEHOLDER, source_host);

        let mut topology: Self = serde_json::from_str(&body)?;
        topology.source_host = source_host.to_string();

        Ok(topology)
    }

    /// The entry describing the node that served this topology.
    ///
    /// Returns an owned copy of the first entry flagged `thisNode`.
    #[must_use]
    pub fn self_node(&self) -> Option<NodeExt> {
        self.nodes_ext.iter().find(|node| node.this_node).cloned()
    }

    /// Canonical node list: one node per `nodesExt` entry, in order, with an
    /// empty advertised hostname replaced by `source_host`.
    #[must_use]
    pub fn cluster_nodes(&self) -> Vec<ClusterNode> {
        self.nodes_ext
            .iter()
            .map(|node| {
                let hostname = if node.hostname.is_empty() {
                    self.source_host.clone()
                } else {
                    node.hostname.clone()
                };

                ClusterNode::new(hostname, node.services.clone())
            })
            .collect()
    }
}
