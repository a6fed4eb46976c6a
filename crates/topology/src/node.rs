//! Canonical cluster node

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Endpoint, Service};

/// A node of the cluster as a client would see it after bootstrap.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ClusterNode {
    /// Resolved hostname; never empty
    pub hostname: String,

    /// Service name to port
    pub services: BTreeMap<String, u16>,
}

impl ClusterNode {
    /// Create a new node
    pub fn new(hostname: impl Into<String>, services: BTreeMap<String, u16>) -> Self {
        Self {
            hostname: hostname.into(),
            services,
        }
    }

    /// Port of a service, if the node offers it
    #[must_use]
    pub fn port(&self, service: Service) -> Option<u16> {
        self.services
            .get(service.key())
            .copied()
            .filter(|port| *port != 0)
    }

    /// Endpoint of a service, if the node offers it
    #[must_use]
    pub fn endpoint(&self, service: Service) -> Option<Endpoint> {
        self.port(service)
            .map(|port| Endpoint::new(self.hostname.clone(), port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_port_means_not_offered() {
        let node = ClusterNode::new(
            "node1",
            BTreeMap::from([("kv".to_string(), 11210), ("fts".to_string(), 0)]),
        );

        assert_eq!(node.port(Service::Kv), Some(11210));
        assert_eq!(node.port(Service::Fts), None);
        assert_eq!(node.port(Service::N1ql), None);
        assert_eq!(
            node.endpoint(Service::Kv),
            Some(Endpoint::new("node1", 11210))
        );
    }
}
