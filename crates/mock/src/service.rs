use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use doctor_probe::{ProbeError, ServiceCheck};
use doctor_topology::Endpoint;

/// Mock service check; every endpoint answers unless marked down.
#[derive(Clone, Debug, Default)]
pub struct MockServiceCheck {
    down: HashSet<Endpoint>,
    checked: Arc<Mutex<Vec<Endpoint>>>,
}

impl MockServiceCheck {
    /// Create a check where everything is reachable.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `endpoint` unreachable.
    #[must_use]
    pub fn with_down(mut self, endpoint: Endpoint) -> Self {
        self.down.insert(endpoint);
        self
    }

    /// Endpoints checked so far, in order.
    #[must_use]
    pub fn checked(&self) -> Vec<Endpoint> {
        self.checked
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ServiceCheck for MockServiceCheck {
    async fn check(&self, endpoint: &Endpoint) -> Result<(), ProbeError> {
        self.checked
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(endpoint.clone());

        if self.down.contains(endpoint) {
            return Err(ProbeError::Transport {
                endpoint: endpoint.clone(),
                reason: "connection refused".to_string(),
            });
        }

        Ok(())
    }
}
