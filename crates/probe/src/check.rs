use std::time::Duration;

use async_trait::async_trait;
use doctor_topology::Endpoint;
use reqwest::Client;
use tracing::debug;

use crate::ProbeError;

/// Abstract interface for checking that a service endpoint answers.
#[async_trait]
pub trait ServiceCheck
where
    Self: Send + Sync + 'static,
{
    /// Succeeds if `endpoint` produced any response.
    async fn check(&self, endpoint: &Endpoint) -> Result<(), ProbeError>;
}

/// Options for service probing.
#[derive(Clone, Debug, Default)]
pub struct ProbeOptions {
    /// Per-probe timeout; `None` leaves the HTTP client default in place
    pub timeout: Option<Duration>,
}

/// Checks HTTP services with an unauthenticated `GET /`.
#[derive(Clone, Debug)]
pub struct HttpServiceCheck {
    client: Client,
    timeout: Option<Duration>,
}

impl HttpServiceCheck {
    /// Create a new HTTP service check
    #[must_use]
    pub fn new(options: ProbeOptions) -> Self {
        Self {
            client: Client::new(),
            timeout: options.timeout,
        }
    }
}

impl Default for HttpServiceCheck {
    fn default() -> Self {
        Self::new(ProbeOptions::default())
    }
}

#[async_trait]
impl ServiceCheck for HttpServiceCheck {
    async fn check(&self, endpoint: &Endpoint) -> Result<(), ProbeError> {
        let mut request = self.client.get(endpoint.http_url("/"));
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        match request.send().await {
            // Any status means something is listening.
            Ok(response) => {
                debug!("{} answered with {}", endpoint, response.status());
                Ok(())
            }
            Err(e) if e.is_timeout() => Err(ProbeError::Timeout {
                endpoint: endpoint.clone(),
            }),
            Err(e) => Err(ProbeError::Transport {
                endpoint: endpoint.clone(),
                reason: e.to_string(),
            }),
        }
    }
}
