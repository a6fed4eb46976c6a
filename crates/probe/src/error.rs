use doctor_topology::Endpoint;
use thiserror::Error;

/// Failure to reach one service endpoint.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ProbeError {
    /// The endpoint did not answer within the probe timeout.
    #[error("timed out connecting to `{endpoint}`")]
    Timeout {
        /// Endpoint probed
        endpoint: Endpoint,
    },

    /// The connection could not be made or the request failed.
    #[error("{reason}")]
    Transport {
        /// Endpoint probed
        endpoint: Endpoint,

        /// Underlying failure
        reason: String,
    },
}

impl ProbeError {
    /// Endpoint the failure concerns.
    #[must_use]
    pub const fn endpoint(&self) -> &Endpoint {
        match self {
            Self::Timeout { endpoint } | Self::Transport { endpoint, .. } => endpoint,
        }
    }
}
