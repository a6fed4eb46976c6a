use crate::Attempt;

use thiserror::Error;

/// Result type for a bootstrap pass.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that end a bootstrap pass.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum Error {
    /// No strategy produced a node list.
    #[error("all bootstrap strategies were exhausted without obtaining a cluster configuration")]
    Exhausted {
        /// What each strategy did, in order
        attempts: Vec<Attempt>,
    },
}

/// Failure to fetch a topology from one endpoint.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum FetchError {
    /// The server rejected the bucket name and password.
    #[error("incorrect bucket/password")]
    Unauthorized,

    /// The server answered with a non-success status.
    #[error("http error (status code: {0})")]
    Status(u16),

    /// No answer within the fetch timeout.
    #[error("timed out waiting for a response")]
    Timeout,

    /// The request could not be sent or the response could not be read.
    #[error("{0}")]
    Transport(String),

    /// The body is not a terse bucket configuration.
    #[error("{0}")]
    Malformed(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<doctor_topology::Error> for FetchError {
    fn from(err: doctor_topology::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// A bootstrap host served a topology from a different cluster than the
/// first host that answered.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error(
    "Bootstrap host `{host}` appears to be pointing to a different cluster (uuid `{found}`, expected `{expected}`). Tests will be running against the first successfully connected node in your bootstrap list, as a client would behave."
)]
pub struct ConfigMismatchError {
    /// Host that served the diverging topology
    pub host: String,

    /// Cluster UUID of the first topology fetched
    pub expected: String,

    /// Cluster UUID served by `host`
    pub found: String,
}
