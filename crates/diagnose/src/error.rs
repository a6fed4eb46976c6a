use thiserror::Error;

/// Result type for a diagnostic run.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that stop a diagnostic run before it reaches the service probes.
///
/// Each has already been reported as an error event when returned.
#[derive(Debug, Error)]
pub enum Error {
    /// The connection string could not be parsed.
    #[error(transparent)]
    Parse(#[from] doctor_connstr::ParseError),

    /// The connection string could not be turned into endpoints.
    #[error(transparent)]
    Resolve(#[from] doctor_connstr::ResolveError),

    /// No bootstrap strategy produced cluster nodes.
    #[error(transparent)]
    Bootstrap(#[from] doctor_bootstrap::Error),

    /// The system DNS resolver could not be created.
    #[error(transparent)]
    Dns(#[from] doctor_dns::Error),
}
