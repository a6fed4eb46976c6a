use thiserror::Error;

/// Result type for DNS lookups.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by a [`crate::DnsResolver`].
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum Error {
    /// The resolver could not be built from the system configuration.
    #[error("failed to create DNS resolver: {0}")]
    Configuration(String),

    /// A lookup failed for a reason other than the name having no records.
    #[error("lookup of `{name}` failed: {reason}")]
    Lookup {
        /// The queried name
        name: String,

        /// Why the lookup failed
        reason: String,
    },
}
