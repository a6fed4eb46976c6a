use thiserror::Error;

/// Errors from parsing a connection string.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ParseError {
    /// The scheme is not one of `couchbase`, `couchbases` or `http`.
    #[error("unsupported scheme `{0}`")]
    UnsupportedScheme(String),

    /// No bootstrap host was given.
    #[error("no hosts specified")]
    NoHosts,

    /// A host entry could not be split into host and port.
    #[error("invalid host entry `{entry}`: {reason}")]
    InvalidHost {
        /// The offending entry
        entry: String,

        /// What is wrong with it
        reason: &'static str,
    },

    /// A port is not a number between 1 and 65535.
    #[error("invalid port `{port}` for host `{host}`")]
    InvalidPort {
        /// Host the port was attached to
        host: String,

        /// The offending port text
        port: String,
    },

    /// The bucket name is not valid percent-encoded UTF-8.
    #[error("invalid bucket name `{0}`")]
    InvalidBucket(String),
}

/// Errors from turning a parsed connection string into endpoints.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ResolveError {
    /// A non-default port was given without a scheme to say what it is for.
    #[error("ambiguous port {port} for host `{host}` without scheme")]
    AmbiguousPort {
        /// Host the port was attached to
        host: String,

        /// The ambiguous port
        port: u16,
    },

    /// The HTTP management port was given with a `couchbase` scheme.
    #[error(
        "`{scheme}://{host}:8091` is not supported for the {scheme}:// scheme, use `{scheme}://{host}`"
    )]
    HttpPortWithMemdScheme {
        /// Scheme in use
        scheme: &'static str,

        /// Host the port was attached to
        host: String,
    },
}
