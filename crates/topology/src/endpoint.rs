//! Host and port pairs

use std::fmt;

use serde::{Deserialize, Serialize};

/// A host and port to contact.
///
/// `host` is stored without brackets; IPv6 literals get them back when the
/// endpoint is displayed or turned into a URL.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    /// Hostname or IP literal
    pub host: String,

    /// Port
    pub port: u16,
}

impl Endpoint {
    /// Create a new endpoint
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// The host as it must appear in a URL authority.
    #[must_use]
    pub fn url_host(&self) -> String {
        url_host(&self.host)
    }

    /// `http://host:port` followed by `path`, which must start with `/`.
    #[must_use]
    pub fn http_url(&self, path: &str) -> String {
        format!("http://{}:{}{path}", self.url_host(), self.port)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.url_host(), self.port)
    }
}

/// Wrap IPv6 literals in brackets.
#[must_use]
pub fn url_host(host: &str) -> String {
    if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]")
    } else {
        host.to_string()
    }
}
