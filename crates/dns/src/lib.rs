//! Abstract interface for the DNS lookups made during a diagnostic run.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod error;
mod hickory;

pub use error::{Error, Result};
pub use hickory::HickoryDnsResolver;

use std::fmt::{self, Display};
use std::net::IpAddr;

use async_trait::async_trait;

/// A target returned by an SRV lookup.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct SrvTarget {
    /// Target host, without the trailing root dot.
    pub host: String,

    /// Target port.
    pub port: u16,

    /// Record priority; lower is preferred.
    pub priority: u16,

    /// Relative weight among records of the same priority.
    pub weight: u16,
}

impl SrvTarget {
    /// Create a target with default priority and weight.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            priority: 0,
            weight: 0,
        }
    }
}

impl Display for SrvTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Abstract interface for SRV and address lookups.
///
/// A name that exists but has no records of the requested type is not an
/// error: implementations return an empty list.
#[async_trait]
pub trait DnsResolver
where
    Self: Send + Sync + 'static,
{
    /// Look up SRV records for a fully formed record name such as
    /// `_couchbase._tcp.example.com`, ordered by priority.
    async fn lookup_srv(&self, name: &str) -> Result<Vec<SrvTarget>>;

    /// Look up the A/AAAA addresses of a host.
    async fn lookup_host(&self, host: &str) -> Result<Vec<IpAddr>>;
}
