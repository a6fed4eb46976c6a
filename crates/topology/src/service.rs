//! Services a cluster node can advertise

use std::fmt;

use serde::{Deserialize, Serialize};

/// A service whose port appears in a node's `services` map.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Service {
    /// Key/value (memcached binary protocol).
    Kv,

    /// Cluster management REST API.
    Mgmt,

    /// Views API.
    Capi,

    /// Query service.
    N1ql,

    /// Full-text search service.
    Fts,
}

impl Service {
    /// Every service the prober knows, in probing order.
    pub const ALL: [Self; 5] = [Self::Kv, Self::Mgmt, Self::Capi, Self::N1ql, Self::Fts];

    /// Key used for this service in the terse configuration.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Kv => "kv",
            Self::Mgmt => "mgmt",
            Self::Capi => "capi",
            Self::N1ql => "n1ql",
            Self::Fts => "fts",
        }
    }

    /// Name used in report messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Kv => "KV",
            Self::Mgmt => "MGMT",
            Self::Capi => "CAPI",
            Self::N1ql => "N1QL",
            Self::Fts => "FTS",
        }
    }

    /// Whether the service answers plain HTTP on its root path.
    #[must_use]
    pub const fn is_http(self) -> bool {
        !matches!(self, Self::Kv)
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
