//! Parsed connection string

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use percent_encoding::percent_decode_str;

use crate::ParseError;

/// Connection string scheme.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Scheme {
    /// `couchbase://`
    Couchbase,

    /// `couchbases://`, secured connections
    Couchbases,

    /// `http://`, bootstrap against the management port
    Http,
}

impl Scheme {
    /// Scheme as written in a connection string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Couchbase => "couchbase",
            Self::Couchbases => "couchbases",
            Self::Http => "http",
        }
    }

    /// Whether SRV discovery applies to this scheme.
    #[must_use]
    pub const fn supports_srv(self) -> bool {
        matches!(self, Self::Couchbase | Self::Couchbases)
    }
}

impl FromStr for Scheme {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "couchbase" => Ok(Self::Couchbase),
            "couchbases" => Ok(Self::Couchbases),
            "http" => Ok(Self::Http),
            other => Err(ParseError::UnsupportedScheme(other.to_string())),
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One bootstrap host as written in the connection string.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct HostEntry {
    /// Hostname or IP literal, without IPv6 brackets
    pub host: String,

    /// Explicit port, if one was given
    pub port: Option<u16>,
}

impl HostEntry {
    /// Create a new host entry
    pub fn new(host: impl Into<String>, port: Option<u16>) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

/// `user[:password]@` prefix of a connection string.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Credentials {
    /// Username
    pub username: String,

    /// Password, if given
    pub password: Option<String>,
}

/// A parsed, unresolved connection string.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConnectionSpec {
    /// Scheme, if one was given
    pub scheme: Option<Scheme>,

    /// Bootstrap hosts in priority order; never empty
    pub hosts: Vec<HostEntry>,

    /// Bucket name; may be empty
    pub bucket: String,

    /// Credentials embedded in the connection string
    pub credentials: Option<Credentials>,

    /// Remaining `?key=value` options
    pub options: BTreeMap<String, String>,
}

impl ConnectionSpec {
    /// Whether the scheme asks for secured connections.
    #[must_use]
    pub const fn use_ssl(&self) -> bool {
        matches!(self.scheme, Some(Scheme::Couchbases))
    }

    /// The SRV record name to query, if this connection string could be a
    /// DNS SRV name: exactly one host, no explicit port, and a `couchbase`
    /// or `couchbases` scheme.
    #[must_use]
    pub fn srv_record_name(&self) -> Option<String> {
        let scheme = self.scheme.filter(|scheme| scheme.supports_srv())?;

        match self.hosts.as_slice() {
            [HostEntry { host, port: None }] => Some(format!("_{scheme}._tcp.{host}")),
            _ => None,
        }
    }
}

impl FromStr for ConnectionSpec {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parse a connection string of the form
/// `[scheme://][user[:pass]@]host[:port][,host[:port]...][/bucket][?key=value&...]`.
///
/// Hosts may be separated by `,` or `;`. IPv6 literals must be bracketed.
///
/// # Errors
///
/// Returns an error if the scheme is unknown, no host is given, a host entry
/// or port is malformed, or the bucket is not valid percent-encoded UTF-8.
pub fn parse(input: &str) -> Result<ConnectionSpec, ParseError> {
    let input = input.trim();

    let (scheme, rest) = match input.split_once("://") {
        Some((scheme, rest)) => (Some(scheme.parse::<Scheme>()?), rest),
        None => (None, input),
    };

    let (rest, query) = rest.split_once('?').unwrap_or((rest, ""));
    let (authority, bucket) = rest.split_once('/').unwrap_or((rest, ""));

    let (credentials, host_list) = match authority.rsplit_once('@') {
        Some((userinfo, hosts)) => (Some(parse_credentials(userinfo)?), hosts),
        None => (None, authority),
    };

    let hosts = host_list
        .split([',', ';'])
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(parse_host_entry)
        .collect::<Result<Vec<_>, _>>()?;

    if hosts.is_empty() {
        return Err(ParseError::NoHosts);
    }

    let bucket = decode(bucket).ok_or_else(|| ParseError::InvalidBucket(bucket.to_string()))?;

    let options = url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect::<BTreeMap<_, _>>();

    Ok(ConnectionSpec {
        scheme,
        hosts,
        bucket,
        credentials,
        options,
    })
}

fn parse_credentials(userinfo: &str) -> Result<Credentials, ParseError> {
    let invalid = || ParseError::InvalidHost {
        entry: format!("{userinfo}@"),
        reason: "credentials are not valid percent-encoded UTF-8",
    };

    let (username, password) = match userinfo.split_once(':') {
        Some((username, password)) => (username, Some(password)),
        None => (userinfo, None),
    };

    Ok(Credentials {
        username: decode(username).ok_or_else(invalid)?,
        password: password
            .map(|password| decode(password).ok_or_else(invalid))
            .transpose()?,
    })
}

fn parse_host_entry(entry: &str) -> Result<HostEntry, ParseError> {
    let (host, port) = if let Some(bracketed) = entry.strip_prefix('[') {
        let (host, after) = bracketed
            .split_once(']')
            .ok_or_else(|| ParseError::InvalidHost {
                entry: entry.to_string(),
                reason: "unterminated IPv6 address",
            })?;

        let port = match after {
            "" => None,
            after => Some(after.strip_prefix(':').ok_or_else(|| ParseError::InvalidHost {
                entry: entry.to_string(),
                reason: "unexpected text after IPv6 address",
            })?),
        };

        (host, port)
    } else if entry.matches(':').count() > 1 {
        return Err(ParseError::InvalidHost {
            entry: entry.to_string(),
            reason: "IPv6 addresses must be enclosed in brackets",
        });
    } else {
        match entry.split_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (entry, None),
        }
    };

    if host.is_empty() {
        return Err(ParseError::InvalidHost {
            entry: entry.to_string(),
            reason: "missing hostname",
        });
    }

    let port = port
        .map(|port| {
            port.parse::<u16>()
                .ok()
                .filter(|port| *port != 0)
                .ok_or_else(|| ParseError::InvalidPort {
                    host: host.to_string(),
                    port: port.to_string(),
                })
        })
        .transpose()?;

    Ok(HostEntry::new(host, port))
}

fn decode(text: &str) -> Option<String> {
    percent_decode_str(text)
        .decode_utf8()
        .ok()
        .map(|decoded| decoded.into_owned())
}
