//! Connection string parsing and resolution.
//!
//! [`parse`] turns a connection string into a [`ConnectionSpec`] without
//! touching the network. [`SpecResolver`] expands it into the endpoint lists
//! each bootstrap strategy contacts, using DNS SRV discovery when the
//! connection string names a single host without a port.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod error;
mod resolve;
mod spec;

pub use error::{ParseError, ResolveError};
pub use resolve::{
    DEFAULT_HTTP_PORT, DEFAULT_MEMD_PORT, DEFAULT_SSL_HTTP_PORT, DEFAULT_SSL_MEMD_PORT,
    ResolvedConnectionSpec, SpecResolver,
};
pub use spec::{ConnectionSpec, Credentials, HostEntry, Scheme, parse};
