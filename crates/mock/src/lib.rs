//! Mock implementations of the doctor's network seams for testing purposes.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod config;
mod dns;
mod service;

pub use config::{MockConfigSource, NodeSpec, terse_topology};
pub use dns::MockDnsResolver;
pub use service::MockServiceCheck;
