//! Cluster topology types for the connectivity doctor
//!
//! This crate provides:
//! - Network endpoints (`Endpoint`)
//! - The terse bucket configuration served by each node (`BucketTopology`)
//! - The canonical node list derived from it (`ClusterNode`)
//! - The services a node can advertise (`Service`)
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod endpoint;
pub mod error;
pub mod node;
pub mod service;
pub mod terse;

pub use endpoint::Endpoint;
pub use error::{Error, Result};
pub use node::ClusterNode;
pub use service::Service;
pub use terse::{BucketTopology, HOST_PLACEHOLDER, NodeExt};
