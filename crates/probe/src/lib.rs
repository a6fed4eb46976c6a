//! Per-service reachability probing.
//!
//! [`ServiceProber`] walks the canonical node list and checks each advertised
//! HTTP service through a [`ServiceCheck`]. The key-value service is listed
//! but not tested.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod check;
mod error;
mod prober;

pub use check::{HttpServiceCheck, ProbeOptions, ServiceCheck};
pub use error::ProbeError;
pub use prober::{ProbeOutcome, ProbeResult, ServiceProber};
