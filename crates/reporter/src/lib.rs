//! Event sink for diagnostic runs.
//!
//! Every diagnostic stage reports what it finds as info, warning or error
//! events. The sink keeps them so the run can end with a summary.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod console;
mod event;
mod reporter;
mod summary;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use console::ConsoleReporter;
pub use event::{Event, Level};
pub use reporter::{Reporter, ReporterExt};
pub use summary::Summary;
