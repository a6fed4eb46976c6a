//! Bootstrap strategy engine.
//!
//! A client obtains its first cluster configuration by trying, in order,
//! CCCP, terse HTTP and full HTTP. [`BootstrapEngine`] walks the same order
//! against a resolved connection string, reporting what each strategy does,
//! and stops at the first strategy that yields cluster nodes.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod engine;
mod error;
mod source;
mod strategy;

pub use engine::{Attempt, Bootstrap, BootstrapEngine};
pub use error::{ConfigMismatchError, Error, FetchError, Result};
pub use source::{
    ConfigSource, DEFAULT_FETCH_TIMEOUT, HttpConfigSource, HttpConfigSourceOptions,
    terse_config_path,
};
pub use strategy::{
    BootstrapStrategy, CccpStrategy, FullHttpStrategy, Outcome, StrategyKind, TerseHttpStrategy,
};
