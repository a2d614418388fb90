//! Turns one raw delimited table into a model-ready one.
//!
//! The run is a single forward pass driven by [`config::Config`]:
//! read the raw table, check the configured columns are present, coerce the
//! dirty numeric columns, binary-encode the target label, write the result.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod process;
pub mod table;

pub use config::{Config, DEFAULT_CONFIG_PATH};
pub use error::{ErrorKind, PrepError, Result};
pub use pipeline::{run, RunSummary};
