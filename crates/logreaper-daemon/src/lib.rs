//! Logreaper daemon library.
//!
//! Wires the sweep worker to its concrete collaborators: a flat-TOML
//! configuration file re-read every cycle, a tracing-backed event sink,
//! and the OS volume probe.

pub mod cli;
pub mod config;
pub mod error;
pub mod sink;

pub use cli::Cli;
pub use config::FileSource;
pub use error::{DaemonError, Result};
pub use sink::TracingSink;
