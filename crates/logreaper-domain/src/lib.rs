//! Logreaper Domain Layer
//!
//! This crate contains the core types and trait boundaries for logreaper,
//! a background service that sweeps a log directory tree and deletes stale
//! or excess log files before they exhaust the disk.
//!
//! ## Key Concepts
//!
//! - **ConfigSnapshot**: The four tunable parameters for one sweep cycle,
//!   built fresh each cycle with per-field defaulting
//! - **DeletionOutcome**: The per-file result of one sweep decision
//! - **Severity**: Level of an entry appended to the diagnostic event sink
//!
//! ## Architecture
//!
//! This crate has no external dependencies: pure types and logic only.
//! The collaborators the service depends on (configuration store,
//! diagnostic event log, volume free-space query) are trait definitions
//! here; infrastructure implementations live in other crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod outcome;
pub mod snapshot;
pub mod traits;

// Re-exports for convenience
pub use outcome::{DeletionOutcome, Severity};
pub use snapshot::ConfigSnapshot;
pub use traits::{ConfigSource, EventSink, SpaceProbe};
