//! Logreaper Sweep
//!
//! Background retention service for log directory trees: enumerates
//! `*.log` files under a configured root, deletes the stale ones, and
//! evicts oldest-accessed files first when the volume runs low on space.
//!
//! # Overview
//!
//! The sweeper applies two independent retention policies on every cycle:
//!
//! - **Age policy**: files whose last-write time is older than
//!   `now - retention_days` are deleted.
//! - **Emergency low-disk policy**: when free space on the volume holding
//!   the root drops below the configured threshold, files are deleted in
//!   ascending last-access order regardless of age. The threshold is
//!   re-checked per candidate, so eviction stops as soon as enough space
//!   has been reclaimed.
//!
//! Per-file failures (locked, permission denied, vanished) are logged and
//! never abort the sweep. A missing root directory makes the cycle a
//! silent no-op.
//!
//! # Usage
//!
//! ## One-time Sweep
//!
//! ```no_run
//! use logreaper_domain::{ConfigSnapshot, EventSink, Severity};
//! use logreaper_sweep::{RetentionSweeper, VolumeProbe};
//!
//! struct StderrSink;
//! impl EventSink for StderrSink {
//!     fn append(&self, severity: Severity, message: &str) {
//!         eprintln!("[{}] {}", severity.as_str(), message);
//!     }
//! }
//!
//! let snapshot = ConfigSnapshot::default();
//! let mut sweeper = RetentionSweeper::new(false);
//! let metrics = sweeper.sweep(&snapshot, &VolumeProbe::new(), &StderrSink);
//! println!("{}", metrics.summary());
//! ```
//!
//! ## Background Worker
//!
//! ```no_run
//! use logreaper_domain::{ConfigSource, EventSink, Severity};
//! use logreaper_sweep::{SweepWorker, VolumeProbe};
//!
//! # struct NullSource;
//! # impl ConfigSource for NullSource {
//! #     fn get(&self, _key: &str) -> Option<String> { None }
//! # }
//! # struct StderrSink;
//! # impl EventSink for StderrSink {
//! #     fn append(&self, severity: Severity, message: &str) {
//! #         eprintln!("[{}] {}", severity.as_str(), message);
//! #     }
//! # }
//! #[tokio::main]
//! async fn main() {
//!     let mut worker = SweepWorker::new(false);
//!     // Runs until Ctrl+C; re-reads configuration every cycle.
//!     worker.run(&NullSource, &VolumeProbe::new(), &StderrSink).await;
//! }
//! ```

#![warn(missing_docs)]

mod metrics;
mod probe;
mod sweeper;
mod worker;

pub use metrics::SweepMetrics;
pub use probe::VolumeProbe;
pub use sweeper::RetentionSweeper;
pub use worker::SweepWorker;
