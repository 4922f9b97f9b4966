//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the retention logic and
//! infrastructure. Implementations live in other crates (and in test code
//! as simple in-memory doubles).

use crate::outcome::Severity;
use std::path::Path;

/// Trait for the external configuration store
///
/// A flat key-to-string mapping read by key name. The store is re-read on
/// every access so that edits take effect on the next sweep cycle without
/// a restart. A missing or unreadable key is `None`; callers substitute
/// built-in defaults, never fail.
pub trait ConfigSource {
    /// Read the raw string value for a key, if present and readable
    fn get(&self, key: &str) -> Option<String>;
}

/// Trait for the diagnostic event log
///
/// An append-only sink for human-readable status and error messages.
/// Appending must never fail visibly; a sink that cannot write simply
/// drops the entry.
pub trait EventSink {
    /// Append one entry at the given severity
    fn append(&self, severity: Severity, message: &str);
}

/// Trait for querying free space on the volume containing a path
///
/// Implemented by the infrastructure layer against OS volume enumeration.
pub trait SpaceProbe {
    /// Free space in whole megabytes on the volume containing `path`
    ///
    /// Returns `None` when no mounted volume can be matched to the path.
    /// Callers must fail closed on `None`: treat the low-disk threshold as
    /// not crossed rather than propagate an error.
    fn free_space_mb(&self, path: &Path) -> Option<u64>;
}
