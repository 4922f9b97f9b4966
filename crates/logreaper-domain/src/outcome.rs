//! Outcome module - per-file sweep results and event severities

/// Severity of an entry appended to the diagnostic event sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Informational status (service started, service stopped)
    Info,

    /// A recoverable failure worth surfacing (deletion failure with path)
    Error,
}

impl Severity {
    /// Get the severity name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Error => "error",
        }
    }
}

/// Result of evaluating one candidate file during a sweep cycle
///
/// Used for logging and cycle metrics only; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeletionOutcome {
    /// The file was eligible and was deleted
    Deleted,

    /// The file satisfied no active retention policy and was left alone
    SkippedNotEligible,

    /// The file vanished between enumeration and evaluation
    SkippedVanished,

    /// The file was eligible but dry-run mode withheld the deletion
    WouldDelete,

    /// Deletion was attempted and failed (locked, permission, I/O)
    Failed,
}

impl DeletionOutcome {
    /// Get the outcome name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DeletionOutcome::Deleted => "deleted",
            DeletionOutcome::SkippedNotEligible => "skipped_not_eligible",
            DeletionOutcome::SkippedVanished => "skipped_vanished",
            DeletionOutcome::WouldDelete => "would_delete",
            DeletionOutcome::Failed => "failed",
        }
    }
}
