//! Metrics collection for sweep cycles

use logreaper_domain::DeletionOutcome;

/// Counters collected across sweep cycles
///
/// Tracks per-outcome candidate counts plus cycle totals. Process-local,
/// used for the per-cycle summary log line; nothing is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepMetrics {
    /// Files deleted
    pub deleted: usize,

    /// Files evaluated and left alone (no policy matched)
    pub skipped_not_eligible: usize,

    /// Files that vanished between enumeration and evaluation
    pub skipped_vanished: usize,

    /// Files that were eligible while dry-run mode withheld deletion
    pub would_delete: usize,

    /// Deletion attempts that failed
    pub failed: usize,

    /// Total sweep cycles completed
    pub sweep_count: usize,

    /// Total sweep runtime in seconds
    pub total_runtime_secs: u64,
}

impl SweepMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one candidate evaluation
    pub fn record_outcome(&mut self, outcome: DeletionOutcome) {
        match outcome {
            DeletionOutcome::Deleted => self.deleted += 1,
            DeletionOutcome::SkippedNotEligible => self.skipped_not_eligible += 1,
            DeletionOutcome::SkippedVanished => self.skipped_vanished += 1,
            DeletionOutcome::WouldDelete => self.would_delete += 1,
            DeletionOutcome::Failed => self.failed += 1,
        }
    }

    /// Record a sweep cycle completion
    pub fn record_sweep(&mut self) {
        self.sweep_count += 1;
    }

    /// Total candidates evaluated across all outcomes
    pub fn total_evaluated(&self) -> usize {
        self.deleted
            + self.skipped_not_eligible
            + self.skipped_vanished
            + self.would_delete
            + self.failed
    }

    /// Reset all counters
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        [
            "Sweep Metrics Summary".to_string(),
            "=====================".to_string(),
            format!("Sweep cycles: {}", self.sweep_count),
            format!("Total runtime: {}s", self.total_runtime_secs),
            format!("Candidates evaluated: {}", self.total_evaluated()),
            format!("  Deleted: {}", self.deleted),
            format!("  Not eligible: {}", self.skipped_not_eligible),
            format!("  Vanished: {}", self.skipped_vanished),
            format!("  Would delete (dry run): {}", self.would_delete),
            format!("  Failed: {}", self.failed),
        ]
        .join("\n")
    }
}
