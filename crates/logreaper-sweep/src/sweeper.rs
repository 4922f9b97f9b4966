//! Core retention sweep implementation

use crate::SweepMetrics;
use logreaper_domain::{ConfigSnapshot, DeletionOutcome, EventSink, Severity, SpaceProbe};
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use walkdir::WalkDir;

/// File-name suffix identifying log files
const LOG_SUFFIX: &str = ".log";

/// A log file discovered during enumeration, with the access time used to
/// order eviction. Write time is re-read at decision time, not here.
struct Candidate {
    path: PathBuf,
    accessed: SystemTime,
}

/// Sweeper applying the two retention policies to one directory tree
///
/// Responsible for:
/// - Enumerating `*.log` files recursively under the configured root
/// - Deleting files past the age cutoff
/// - Evicting oldest-accessed files first while the volume is low on space
/// - Absorbing per-file failures so a sweep always runs to completion
///
/// `sweep` never returns an error: a missing root is a silent no-op and
/// every per-file failure is logged to the event sink and skipped.
pub struct RetentionSweeper {
    dry_run: bool,
    metrics: SweepMetrics,
}

impl RetentionSweeper {
    /// Create a new sweeper; in dry-run mode deletions are logged but not
    /// performed
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            metrics: SweepMetrics::new(),
        }
    }

    /// Get a reference to the cumulative metrics
    pub fn metrics(&self) -> &SweepMetrics {
        &self.metrics
    }

    /// Reset metrics counters
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Perform one complete sweep cycle
    ///
    /// 1. Missing root: return immediately with no log output.
    /// 2. Enumerate every `*.log` file under the root, recursively.
    /// 3. Order candidates by ascending last-access time, so the low-disk
    ///    path evicts oldest-accessed first.
    /// 4. Evaluate each candidate against both policies and delete when
    ///    eligible, re-checking free space per candidate.
    ///
    /// Returns the updated cumulative metrics.
    pub fn sweep<P, E>(&mut self, snapshot: &ConfigSnapshot, probe: &P, sink: &E) -> SweepMetrics
    where
        P: SpaceProbe,
        E: EventSink,
    {
        let start = SystemTime::now();

        if !snapshot.root_directory.is_dir() {
            // Not an error condition: the tree may simply not exist yet.
            tracing::debug!(
                root = %snapshot.root_directory.display(),
                "root directory missing, skipping sweep"
            );
            return self.metrics.clone();
        }

        let now = SystemTime::now();
        // A retention window reaching past the epoch means no file can be
        // age-stale.
        let cutoff = now.checked_sub(snapshot.retention()).unwrap_or(UNIX_EPOCH);

        let mut candidates = collect_candidates(snapshot);
        candidates.sort_by_key(|candidate| candidate.accessed);

        tracing::debug!(
            root = %snapshot.root_directory.display(),
            candidates = candidates.len(),
            "sweep cycle started"
        );

        for candidate in &candidates {
            let outcome = self.evaluate(candidate, cutoff, snapshot, probe, sink);
            self.metrics.record_outcome(outcome);
        }

        self.metrics.record_sweep();
        if let Ok(elapsed) = start.elapsed() {
            self.metrics.total_runtime_secs += elapsed.as_secs();
        }

        self.metrics.clone()
    }

    /// Evaluate one candidate and attempt deletion when a policy matches
    fn evaluate<P, E>(
        &self,
        candidate: &Candidate,
        cutoff: SystemTime,
        snapshot: &ConfigSnapshot,
        probe: &P,
        sink: &E,
    ) -> DeletionOutcome
    where
        P: SpaceProbe,
        E: EventSink,
    {
        // Enumeration and evaluation are not atomic; a file that vanished
        // in between is not eligible and not an error.
        let metadata = match fs::metadata(&candidate.path) {
            Ok(metadata) => metadata,
            Err(_) => return DeletionOutcome::SkippedVanished,
        };

        // An unreadable write time counts as written now, keeping the
        // file out of the age policy.
        let modified = metadata.modified().unwrap_or_else(|_| SystemTime::now());

        // Age policy first; the probe is only consulted when age alone
        // does not decide, and a fresh query per candidate lets eviction
        // stop once earlier deletions have relieved the pressure.
        let eligible = modified < cutoff || self.low_disk_crossed(snapshot, probe);
        if !eligible {
            return DeletionOutcome::SkippedNotEligible;
        }

        if self.dry_run {
            tracing::info!(
                path = %candidate.path.display(),
                "dry run: would delete log file"
            );
            return DeletionOutcome::WouldDelete;
        }

        match fs::remove_file(&candidate.path) {
            Ok(()) => {
                tracing::debug!(path = %candidate.path.display(), "deleted log file");
                DeletionOutcome::Deleted
            }
            Err(e) => {
                // Locked or permission-denied files are left alone; one
                // undeletable file never aborts the sweep.
                sink.append(
                    Severity::Error,
                    &format!("error deleting log file {}: {}", candidate.path.display(), e),
                );
                DeletionOutcome::Failed
            }
        }
    }

    /// Whether the emergency low-disk policy is currently active
    ///
    /// Fails closed: an unresolvable volume reads as "not crossed", so a
    /// misconfigured root degrades to age-only retention.
    fn low_disk_crossed<P: SpaceProbe>(&self, snapshot: &ConfigSnapshot, probe: &P) -> bool {
        probe
            .free_space_mb(&snapshot.root_directory)
            .map(|free_mb| free_mb < snapshot.low_disk_threshold_mb)
            .unwrap_or(false)
    }
}

/// Enumerate `*.log` files under the root, recursively
fn collect_candidates(snapshot: &ConfigSnapshot) -> Vec<Candidate> {
    WalkDir::new(&snapshot.root_directory)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry.file_name().to_string_lossy().ends_with(LOG_SUFFIX)
        })
        .filter_map(|entry| {
            let metadata = entry.metadata().ok()?;
            // Access time orders eviction; fall back to write time where
            // the filesystem does not track access.
            let accessed = metadata
                .accessed()
                .or_else(|_| metadata.modified())
                .unwrap_or(UNIX_EPOCH);
            Some(Candidate {
                path: entry.into_path(),
                accessed,
            })
        })
        .collect()
}
