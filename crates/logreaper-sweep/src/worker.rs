//! Background worker driving the sweeper on a timed schedule

use crate::{RetentionSweeper, SweepMetrics};
use logreaper_domain::snapshot::read_interval_minutes;
use logreaper_domain::{ConfigSnapshot, ConfigSource, EventSink, Severity, SpaceProbe};
use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// Scheduler running sweep cycles on a configurable period
///
/// The interval is itself a configuration value and is re-read on every
/// tick: when it changes, the trigger is re-armed with the new period
/// (initial delay and repeat period both reset). The full configuration
/// snapshot is rebuilt fresh for every sweep, so any tunable can change
/// between cycles without a restart.
///
/// Sweeps never overlap: each one runs to completion on the worker task
/// before the next tick is awaited, and ticks that fall due while a sweep
/// is still running are skipped rather than queued.
pub struct SweepWorker {
    sweeper: RetentionSweeper,
    /// Interval currently armed, in minutes
    interval_minutes: u64,
}

impl SweepWorker {
    /// Create a new worker; `dry_run` is passed through to the sweeper
    pub fn new(dry_run: bool) -> Self {
        Self {
            sweeper: RetentionSweeper::new(dry_run),
            interval_minutes: 0,
        }
    }

    /// Get a reference to the sweeper's cumulative metrics
    pub fn metrics(&self) -> &SweepMetrics {
        self.sweeper.metrics()
    }

    /// Interval currently armed, in minutes; zero until the worker starts
    pub fn armed_interval_minutes(&self) -> u64 {
        self.interval_minutes
    }

    /// Run the worker until Ctrl+C
    ///
    /// Appends an Info entry to the event sink on start and on stop. An
    /// in-flight sweep runs to completion; only the next tick is
    /// cancelled.
    pub async fn run<C, P, E>(&mut self, source: &C, probe: &P, sink: &E)
    where
        C: ConfigSource,
        P: SpaceProbe,
        E: EventSink,
    {
        let mut ticker = self.arm(source);
        sink.append(Severity::Info, "log sweep service started");
        tracing::info!(
            interval_minutes = self.interval_minutes,
            "sweep worker started"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Some(rearmed) = self.rearm_if_changed(source) {
                        ticker = rearmed;
                    }
                    self.run_cycle(source, probe, sink);
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("shutdown signal received, stopping sweep worker");
                    break;
                }
            }
        }

        sink.append(Severity::Info, "log sweep service stopped");
        tracing::info!("sweep worker stopped. {}", self.sweeper.metrics().summary());
    }

    /// Run a fixed number of cycles then return (useful for testing)
    pub async fn run_cycles<C, P, E>(&mut self, source: &C, probe: &P, sink: &E, cycles: usize)
    where
        C: ConfigSource,
        P: SpaceProbe,
        E: EventSink,
    {
        let mut ticker = self.arm(source);
        sink.append(Severity::Info, "log sweep service started");

        for cycle in 0..cycles {
            ticker.tick().await;
            tracing::debug!(cycle = cycle + 1, cycles, "scheduled sweep cycle");
            if let Some(rearmed) = self.rearm_if_changed(source) {
                ticker = rearmed;
            }
            self.run_cycle(source, probe, sink);
        }

        sink.append(Severity::Info, "log sweep service stopped");
    }

    /// Resolve the initial interval from configuration and arm the ticker
    fn arm<C: ConfigSource>(&mut self, source: &C) -> Interval {
        self.interval_minutes = read_interval_minutes(source);
        new_ticker(self.interval_minutes)
    }

    /// Re-read the interval key; a changed value re-arms the trigger with
    /// both initial delay and period set to the new value
    fn rearm_if_changed<C: ConfigSource>(&mut self, source: &C) -> Option<Interval> {
        let fresh = read_interval_minutes(source);
        if fresh == self.interval_minutes {
            return None;
        }
        tracing::info!(
            from_minutes = self.interval_minutes,
            to_minutes = fresh,
            "sweep interval changed, re-arming trigger"
        );
        self.interval_minutes = fresh;
        Some(new_ticker(fresh))
    }

    /// Build a fresh snapshot and run one sweep
    fn run_cycle<C, P, E>(&mut self, source: &C, probe: &P, sink: &E)
    where
        C: ConfigSource,
        P: SpaceProbe,
        E: EventSink,
    {
        let snapshot = ConfigSnapshot::from_source(source);
        if !snapshot.defaulted_keys().is_empty() {
            tracing::debug!(
                keys = ?snapshot.defaulted_keys(),
                "configuration keys fell back to built-in defaults"
            );
        }

        let metrics = self.sweeper.sweep(&snapshot, probe, sink);
        tracing::info!(
            deleted = metrics.deleted,
            not_eligible = metrics.skipped_not_eligible,
            vanished = metrics.skipped_vanished,
            would_delete = metrics.would_delete,
            failed = metrics.failed,
            "sweep cycle completed"
        );
    }
}

/// Periodic trigger with the first tick one full period out
///
/// Skipping (not bursting) missed ticks is the overlap guard: a sweep
/// outlasting the period delays the schedule instead of stacking cycles.
fn new_ticker(interval_minutes: u64) -> Interval {
    let period = Duration::from_secs(interval_minutes * 60);
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}

#[cfg(test)]
mod tests {
    use super::*;
    use logreaper_domain::snapshot::keys;
    use std::collections::HashMap;
    use std::path::Path;
    use std::sync::Mutex;

    /// Mutable config source so tests can change values between ticks
    struct SharedSource {
        values: Mutex<HashMap<String, String>>,
    }

    impl SharedSource {
        fn new(pairs: &[(&str, &str)]) -> Self {
            Self {
                values: Mutex::new(
                    pairs
                        .iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect(),
                ),
            }
        }

        fn set(&self, key: &str, value: &str) {
            self.values
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
        }
    }

    impl ConfigSource for SharedSource {
        fn get(&self, key: &str) -> Option<String> {
            self.values.lock().unwrap().get(key).cloned()
        }
    }

    struct RecordingSink {
        entries: Mutex<Vec<(Severity, String)>>,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self {
                entries: Mutex::new(Vec::new()),
            }
        }

        fn entries(&self) -> Vec<(Severity, String)> {
            self.entries.lock().unwrap().clone()
        }
    }

    impl EventSink for RecordingSink {
        fn append(&self, severity: Severity, message: &str) {
            self.entries
                .lock()
                .unwrap()
                .push((severity, message.to_string()));
        }
    }

    struct FixedProbe(Option<u64>);

    impl SpaceProbe for FixedProbe {
        fn free_space_mb(&self, _path: &Path) -> Option<u64> {
            self.0
        }
    }

    fn source_with_root(root: &Path) -> SharedSource {
        SharedSource::new(&[
            (keys::ROOT_LOG_SEARCH_DIRECTORY, root.to_str().unwrap()),
            (keys::CHECK_INTERVAL_MINUTES, "1"),
        ])
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_cycles_sweeps_each_tick() {
        let dir = tempfile::TempDir::new().unwrap();
        let source = source_with_root(dir.path());
        let sink = RecordingSink::new();
        let mut worker = SweepWorker::new(false);

        worker
            .run_cycles(&source, &FixedProbe(Some(50_000)), &sink, 3)
            .await;

        assert_eq!(worker.metrics().sweep_count, 3);
        assert_eq!(worker.armed_interval_minutes(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_and_stop_entries() {
        let dir = tempfile::TempDir::new().unwrap();
        let source = source_with_root(dir.path());
        let sink = RecordingSink::new();
        let mut worker = SweepWorker::new(false);

        worker
            .run_cycles(&source, &FixedProbe(Some(50_000)), &sink, 1)
            .await;

        let entries = sink.entries();
        assert_eq!(entries.first().unwrap().0, Severity::Info);
        assert!(entries.first().unwrap().1.contains("started"));
        assert_eq!(entries.last().unwrap().0, Severity::Info);
        assert!(entries.last().unwrap().1.contains("stopped"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_change_rearms_trigger() {
        let dir = tempfile::TempDir::new().unwrap();
        let source = source_with_root(dir.path());
        let sink = RecordingSink::new();
        let mut worker = SweepWorker::new(false);

        worker
            .run_cycles(&source, &FixedProbe(Some(50_000)), &sink, 1)
            .await;
        assert_eq!(worker.armed_interval_minutes(), 1);

        // Live edit between runs: next tick picks up the new period.
        source.set(keys::CHECK_INTERVAL_MINUTES, "5");
        worker
            .run_cycles(&source, &FixedProbe(Some(50_000)), &sink, 1)
            .await;
        assert_eq!(worker.armed_interval_minutes(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_huge_interval_arms_default_instead_of_panicking() {
        let dir = tempfile::TempDir::new().unwrap();
        // Parses as an integer but would overflow the armed deadline;
        // must default, not crash the worker at arm time.
        let source = SharedSource::new(&[
            (keys::ROOT_LOG_SEARCH_DIRECTORY, dir.path().to_str().unwrap()),
            (keys::CHECK_INTERVAL_MINUTES, "100000000000"),
        ]);
        let sink = RecordingSink::new();
        let mut worker = SweepWorker::new(false);

        worker
            .run_cycles(&source, &FixedProbe(Some(50_000)), &sink, 1)
            .await;
        assert_eq!(worker.armed_interval_minutes(), 15);
        assert_eq!(worker.metrics().sweep_count, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unreadable_interval_falls_back_to_default() {
        let dir = tempfile::TempDir::new().unwrap();
        let source = SharedSource::new(&[
            (keys::ROOT_LOG_SEARCH_DIRECTORY, dir.path().to_str().unwrap()),
            (keys::CHECK_INTERVAL_MINUTES, "every-so-often"),
        ]);
        let sink = RecordingSink::new();
        let mut worker = SweepWorker::new(false);

        worker
            .run_cycles(&source, &FixedProbe(Some(50_000)), &sink, 1)
            .await;
        assert_eq!(worker.armed_interval_minutes(), 15);
    }
}
