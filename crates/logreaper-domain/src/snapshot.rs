//! Configuration snapshot for one sweep cycle
//!
//! The four tunables are re-read from the external configuration store at
//! the top of every cycle. Each field falls back to its built-in default
//! independently when the corresponding key is absent or unparseable, so
//! a partially defaulted snapshot is normal, not an error.

use crate::traits::ConfigSource;
use std::path::PathBuf;
use std::time::Duration;

/// Recognized configuration keys
pub mod keys {
    /// Root of the directory tree searched for log files
    pub const ROOT_LOG_SEARCH_DIRECTORY: &str = "RootLogSearchDirectory";
    /// Days since last write before a log file is considered stale
    pub const DAYS_TO_KEEP: &str = "DaysToKeep";
    /// Minutes between sweep cycles
    pub const CHECK_INTERVAL_MINUTES: &str = "CheckIntervalMinutes";
    /// Free-space floor in megabytes before emergency eviction starts
    pub const LOW_DISK_THRESHOLD_MB: &str = "LowDiskThresholdMB";
}

/// Default retention window in days
pub const DEFAULT_RETENTION_DAYS: u64 = 7;

/// Default sweep interval in minutes
pub const DEFAULT_CHECK_INTERVAL_MINUTES: u64 = 15;

/// Default low-disk threshold in megabytes
pub const DEFAULT_LOW_DISK_THRESHOLD_MB: u64 = 1000;

/// Default root directory searched for log files
///
/// The system-drive IIS log location on Windows, its conventional
/// equivalent elsewhere.
pub fn default_root_directory() -> PathBuf {
    #[cfg(windows)]
    {
        let drive = std::env::var("SystemDrive").unwrap_or_else(|_| "C:".to_string());
        PathBuf::from(format!("{drive}\\inetpub\\logs"))
    }
    #[cfg(not(windows))]
    {
        PathBuf::from("/var/log/inetpub")
    }
}

/// Immutable bundle of the four tunable parameters for one sweep cycle
///
/// Built fresh each cycle via [`ConfigSnapshot::from_source`], owned by
/// the cycle that created it, and discarded at cycle end. Never shared
/// across cycles and never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSnapshot {
    /// Root of the directory tree searched for log files
    pub root_directory: PathBuf,

    /// Files untouched (by write) for this many days are stale
    pub retention_days: u64,

    /// Minutes between sweep cycles; always positive
    pub check_interval_minutes: u64,

    /// Emergency eviction starts when volume free space drops strictly
    /// below this many megabytes
    pub low_disk_threshold_mb: u64,

    /// Keys that fell back to their built-in default during construction
    defaulted: Vec<&'static str>,
}

impl ConfigSnapshot {
    /// Build a snapshot by reading all four keys from the source
    ///
    /// Each field defaults independently: a malformed `DaysToKeep` does
    /// not disturb a valid `CheckIntervalMinutes` read in the same cycle.
    /// Environment-variable references in the root directory value
    /// (`%NAME%`, `${NAME}`, `$NAME`) are expanded.
    pub fn from_source<S: ConfigSource + ?Sized>(source: &S) -> Self {
        let mut defaulted = Vec::new();

        let root_directory = match source.get(keys::ROOT_LOG_SEARCH_DIRECTORY) {
            Some(raw) if !raw.trim().is_empty() => PathBuf::from(expand_env_vars(&raw)),
            _ => {
                defaulted.push(keys::ROOT_LOG_SEARCH_DIRECTORY);
                default_root_directory()
            }
        };

        let retention_days = match read_u64(source, keys::DAYS_TO_KEEP) {
            Some(days) => days,
            None => {
                defaulted.push(keys::DAYS_TO_KEEP);
                DEFAULT_RETENTION_DAYS
            }
        };

        // The interval must be positive: a zero-period trigger is treated
        // the same as an unparseable value.
        let check_interval_minutes = match read_u64(source, keys::CHECK_INTERVAL_MINUTES) {
            Some(minutes) if minutes > 0 => minutes,
            _ => {
                defaulted.push(keys::CHECK_INTERVAL_MINUTES);
                DEFAULT_CHECK_INTERVAL_MINUTES
            }
        };

        let low_disk_threshold_mb = match read_u64(source, keys::LOW_DISK_THRESHOLD_MB) {
            Some(mb) => mb,
            None => {
                defaulted.push(keys::LOW_DISK_THRESHOLD_MB);
                DEFAULT_LOW_DISK_THRESHOLD_MB
            }
        };

        Self {
            root_directory,
            retention_days,
            check_interval_minutes,
            low_disk_threshold_mb,
            defaulted,
        }
    }

    /// Keys that fell back to their built-in default during construction
    ///
    /// Empty when every field was read live. Exists so fallback is
    /// inspectable and loggable instead of silently absorbed.
    pub fn defaulted_keys(&self) -> &[&'static str] {
        &self.defaulted
    }

    /// Get the sweep interval as a Duration
    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_minutes * 60)
    }

    /// Get the retention window as a Duration
    pub fn retention(&self) -> Duration {
        Duration::from_secs(self.retention_days * 86400)
    }
}

impl Default for ConfigSnapshot {
    /// Snapshot with every field at its built-in default
    fn default() -> Self {
        Self {
            root_directory: default_root_directory(),
            retention_days: DEFAULT_RETENTION_DAYS,
            check_interval_minutes: DEFAULT_CHECK_INTERVAL_MINUTES,
            low_disk_threshold_mb: DEFAULT_LOW_DISK_THRESHOLD_MB,
            defaulted: Vec::new(),
        }
    }
}

/// Read the sweep interval alone, defaulted on any failure
///
/// The scheduler re-reads only this key on every tick to decide whether
/// its trigger needs re-arming, before building the full snapshot.
pub fn read_interval_minutes<S: ConfigSource + ?Sized>(source: &S) -> u64 {
    match read_u64(source, keys::CHECK_INTERVAL_MINUTES) {
        Some(minutes) if minutes > 0 => minutes,
        _ => DEFAULT_CHECK_INTERVAL_MINUTES,
    }
}

/// Largest accepted value for any integer key
///
/// Caps the 32-bit range so the days-to-seconds and minutes-to-seconds
/// conversions can never overflow, and an armed timer period stays
/// addable to the current instant. Anything larger counts as
/// unparseable and the field defaults.
const MAX_CONFIG_VALUE: u64 = i32::MAX as u64;

fn read_u64<S: ConfigSource + ?Sized>(source: &S, key: &str) -> Option<u64> {
    let value: u64 = source.get(key)?.trim().parse().ok()?;
    if value > MAX_CONFIG_VALUE {
        return None;
    }
    Some(value)
}

/// Expand environment-variable references in a configuration value
///
/// Supports `%NAME%` (kept literal when the variable is unset, matching
/// Windows expansion), and `${NAME}` / `$NAME` (expanded to empty when
/// unset, matching shell expansion). Anything else passes through
/// unchanged.
pub fn expand_env_vars(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::with_capacity(raw.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '%' => {
                let rest = &chars[i + 1..];
                match rest.iter().position(|&c| c == '%') {
                    Some(end) if end > 0 => {
                        let name: String = rest[..end].iter().collect();
                        match std::env::var(&name) {
                            Ok(value) => {
                                out.push_str(&value);
                                i += end + 2;
                            }
                            Err(_) => {
                                // Unset: keep the %NAME% text literal
                                out.push('%');
                                i += 1;
                            }
                        }
                    }
                    _ => {
                        out.push('%');
                        i += 1;
                    }
                }
            }
            '$' if i + 1 < chars.len() && chars[i + 1] == '{' => {
                let rest = &chars[i + 2..];
                match rest.iter().position(|&c| c == '}') {
                    Some(end) => {
                        let name: String = rest[..end].iter().collect();
                        if let Ok(value) = std::env::var(&name) {
                            out.push_str(&value);
                        }
                        i += end + 3;
                    }
                    None => {
                        out.push('$');
                        i += 1;
                    }
                }
            }
            '$' => {
                let start = i + 1;
                let mut end = start;
                while end < chars.len() && (chars[end].is_ascii_alphanumeric() || chars[end] == '_')
                {
                    end += 1;
                }
                if end > start {
                    let name: String = chars[start..end].iter().collect();
                    if let Ok(value) = std::env::var(&name) {
                        out.push_str(&value);
                    }
                    i = end;
                } else {
                    out.push('$');
                    i += 1;
                }
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}
