//! File-backed configuration source.
//!
//! The configuration lives as a flat TOML table of the four recognized
//! keys. The file is re-read and re-parsed on every key access, which is
//! what makes live reconfiguration work: the worker reads keys afresh
//! each cycle and simply sees the edited file. An unreadable or
//! unparseable file makes every key read as absent, so the snapshot falls
//! back to built-in defaults rather than failing.

use crate::error::{DaemonError, Result};
use logreaper_domain::ConfigSource;
use std::fs;
use std::path::PathBuf;

/// [`ConfigSource`] over a flat TOML file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source reading from the given file path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default configuration file location: `~/.logreaper/config.toml`.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| DaemonError::Config("Could not find home directory".into()))?;
        Ok(home.join(".logreaper").join("config.toml"))
    }

    /// The file path this source reads from.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl ConfigSource for FileSource {
    fn get(&self, key: &str) -> Option<String> {
        let contents = fs::read_to_string(&self.path).ok()?;
        let table: toml::Table = contents.parse().ok()?;
        match table.get(key)? {
            toml::Value::String(s) => Some(s.clone()),
            // Integers are accepted as-written (DaysToKeep = 7); anything
            // else is rendered back to text and left to field parsing.
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logreaper_domain::snapshot::keys;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_reads_string_and_integer_values() {
        let file = write_config(
            r#"
RootLogSearchDirectory = "/srv/logs"
DaysToKeep = 30
CheckIntervalMinutes = "5"
"#,
        );
        let source = FileSource::new(file.path().to_path_buf());

        assert_eq!(
            source.get(keys::ROOT_LOG_SEARCH_DIRECTORY).as_deref(),
            Some("/srv/logs")
        );
        assert_eq!(source.get(keys::DAYS_TO_KEEP).as_deref(), Some("30"));
        assert_eq!(
            source.get(keys::CHECK_INTERVAL_MINUTES).as_deref(),
            Some("5")
        );
        assert_eq!(source.get(keys::LOW_DISK_THRESHOLD_MB), None);
    }

    #[test]
    fn test_missing_file_reads_as_absent() {
        let source = FileSource::new(PathBuf::from("/nonexistent/logreaper.toml"));
        assert_eq!(source.get(keys::DAYS_TO_KEEP), None);
    }

    #[test]
    fn test_unparseable_file_reads_as_absent() {
        let file = write_config("DaysToKeep = = 7 not toml");
        let source = FileSource::new(file.path().to_path_buf());
        assert_eq!(source.get(keys::DAYS_TO_KEEP), None);
    }

    #[test]
    fn test_live_edit_visible_on_next_read() {
        let file = write_config("DaysToKeep = 7\n");
        let source = FileSource::new(file.path().to_path_buf());
        assert_eq!(source.get(keys::DAYS_TO_KEEP).as_deref(), Some("7"));

        fs::write(file.path(), "DaysToKeep = 14\n").unwrap();
        assert_eq!(source.get(keys::DAYS_TO_KEEP).as_deref(), Some("14"));
    }
}
