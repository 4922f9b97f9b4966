//! CLI argument parsing.

use clap::Parser;
use std::path::PathBuf;

/// Logreaper - background retention sweeper for log directory trees.
#[derive(Debug, Parser)]
#[command(name = "logreaper")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (flat TOML table, re-read every cycle)
    #[arg(short, long, env = "LOGREAPER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Run a single sweep cycle and exit instead of scheduling
    #[arg(long)]
    pub once: bool,

    /// Log what would be deleted without actually deleting
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug-level logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["logreaper"]);
        assert!(cli.config.is_none());
        assert!(!cli.once);
        assert!(!cli.dry_run);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from(["logreaper", "--once", "--dry-run", "-c", "/etc/logreaper.toml"]);
        assert!(cli.once);
        assert!(cli.dry_run);
        assert_eq!(cli.config.unwrap(), PathBuf::from("/etc/logreaper.toml"));
    }
}
