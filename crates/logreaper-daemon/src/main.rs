//! Logreaper - background retention sweeper for log directory trees.

use clap::Parser;
use logreaper_daemon::{Cli, FileSource, TracingSink};
use logreaper_domain::ConfigSnapshot;
use logreaper_sweep::{RetentionSweeper, SweepWorker, VolumeProbe};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> logreaper_daemon::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config_path = match cli.config {
        Some(path) => path,
        None => FileSource::default_path()?,
    };
    tracing::info!(config = %config_path.display(), "using configuration file");

    let source = FileSource::new(config_path);
    let probe = VolumeProbe::new();
    let sink = TracingSink::new();

    if cli.once {
        let snapshot = ConfigSnapshot::from_source(&source);
        let mut sweeper = RetentionSweeper::new(cli.dry_run);
        let metrics = sweeper.sweep(&snapshot, &probe, &sink);
        tracing::info!("{}", metrics.summary());
    } else {
        let mut worker = SweepWorker::new(cli.dry_run);
        worker.run(&source, &probe, &sink).await;
    }

    Ok(())
}
