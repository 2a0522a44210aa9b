//! MadDash Ingest - publish histogram snapshots to the document store

use clap::Parser;
use maddash_common::logging::{init_logging, LogConfig};
use maddash_ingest::{orchestrator::Ingestor, Cli};
use std::process;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_config = LogConfig::builder()
        .level(cli.log)
        .log_file_prefix("maddash-ingest")
        .build();

    // Environment variables take precedence over the command line
    let log_config = match log_config.clone().with_env_overrides() {
        Ok(overridden) => overridden,
        Err(e) => {
            eprintln!("Warning: ignoring LOG_* environment overrides: {}", e);
            log_config
        },
    };

    // Keep the guard alive so file output is flushed on exit
    let _guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Warning: logging disabled: {}", e);
            None
        },
    };

    let config = cli.into_config();
    config.log_fields();

    match Ingestor::new(config).run().await {
        Ok(summary) => {
            info!(
                collections = summary.collections,
                histograms = summary.histograms,
                filelists = summary.filelists,
                "Done"
            );
        },
        Err(e) => {
            error!(error = %e, "Ingestion failed");
            eprintln!("Error: {}", e);
            process::exit(1);
        },
    }
}
