//! # confluent-cloud
//!
//! Runs one module against the Confluent Cloud management API and prints
//! its result record as JSON on stdout. Logs go to stderr.
//!
//! Exit status is 0 on success and 1 when the module failed, in which case
//! stdout carries `{"failed": true, "msg": ..., "exception": ...}`.

mod cli;

use clap::Parser;
use cli::Cli;
use confluent_cloud::config::LoggingConfig;
use confluent_cloud::modules::ModuleFailure;
use confluent_cloud::observability::{init_tracing, metrics};
use std::process::ExitCode;
use tracing::{error, info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Required for rustls 0.23+ when no default provider is set via features.
    // An already installed provider is fine.
    let _ = rustls::crypto::ring::default_provider().install_default();

    // A missing .env file is not an error
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(e) = init_tracing(&LoggingConfig::from_env()) {
        eprintln!("{e:#}");
    }
    if let Err(e) = metrics::register_metrics() {
        warn!("Failed to register metrics: {e}");
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        build_git_hash = env!("BUILD_GIT_HASH"),
        build_datetime = env!("BUILD_DATETIME"),
        "Starting confluent-cloud"
    );

    let (record, exit_code) = match cli::run(&cli).await {
        Ok(output) => (serde_json::to_string(&output), ExitCode::SUCCESS),
        Err(err) => {
            error!("{err:#}");
            (
                serde_json::to_string(&ModuleFailure::from(&err)),
                ExitCode::FAILURE,
            )
        }
    };

    let exit_code = match record {
        Ok(json) => {
            println!("{json}");
            exit_code
        }
        Err(e) => {
            error!("Failed to serialize result: {e}");
            ExitCode::FAILURE
        }
    };

    if cli.metrics {
        match metrics::gather_text() {
            Ok(text) => eprint!("{text}"),
            Err(e) => warn!("Failed to encode metrics: {e}"),
        }
    }

    exit_code
}
