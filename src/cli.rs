//! # Command Line
//!
//! Thin adapter between process arguments and the modules.
//!
//! ## Usage
//!
//! ```bash
//! # Check connectivity and credentials
//! confluent-cloud ping
//!
//! # Ensure an environment exists
//! confluent-cloud environment --name test_env
//!
//! # Rename by id, reporting only
//! confluent-cloud --check environment --id env-dsh38dja --name test_env_new
//!
//! # Delete
//! confluent-cloud environment --name test_env --state absent
//!
//! # List environments by name
//! confluent-cloud environment-info --names prod --names staging
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use confluent_cloud::client::HttpTransport;
use confluent_cloud::config::{ApiConfig, ApiCredentials};
use confluent_cloud::constants::{ENV_API_KEY, ENV_API_SECRET};
use confluent_cloud::modules::{
    environment, environment_info, ping, EnvironmentInfoParams, EnvironmentParams, ModuleContext,
    ModuleOutput,
};
use confluent_cloud::types::State;
use std::time::Duration;
use tracing::debug;

/// Manage Confluent Cloud resources
#[derive(Parser, Debug)]
#[command(name = "confluent-cloud", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Cloud API key
    #[arg(long, env = ENV_API_KEY, hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Cloud API secret
    #[arg(long, env = ENV_API_SECRET, hide_env_values = true, global = true)]
    pub api_secret: Option<String>,

    /// Management API base URL [default: https://api.confluent.cloud]
    #[arg(long, global = true)]
    pub api_endpoint: Option<String>,

    /// Per-request timeout in seconds [default: 60]
    #[arg(long, global = true)]
    pub api_timeout: Option<u64>,

    /// Retries for transient failures [default: 5]
    #[arg(long, global = true)]
    pub api_retries: Option<u32>,

    /// Cap on a single backoff delay in seconds [default: 12]
    #[arg(long, global = true)]
    pub api_retry_max_delay: Option<u64>,

    /// Report what would change without changing anything
    #[arg(long, global = true)]
    pub check: bool,

    /// Print Prometheus metrics to stderr after the run
    #[arg(long, global = true)]
    pub metrics: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create, rename or delete an environment
    Environment {
        /// Environment id, takes priority over the name when looking up
        #[arg(long)]
        id: Option<String>,

        /// Environment display name
        #[arg(long)]
        name: Option<String>,

        #[arg(long, value_enum, default_value_t = StateArg::Present)]
        state: StateArg,
    },
    /// List environments, optionally filtered by ids or names
    EnvironmentInfo {
        /// Environment ids (repeatable, or comma separated)
        #[arg(long, value_delimiter = ',')]
        ids: Vec<String>,

        /// Environment display names (repeatable, or comma separated)
        #[arg(long, value_delimiter = ',')]
        names: Vec<String>,
    },
    /// Verify connectivity and credentials
    Ping,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StateArg {
    Present,
    Absent,
}

impl From<StateArg> for State {
    fn from(state: StateArg) -> Self {
        match state {
            StateArg::Present => State::Present,
            StateArg::Absent => State::Absent,
        }
    }
}

impl Cli {
    /// Environment settings overridden by explicit flags
    pub fn api_config(&self) -> ApiConfig {
        let mut config = ApiConfig::from_env();
        if let Some(endpoint) = &self.api_endpoint {
            config = config.with_endpoint(endpoint.clone());
        }
        if let Some(timeout) = self.api_timeout {
            config = config.with_timeout(Duration::from_secs(timeout));
        }
        if let Some(retries) = self.api_retries {
            config = config.with_retries(retries);
        }
        if let Some(delay) = self.api_retry_max_delay {
            config = config.with_retry_max_delay(Duration::from_secs(delay));
        }
        config
    }
}

fn non_empty(values: &[String]) -> Option<Vec<String>> {
    (!values.is_empty()).then(|| values.to_vec())
}

pub async fn run(cli: &Cli) -> Result<ModuleOutput> {
    let config = cli.api_config();
    let credentials = ApiCredentials::new(
        cli.api_key.as_deref().unwrap_or_default(),
        cli.api_secret.as_deref().unwrap_or_default(),
    )?;
    let transport = HttpTransport::new(config.clone(), credentials)?;
    debug!(endpoint = %config.endpoint, check_mode = cli.check, "Configured API transport");

    let ctx = ModuleContext {
        transport: &transport,
        diagnostics: config.diagnostics(),
        check_mode: cli.check,
    };

    match &cli.command {
        Commands::Environment { id, name, state } => {
            let params = EnvironmentParams {
                id: id.clone(),
                name: name.clone(),
                state: (*state).into(),
            };
            environment::invoke(&ctx, &params)
                .await
                .context("failed to get environment")
        }
        Commands::EnvironmentInfo { ids, names } => {
            let params = EnvironmentInfoParams {
                ids: non_empty(ids),
                names: non_empty(names),
            };
            environment_info::invoke(&ctx, &params)
                .await
                .context("failed to get environments")
        }
        Commands::Ping => ping::invoke(&ctx).await.context("Ping failure"),
    }
}
