//! # Provenance Node
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from `PV_*` variables, then apply CLI flags
//! 2. Initialize logging
//! 3. Validate configuration
//! 4. Build subsystems (detector client, consensus, ledger, content store)
//! 5. Run the requested command and exit

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error};

use node_runtime::cli::{execute, Cli};
use node_runtime::container::{NodeConfig, NodeContainer};

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!("{:#}", e);
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> Result<bool> {
    let config = NodeConfig::from_env().context("Failed to load configuration")?;
    let config = cli.apply_overrides(config);

    pv_telemetry::init_telemetry(&config.telemetry)
        .context("Failed to initialize logging")?;
    config.validate().context("Invalid configuration")?;
    debug!(?config, "configuration loaded");

    let node = NodeContainer::build(config).context("Failed to start node")?;
    let output = execute(&cli.command, &node).await?;

    for line in &output.lines {
        println!("{}", line);
    }
    Ok(output.success)
}
