//! `run` command implementation.

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::RunArgs;
use crate::pipeline::{Relay, RelayPipelineConfig};

/// Execute the `run` command
pub async fn run_relay(args: &RunArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration");

    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    let mut config = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    // Apply CLI overrides
    if let Some(ref gateway) = args.gateway {
        info!(gateway = %gateway, "Overriding gateway URL from CLI");
        config.gateway.url = gateway.trim_end_matches('/').to_string();
    }
    let print_response = args.print_response || config.gateway.print_response;

    info!(
        gateway = %config.gateway.url,
        topics = config.topics.len(),
        print_response,
        "Configuration loaded"
    );

    // Metrics endpoint (optional)
    if args.metrics_port != 0 {
        observability::init_metrics_only(args.metrics_port)?;
        info!(port = args.metrics_port, "Metrics endpoint available");
    }

    let relay = Relay::new(RelayPipelineConfig {
        config,
        print_response,
    })?;

    info!("Relaying events from stdin (one JSON object per line)");

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let stats = relay.run(stdin).await.context("Relay execution failed")?;

    info!(
        events = stats.events_dispatched,
        outcomes_ok = stats.outcomes_ok,
        outcomes_err = stats.outcomes_err,
        duration_secs = stats.duration.as_secs_f64(),
        "Relay finished"
    );
    stats.print_summary();

    Ok(())
}
