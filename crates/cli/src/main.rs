//! # DNS Census
//!
//! Periodic bulk resolution of a registry domain list with geolocation
//! enrichment and a streamed JSON report.

mod bootstrap;
mod di;

use clap::Parser;
use dns_census_application::ports::CensusCycle;
use dns_census_jobs::CensusRunJob;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Parser)]
#[command(name = "dns-census")]
#[command(version)]
#[command(about = "Periodic DNS census of a domain registry")]
struct Cli {
    /// Configuration file
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// Run a single census cycle and exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(cli.config.as_deref())?;
    bootstrap::init_logging(&config);
    bootstrap::log_config(cli.config.as_deref(), &config);

    let pause_secs = config.schedule.pause_secs;
    let service = di::build_census(config).await?;

    if cli.once {
        let stats = service.run_cycle().await?;
        info!(
            domains = stats.domains,
            errors = stats.errors,
            duration = stats.duration,
            "single census cycle complete"
        );
        return Ok(());
    }

    let shutdown = CancellationToken::new();
    let job = Arc::new(
        CensusRunJob::new(service, pause_secs).with_cancellation(shutdown.clone()),
    );
    let handle = job.start();

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");
    shutdown.cancel();
    handle.await?;

    Ok(())
}
