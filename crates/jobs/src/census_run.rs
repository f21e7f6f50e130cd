use dns_census_application::ports::CensusCycle;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Runs census cycles back to back with a fixed pause in between.
///
/// The pause applies after success and failure alike; a failed cycle
/// is logged and retried on the next tick. Stopping mid-cycle leaves
/// at most a temporary report file behind.
pub struct CensusRunJob {
    cycle: Arc<dyn CensusCycle>,
    pause_secs: u64,
    shutdown: CancellationToken,
}

impl CensusRunJob {
    pub fn new(cycle: Arc<dyn CensusCycle>, pause_secs: u64) -> Self {
        Self {
            cycle,
            pause_secs,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn start(self: Arc<Self>) -> JoinHandle<()> {
        info!(pause_secs = self.pause_secs, "starting census run job");

        tokio::spawn(async move {
            loop {
                match self.cycle.run_cycle().await {
                    Ok(stats) => {
                        info!(
                            domains = stats.domains,
                            errors = stats.errors,
                            duration = stats.duration,
                            "census run finished"
                        );
                    }
                    Err(e) => {
                        error!(error = %e, "census run failed, retrying after the pause");
                    }
                }

                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("CensusRunJob: shutting down");
                        break;
                    }
                    _ = tokio::time::sleep(Duration::from_secs(self.pause_secs)) => {}
                }
            }
        })
    }
}
