use async_trait::async_trait;
use dns_census_domain::{CensusError, RunStats};

/// One complete census cycle: load inputs, resolve the list, publish
/// the report. The scheduled job drives this port so it stays
/// independent of the concrete adapters behind a cycle.
#[async_trait]
pub trait CensusCycle: Send + Sync {
    async fn run_cycle(&self) -> Result<RunStats, CensusError>;
}
