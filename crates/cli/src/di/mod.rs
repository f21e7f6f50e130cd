use dns_census_domain::Config;
use dns_census_infrastructure::CensusService;
use std::sync::Arc;

/// Wires the configured adapters into a ready-to-run census service.
pub async fn build_census(config: Config) -> anyhow::Result<Arc<CensusService>> {
    let service = CensusService::from_config(config).await?;
    Ok(Arc::new(service))
}
