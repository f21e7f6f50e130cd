use crate::dns::PoolExchange;
use crate::geo::MaxmindCountryLookup;
use crate::registry::load_domain_list;
use crate::report::{compress_report, JsonReportWriter};
use async_trait::async_trait;
use dns_census_application::ports::{CensusCycle, CountryLookup};
use dns_census_application::use_cases::{
    GeoEnricher, PoolLimits, ResolveDomainUseCase, RunCensusUseCase,
};
use dns_census_domain::{CensusError, Config, DumpMetadata, RunStats};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// One fully wired census: inputs from the working directory, the
/// bounded resolution engine, report plus archive on the way out.
pub struct CensusService {
    config: Config,
    engine: RunCensusUseCase,
    lookup: Arc<dyn CountryLookup>,
}

impl CensusService {
    pub async fn from_config(config: Config) -> Result<Self, CensusError> {
        let nameservers = resolve_nameservers(&config.resolver.nameserver()).await?;
        info!(
            nameservers = nameservers.len(),
            endpoint = %config.resolver.nameserver(),
            "nameserver pool ready"
        );

        let exchange = PoolExchange::new(
            nameservers,
            Duration::from_secs(config.resolver.query_timeout_secs),
        )
        .with_attempts(config.resolver.attempts)
        .with_retry_delay(Duration::from_millis(config.resolver.retry_delay_ms));

        let engine = RunCensusUseCase::new(
            Arc::new(ResolveDomainUseCase::new(Arc::new(exchange))),
            PoolLimits {
                maxpool: config.resolver.maxpool,
                nextpool: config.resolver.nextpool,
                forcecount: config.resolver.forcecount,
            },
        );

        let lookup: Arc<dyn CountryLookup> = Arc::new(MaxmindCountryLookup::open(
            config.geo.database_path.as_deref(),
        ));

        Ok(Self {
            config,
            engine,
            lookup,
        })
    }
}

#[async_trait]
impl CensusCycle for CensusService {
    async fn run_cycle(&self) -> Result<RunStats, CensusError> {
        let header = read_metadata(&self.config.output.metadata_file());
        let domains = load_domain_list(&self.config.output.domains_file())?;
        let timestamp = chrono::Utc::now().timestamp();

        let mut sink = JsonReportWriter::create(&self.config.output.workdir)?;
        let report_path = sink.path().to_path_buf();
        let mut enricher = GeoEnricher::new(
            Arc::clone(&self.lookup),
            self.config.geo.domestic_code.clone(),
        );

        let stats = self
            .engine
            .execute(domains, &header, timestamp, &mut enricher, &mut sink)
            .await?;

        let archive = compress_report(&report_path, &self.config.output.results_dir, timestamp)?;
        info!(
            archive = %archive.display(),
            domains = stats.domains,
            errors = stats.errors,
            duration = stats.duration,
            "census cycle complete"
        );
        Ok(stats)
    }
}

async fn resolve_nameservers(endpoint: &str) -> Result<Vec<SocketAddr>, CensusError> {
    let addrs: Vec<SocketAddr> = tokio::net::lookup_host(endpoint)
        .await
        .map_err(|e| CensusError::Transport(format!("Cannot resolve nameserver {endpoint}: {e}")))?
        .collect();
    if addrs.is_empty() {
        return Err(CensusError::NoNameservers);
    }
    Ok(addrs)
}

/// The dump metadata is a passthrough from the fetch stage. A missing
/// file only costs the report header, so the run proceeds with an
/// empty record; a corrupt file is a real fault.
fn read_metadata(path: &Path) -> DumpMetadata {
    match std::fs::read_to_string(path) {
        Ok(raw) => match serde_json::from_str(&raw) {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "dump metadata unparseable, embedding an empty record"
                );
                DumpMetadata::default()
            }
        },
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "dump metadata unavailable, embedding an empty record"
            );
            DumpMetadata::default()
        }
    }
}
