use crate::ports::ReportSink;
use crate::use_cases::{GeoEnricher, ResolveDomainUseCase};
use dns_census_domain::{CensusError, DumpMetadata, ResolutionResult, RunStats};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Worker-pool watermarks and the optional per-run admission cap.
#[derive(Debug, Clone, Copy)]
pub struct PoolLimits {
    /// Admission stops while this many tasks are in flight.
    pub maxpool: usize,
    /// Admission resumes below this value. Must be less than
    /// `maxpool`; the band between the two is the refill hysteresis.
    pub nextpool: usize,
    /// Hard cap on admitted domains, 0 = unlimited.
    pub forcecount: u64,
}

/// Bounded fan-out over the domain list.
///
/// One task per in-flight domain, capped by the maxpool/nextpool
/// hysteresis. Completed results land on a single queue and are
/// consumed inline by the admission loop itself: that loop is the only
/// writer of the geo cache, the stats and the report sink, so none of
/// them needs a lock. Results are emitted in completion order, not
/// submission order.
pub struct RunCensusUseCase {
    resolver: Arc<ResolveDomainUseCase>,
    limits: PoolLimits,
}

impl RunCensusUseCase {
    pub fn new(resolver: Arc<ResolveDomainUseCase>, limits: PoolLimits) -> Self {
        Self { resolver, limits }
    }

    pub async fn execute(
        &self,
        domains: Vec<String>,
        header: &DumpMetadata,
        timestamp: i64,
        enricher: &mut GeoEnricher,
        sink: &mut dyn ReportSink,
    ) -> Result<RunStats, CensusError> {
        sink.begin(timestamp, header)?;
        let started = Instant::now();
        let mut stats = RunStats::default();
        let (completions, mut completed) =
            mpsc::channel::<ResolutionResult>(self.limits.maxpool.max(1));
        let mut in_flight: usize = 0;

        for domain in domains {
            if self.limits.forcecount > 0 && stats.domains >= self.limits.forcecount {
                info!(
                    cap = self.limits.forcecount,
                    "admission cap reached, remaining domains skipped for this run"
                );
                break;
            }
            stats.domains += 1;
            in_flight += 1;
            let resolver = Arc::clone(&self.resolver);
            let completions = completions.clone();
            tokio::spawn(async move {
                let result = resolver.execute(&domain).await;
                // The receiver outlives every task; a failed send means
                // the run was already aborted.
                let _ = completions.send(result).await;
            });

            if in_flight >= self.limits.maxpool {
                debug!(in_flight, "pool full, draining to the low watermark");
                while in_flight >= self.limits.nextpool {
                    let Some(result) = completed.recv().await else {
                        break;
                    };
                    in_flight -= 1;
                    consume(result, enricher, &mut stats, sink)?;
                }
            }
        }

        // Join barrier: the senders are gone once every admitted task
        // has handed off its result.
        drop(completions);
        while let Some(result) = completed.recv().await {
            in_flight -= 1;
            consume(result, enricher, &mut stats, sink)?;
        }
        debug_assert_eq!(in_flight, 0);

        stats.set_unique_addresses(enricher.unique_v4(), enricher.unique_v6());
        stats.duration = started.elapsed().as_secs() as i64;
        sink.finish(&stats)?;
        Ok(stats)
    }
}

fn consume(
    mut result: ResolutionResult,
    enricher: &mut GeoEnricher,
    stats: &mut RunStats,
    sink: &mut dyn ReportSink,
) -> Result<(), CensusError> {
    enricher.enrich(&mut result);
    stats.record(&result, enricher.domestic_code());
    sink.write_result(&result)
}
