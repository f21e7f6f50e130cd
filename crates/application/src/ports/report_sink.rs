use dns_census_domain::{CensusError, DumpMetadata, ResolutionResult, RunStats};

/// Streaming destination for one run's report.
///
/// Driven by the single result consumer: `begin` once, `write_result`
/// per enriched result in completion order, `finish` once with the
/// frozen stats. Implementations must not expose a partially written
/// report to readers.
pub trait ReportSink: Send {
    fn begin(&mut self, timestamp: i64, header: &DumpMetadata) -> Result<(), CensusError>;

    fn write_result(&mut self, result: &ResolutionResult) -> Result<(), CensusError>;

    fn finish(&mut self, stats: &RunStats) -> Result<(), CensusError>;
}
