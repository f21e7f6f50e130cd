//! DNS Census Application Layer
//!
//! Ports (traits) for the adapters the census depends on, and the use
//! cases that orchestrate one run: per-domain resolution, geolocation
//! enrichment, stats accounting and the bounded-concurrency engine.
pub mod ports;
pub mod use_cases;

pub use ports::{CensusCycle, CountryLookup, DnsExchange, QueryOutcome, QueryType, ReportSink};
pub use use_cases::{GeoEnricher, PoolLimits, ResolveDomainUseCase, RunCensusUseCase};
