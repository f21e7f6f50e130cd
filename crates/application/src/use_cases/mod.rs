pub mod enrich;
pub mod resolve_domain;
pub mod run_census;

pub use enrich::GeoEnricher;
pub use resolve_domain::ResolveDomainUseCase;
pub use run_census::{PoolLimits, RunCensusUseCase};
