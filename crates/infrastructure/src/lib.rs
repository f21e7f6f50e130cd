//! DNS Census Infrastructure Layer
//!
//! Concrete adapters behind the application ports: the hickory-proto
//! DNS client, the MaxMind country reader, the streaming report
//! pipeline, the registry list loader and the full-cycle service.
pub mod census;
pub mod dns;
pub mod geo;
pub mod registry;
pub mod report;

pub use census::CensusService;
pub use dns::PoolExchange;
pub use geo::MaxmindCountryLookup;
pub use report::JsonReportWriter;
