pub mod census_cycle;
pub mod country_lookup;
pub mod dns_exchange;
pub mod report_sink;

pub use census_cycle::CensusCycle;
pub use country_lookup::CountryLookup;
pub use dns_exchange::{DnsExchange, QueryOutcome, QueryType};
pub use report_sink::ReportSink;
