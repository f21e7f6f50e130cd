//! Configuration for the census runtime, organized by concern:
//! - `root`: top-level structure, file loading and validation
//! - `resolver`: nameserver endpoint and worker-pool limits
//! - `geo`: geolocation database and domestic country code
//! - `output`: working/result directories and input file locations
//! - `schedule`: pause between census cycles
//! - `logging`: log level
//! - `errors`: configuration errors

pub mod errors;
pub mod geo;
pub mod logging;
pub mod output;
pub mod resolver;
pub mod root;
pub mod schedule;

pub use errors::ConfigError;
pub use geo::GeoConfig;
pub use logging::LoggingConfig;
pub use output::OutputConfig;
pub use resolver::ResolverConfig;
pub use root::Config;
pub use schedule::ScheduleConfig;
