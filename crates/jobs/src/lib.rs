pub mod census_run;

pub use census_run::CensusRunJob;
