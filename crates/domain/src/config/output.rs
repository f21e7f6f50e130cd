use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// File locations the census reads from and writes to.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Scratch directory for the in-progress report and its inputs.
    #[serde(default = "default_workdir")]
    pub workdir: PathBuf,

    /// Directory receiving the timestamped compressed reports.
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,

    /// Normalized domain list, defaults to `<workdir>/domains.lst`.
    #[serde(default)]
    pub domains_file: Option<PathBuf>,

    /// Dump metadata record, defaults to `<workdir>/current`.
    #[serde(default)]
    pub metadata_file: Option<PathBuf>,
}

impl OutputConfig {
    pub fn domains_file(&self) -> PathBuf {
        self.domains_file
            .clone()
            .unwrap_or_else(|| self.workdir.join("domains.lst"))
    }

    pub fn metadata_file(&self) -> PathBuf {
        self.metadata_file
            .clone()
            .unwrap_or_else(|| self.workdir.join("current"))
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            workdir: default_workdir(),
            results_dir: default_results_dir(),
            domains_file: None,
            metadata_file: None,
        }
    }
}

fn default_workdir() -> PathBuf {
    PathBuf::from("/tmp")
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("/tmp")
}
