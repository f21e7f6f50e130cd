use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Geolocation enrichment settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeoConfig {
    /// MaxMind country database. When absent every lookup degrades to
    /// unknown instead of failing.
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Country code that raises the domestic-traffic counter.
    #[serde(default = "default_domestic_code")]
    pub domestic_code: String,
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            domestic_code: default_domestic_code(),
        }
    }
}

fn default_domestic_code() -> String {
    "RU".to_string()
}
