use super::{
    ConfigError, GeoConfig, LoggingConfig, OutputConfig, ResolverConfig, ScheduleConfig,
};
use serde::{Deserialize, Serialize};

/// Top-level census configuration, loaded from a TOML file. Every
/// section and field has a default so a missing file yields a working
/// local setup.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub resolver: ResolverConfig,

    #[serde(default)]
    pub geo: GeoConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub schedule: ScheduleConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Loads configuration from `path`, or the built-in defaults when
    /// no path is given.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::Malformed {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolver.maxpool == 0 {
            return Err(ConfigError::Invalid("maxpool must be at least 1".into()));
        }
        if self.resolver.nextpool == 0 {
            return Err(ConfigError::Invalid("nextpool must be at least 1".into()));
        }
        if self.resolver.nextpool >= self.resolver.maxpool {
            return Err(ConfigError::Invalid(format!(
                "nextpool ({}) must be less than maxpool ({})",
                self.resolver.nextpool, self.resolver.maxpool
            )));
        }
        if self.resolver.dns_host.is_empty() {
            return Err(ConfigError::Invalid("dns_host must not be empty".into()));
        }
        if self.resolver.attempts == 0 {
            return Err(ConfigError::Invalid("attempts must be at least 1".into()));
        }
        Ok(())
    }
}
