use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("Cannot parse config file {path}: {reason}")]
    Malformed { path: String, reason: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
