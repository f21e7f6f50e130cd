use dns_census_domain::Config;
use tracing::info;

pub fn load_config(config_path: Option<&str>) -> anyhow::Result<Config> {
    let config = Config::load(config_path)?;
    config.validate()?;
    Ok(config)
}

/// Logged separately from loading: the log level itself comes from the
/// config, so the subscriber is only up after the load succeeded.
pub fn log_config(config_path: Option<&str>, config: &Config) {
    info!(
        config_file = config_path.unwrap_or("default"),
        nameserver = %config.resolver.nameserver(),
        maxpool = config.resolver.maxpool,
        nextpool = config.resolver.nextpool,
        workdir = %config.output.workdir.display(),
        results_dir = %config.output.results_dir.display(),
        "Configuration loaded"
    );
}
