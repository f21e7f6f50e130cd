use serde::{Deserialize, Serialize};

/// DNS resolution settings: the nameserver endpoint, the per-exchange
/// budget and the worker-pool watermarks.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    #[serde(default = "default_dns_host")]
    pub dns_host: String,

    #[serde(default = "default_dns_port")]
    pub dns_port: u16,

    /// High watermark: admission stops while this many tasks are in
    /// flight.
    #[serde(default = "default_maxpool")]
    pub maxpool: usize,

    /// Low watermark: once admission stopped, it resumes only after
    /// the in-flight count drained below this value.
    #[serde(default = "default_nextpool")]
    pub nextpool: usize,

    /// Hard cap on admitted domains per run, 0 = unlimited.
    #[serde(default)]
    pub forcecount: u64,

    #[serde(default = "default_query_timeout_secs")]
    pub query_timeout_secs: u64,

    /// Full nameserver-order passes per query. The operating default
    /// is a single pass.
    #[serde(default = "default_attempts")]
    pub attempts: u32,

    /// Fixed delay between passes.
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl ResolverConfig {
    /// The configured endpoint in `host:port` form.
    pub fn nameserver(&self) -> String {
        format!("{}:{}", self.dns_host, self.dns_port)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            dns_host: default_dns_host(),
            dns_port: default_dns_port(),
            maxpool: default_maxpool(),
            nextpool: default_nextpool(),
            forcecount: 0,
            query_timeout_secs: default_query_timeout_secs(),
            attempts: default_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

fn default_dns_host() -> String {
    "127.0.0.1".to_string()
}

fn default_dns_port() -> u16 {
    53
}

fn default_maxpool() -> usize {
    100
}

fn default_nextpool() -> usize {
    80
}

fn default_query_timeout_secs() -> u64 {
    30
}

fn default_attempts() -> u32 {
    1
}

fn default_retry_delay_ms() -> u64 {
    250
}
