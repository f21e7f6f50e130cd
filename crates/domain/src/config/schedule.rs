use serde::{Deserialize, Serialize};

/// Pacing of census cycles.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScheduleConfig {
    /// Pause between cycles, applied after success and failure alike.
    #[serde(default = "default_pause_secs")]
    pub pause_secs: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            pause_secs: default_pause_secs(),
        }
    }
}

fn default_pause_secs() -> u64 {
    10
}
