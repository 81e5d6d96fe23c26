use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    /// Log progress every N ticks
    #[serde(default = "default_log_interval")]
    pub log_interval: u64,

    /// Hard stop after this many ticks (stuck-scenario watchdog lives in
    /// the harness, never in the dispatch core)
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,

    /// Ticks the harness holds the doors open before signalling close
    /// (scan variant; the single-target dispatcher dwells exactly one
    /// tick on its own)
    #[serde(default = "default_door_dwell_ticks")]
    pub door_dwell_ticks: u64,
}

fn default_log_interval() -> u64 {
    100
}

fn default_max_ticks() -> u64 {
    10_000
}

fn default_door_dwell_ticks() -> u64 {
    1
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            log_interval: default_log_interval(),
            max_ticks: default_max_ticks(),
            door_dwell_ticks: default_door_dwell_ticks(),
        }
    }
}
