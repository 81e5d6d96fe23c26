use crate::dispatch::{DispatchVariant, SweepDirection};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ControllerConfig {
    /// Dispatcher variant: "single" or "scan"
    pub variant: String,

    /// Sweep tie-break for the scan variant: "up" or "down"
    #[serde(default = "default_preferred_direction")]
    pub preferred_direction: String,
}

fn default_preferred_direction() -> String {
    "up".to_string()
}

impl ControllerConfig {
    pub fn variant(&self) -> Result<DispatchVariant, String> {
        DispatchVariant::from_str(&self.variant)
    }

    pub fn preferred_direction(&self) -> Result<SweepDirection, String> {
        SweepDirection::from_str(&self.preferred_direction)
    }
}
