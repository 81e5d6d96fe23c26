pub mod building;
pub mod controller;
pub mod simulation;
pub mod traffic;

pub use building::BuildingConfig;
pub use controller::ControllerConfig;
pub use simulation::SimulationConfig;
pub use traffic::{FloorDistribution, ScriptedArrival, TrafficConfig};

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Top-level configuration that aggregates all sub-configs
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub building: BuildingConfig,
    pub controller: ControllerConfig,
    pub traffic: TrafficConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;

        config.building.validate()?;
        config.controller.variant()?;
        config.controller.preferred_direction()?;

        Ok(config)
    }

    /// Get a default configuration for testing
    #[cfg(test)]
    pub fn test_default() -> Self {
        Config {
            building: BuildingConfig {
                num_floors: 10,
                home_floor: 1,
            },
            controller: ControllerConfig {
                variant: "scan".to_string(),
                preferred_direction: "up".to_string(),
            },
            traffic: TrafficConfig {
                arrival_pattern: "poisson".to_string(),
                arrival_rate: 0.1,
                num_requests: Some(20),
                seed: 42,
                floor_dist: FloorDistribution::Uniform,
                script: Vec::new(),
            },
            simulation: SimulationConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::DispatchVariant;

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [building]
            num_floors = 8

            [controller]
            variant = "single"

            [traffic]
            arrival_pattern = "scripted"
            script = [
                { tick = 1, floor = 3 },
                { tick = 10, floor = 5 },
            ]
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();

        assert_eq!(config.building.num_floors, 8);
        assert_eq!(config.building.home_floor, 1);
        assert_eq!(
            config.controller.variant().unwrap(),
            DispatchVariant::SingleTarget
        );
        assert_eq!(config.traffic.script.len(), 2);
        assert_eq!(config.simulation.door_dwell_ticks, 1);
    }

    #[test]
    fn test_defaults() {
        let config = Config::test_default();
        assert!(config.building.validate().is_ok());
        assert_eq!(config.simulation.log_interval, 100);
        assert_eq!(config.simulation.max_ticks, 10_000);
    }
}
