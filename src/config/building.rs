use crate::dispatch::MAX_FLOORS;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct BuildingConfig {
    /// Number of served floors; the bottom floor is 1, there is no floor 0
    pub num_floors: u8,

    /// Rest position of the car, also the position restored by reset
    #[serde(default = "default_home_floor")]
    pub home_floor: u8,
}

fn default_home_floor() -> u8 {
    1
}

impl BuildingConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !(2..=MAX_FLOORS).contains(&self.num_floors) {
            return Err(format!(
                "building.num_floors must be in [2, {}], got {}",
                MAX_FLOORS, self.num_floors
            ));
        }
        if !(1..=self.num_floors).contains(&self.home_floor) {
            return Err(format!(
                "building.home_floor must be in [1, {}], got {}",
                self.num_floors, self.home_floor
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        let ok = BuildingConfig {
            num_floors: 10,
            home_floor: 1,
        };
        assert!(ok.validate().is_ok());

        let too_tall = BuildingConfig {
            num_floors: 17,
            home_floor: 1,
        };
        assert!(too_tall.validate().is_err());

        let bad_home = BuildingConfig {
            num_floors: 10,
            home_floor: 11,
        };
        assert!(bad_home.validate().is_err());
    }
}
