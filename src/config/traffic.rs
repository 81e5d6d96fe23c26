use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct TrafficConfig {
    /// Arrival pattern: "poisson", "fixed_rate" or "scripted"
    pub arrival_pattern: String,

    /// Mean arrivals per tick (random patterns)
    #[serde(default)]
    pub arrival_rate: f64,

    /// Total requests to generate (None = unlimited; random patterns)
    #[serde(default)]
    pub num_requests: Option<usize>,

    /// Random seed for reproducibility
    #[serde(default)]
    pub seed: u64,

    /// Distribution of requested floors (random patterns)
    #[serde(default = "default_floor_dist")]
    pub floor_dist: FloorDistribution,

    /// Explicit (tick, floor) arrivals for the "scripted" pattern
    #[serde(default)]
    pub script: Vec<ScriptedArrival>,
}

fn default_floor_dist() -> FloorDistribution {
    FloorDistribution::Uniform
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptedArrival {
    pub tick: u64,
    pub floor: u8,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum FloorDistribution {
    /// Every floor equally likely
    #[serde(rename = "uniform")]
    Uniform,

    /// Always the same floor
    #[serde(rename = "fixed")]
    Fixed { value: u8 },

    /// Ground-floor-heavy traffic: with probability `bias` the request
    /// is for floor 1, otherwise uniform over the upper floors
    #[serde(rename = "lobby")]
    Lobby { bias: f64 },
}

impl FloorDistribution {
    /// Sample a floor in `[1, num_floors]`
    pub fn sample<R: rand::Rng>(&self, rng: &mut R, num_floors: u8) -> u8 {
        match self {
            FloorDistribution::Uniform => rng.gen_range(1..=num_floors),
            FloorDistribution::Fixed { value } => *value,
            FloorDistribution::Lobby { bias } => {
                if rng.gen_bool(bias.clamp(0.0, 1.0)) {
                    1
                } else {
                    rng.gen_range(2..=num_floors)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_uniform_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let f = FloorDistribution::Uniform.sample(&mut rng, 10);
            assert!((1..=10).contains(&f));
        }
    }

    #[test]
    fn test_lobby_bias() {
        let mut rng = StdRng::seed_from_u64(1);
        let dist = FloorDistribution::Lobby { bias: 1.0 };
        for _ in 0..20 {
            assert_eq!(dist.sample(&mut rng, 10), 1);
        }

        let dist = FloorDistribution::Lobby { bias: 0.0 };
        for _ in 0..200 {
            let f = dist.sample(&mut rng, 10);
            assert!((2..=10).contains(&f));
        }
    }
}
