use crate::config::TrafficConfig;
use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, Exp};

/// Generates floor-request arrivals based on traffic configuration
///
/// Arrivals are produced in tick time. Random patterns are driven by a
/// seeded RNG so a scenario replays identically; the "scripted" pattern
/// plays back an explicit (tick, floor) list instead.
pub struct TrafficGenerator {
    traffic: TrafficConfig,
    rng: StdRng,
    num_floors: u8,
    scripted: bool,
    next_arrival_tick: u64,
    script_pos: usize,
    requests_generated: usize,
}

impl TrafficGenerator {
    pub fn new(traffic: TrafficConfig, num_floors: u8) -> Result<Self, String> {
        let pattern = traffic.arrival_pattern.to_lowercase();
        let scripted = match pattern.as_str() {
            "scripted" => true,
            "poisson" | "fixed_rate" => {
                if traffic.arrival_rate <= 0.0 {
                    return Err(format!(
                        "arrival_rate must be positive for pattern '{}'",
                        pattern
                    ));
                }
                false
            }
            _ => return Err(format!("Unknown arrival pattern: {}", pattern)),
        };

        let mut traffic = traffic;
        if scripted {
            traffic.script.sort_by_key(|a| a.tick);
        }

        let mut rng = StdRng::seed_from_u64(traffic.seed);
        let next_arrival_tick = if scripted {
            0
        } else {
            Self::sample_gap(&pattern, traffic.arrival_rate, &mut rng)
        };

        Ok(Self {
            traffic,
            rng,
            num_floors,
            scripted,
            next_arrival_tick,
            script_pos: 0,
            requests_generated: 0,
        })
    }

    /// Next requested floor if an arrival is due at or before `tick`
    ///
    /// Call in a loop: several arrivals may land on the same tick.
    pub fn next_if_due(&mut self, tick: u64) -> Option<u8> {
        if self.scripted {
            let arrival = self.traffic.script.get(self.script_pos)?;
            if arrival.tick > tick {
                return None;
            }
            self.script_pos += 1;
            self.requests_generated += 1;
            return Some(arrival.floor);
        }

        if let Some(max) = self.traffic.num_requests {
            if self.requests_generated >= max {
                return None;
            }
        }
        if self.next_arrival_tick > tick {
            return None;
        }

        let pattern = self.traffic.arrival_pattern.to_lowercase();
        let gap = Self::sample_gap(&pattern, self.traffic.arrival_rate, &mut self.rng);
        self.next_arrival_tick += gap;
        self.requests_generated += 1;

        Some(self.traffic.floor_dist.sample(&mut self.rng, self.num_floors))
    }

    /// Ticks until the following arrival, never zero
    fn sample_gap(pattern: &str, rate: f64, rng: &mut StdRng) -> u64 {
        let gap = match pattern {
            "poisson" => {
                // Exponential inter-arrival times; rate was validated at
                // construction so Exp::new cannot fail here.
                let exp = Exp::new(rate).expect("validated arrival rate");
                exp.sample(rng)
            }
            _ => 1.0 / rate,
        };
        (gap.round() as u64).max(1)
    }

    pub fn is_finished(&self) -> bool {
        if self.scripted {
            self.script_pos >= self.traffic.script.len()
        } else {
            match self.traffic.num_requests {
                Some(max) => self.requests_generated >= max,
                None => false,
            }
        }
    }

    pub fn num_generated(&self) -> usize {
        self.requests_generated
    }
}
