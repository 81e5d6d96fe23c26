use super::summary::MetricsSummary;
use crate::dispatch::ControllerState;

/// Accumulates per-tick observations of a simulation run
pub struct MetricsCollector {
    total_ticks: u64,
    ticks_idle: u64,
    ticks_moving: u64,
    ticks_door_open: u64,
    floors_traveled: u64,

    // Wait time from issue to doors-open, in ticks
    wait_samples: Vec<f64>,

    pub requests_issued: u64,
    pub requests_admitted: u64,
    pub requests_rejected: u64,
    pub requests_served: u64,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            total_ticks: 0,
            ticks_idle: 0,
            ticks_moving: 0,
            ticks_door_open: 0,
            floors_traveled: 0,
            wait_samples: Vec::new(),
            requests_issued: 0,
            requests_admitted: 0,
            requests_rejected: 0,
            requests_served: 0,
        }
    }

    /// Record one tick's outcome
    pub fn record_tick(&mut self, state: ControllerState, floor_delta: u64) {
        self.total_ticks += 1;
        self.floors_traveled += floor_delta;
        match state {
            ControllerState::Idle => self.ticks_idle += 1,
            ControllerState::Moving => self.ticks_moving += 1,
            ControllerState::DoorOpen => self.ticks_door_open += 1,
        }
    }

    /// Record a serviced request and how long it waited
    pub fn record_service(&mut self, wait_ticks: u64) {
        self.requests_served += 1;
        self.wait_samples.push(wait_ticks as f64);
    }

    /// Compute final summary statistics
    pub fn compute_summary(&self, trips: u32) -> MetricsSummary {
        let share = |ticks: u64| {
            if self.total_ticks == 0 {
                0.0
            } else {
                ticks as f64 / self.total_ticks as f64
            }
        };

        MetricsSummary {
            total_ticks: self.total_ticks,
            requests_issued: self.requests_issued,
            requests_admitted: self.requests_admitted,
            requests_rejected: self.requests_rejected,
            requests_served: self.requests_served,

            wait_mean: mean(&self.wait_samples),
            wait_p50: percentile(&self.wait_samples, 0.5),
            wait_p90: percentile(&self.wait_samples, 0.9),
            wait_p99: percentile(&self.wait_samples, 0.99),

            floors_traveled: self.floors_traveled,
            trips,
            floors_per_trip: if trips == 0 {
                0.0
            } else {
                self.floors_traveled as f64 / trips as f64
            },

            idle_share: share(self.ticks_idle),
            moving_share: share(self.ticks_moving),
            door_open_share: share(self.ticks_door_open),
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Calculate percentile of samples
fn percentile(samples: &[f64], p: f64) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let mut sorted: Vec<f64> = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let idx = ((sorted.len() as f64 - 1.0) * p) as usize;
    sorted[idx]
}

/// Calculate mean of samples
fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile() {
        let samples = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile(&samples, 0.0), 1.0);
        assert_eq!(percentile(&samples, 0.5), 3.0);
        assert_eq!(percentile(&samples, 1.0), 5.0);

        let empty: Vec<f64> = vec![];
        assert_eq!(percentile(&empty, 0.5), 0.0);
    }

    #[test]
    fn test_mean() {
        let samples = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(mean(&samples), 3.0);
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_collector_counts() {
        let mut collector = MetricsCollector::new();

        collector.record_tick(ControllerState::Idle, 0);
        collector.record_tick(ControllerState::Moving, 1);
        collector.record_tick(ControllerState::Moving, 1);
        collector.record_tick(ControllerState::DoorOpen, 0);

        collector.requests_issued = 2;
        collector.requests_admitted = 2;
        collector.record_service(3);
        collector.record_service(5);

        let summary = collector.compute_summary(1);
        assert_eq!(summary.total_ticks, 4);
        assert_eq!(summary.floors_traveled, 2);
        assert_eq!(summary.requests_served, 2);
        assert_eq!(summary.wait_mean, 4.0);
        assert_eq!(summary.moving_share, 0.5);
        assert_eq!(summary.floors_per_trip, 2.0);
    }
}
