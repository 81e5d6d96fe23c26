/// Summary of all metrics from a simulation run
#[derive(Debug, Clone)]
pub struct MetricsSummary {
    pub total_ticks: u64,

    // Request counts
    pub requests_issued: u64,
    pub requests_admitted: u64,
    pub requests_rejected: u64,
    pub requests_served: u64,

    // Wait time from issue to doors-open (ticks)
    pub wait_mean: f64,
    pub wait_p50: f64,
    pub wait_p90: f64,
    pub wait_p99: f64,

    // Movement
    pub floors_traveled: u64,
    pub trips: u32,
    pub floors_per_trip: f64,

    // Share of ticks spent in each state
    pub idle_share: f64,
    pub moving_share: f64,
    pub door_open_share: f64,
}

impl MetricsSummary {
    pub fn print(&self) {
        println!("\n=== Final Metrics ===\n");

        println!("Requests:");
        println!("  Issued:   {}", self.requests_issued);
        println!("  Admitted: {}", self.requests_admitted);
        println!("  Rejected: {}", self.requests_rejected);
        println!("  Served:   {}", self.requests_served);

        println!("\nWait time (ticks):");
        println!(
            "  mean={:.1}, p50={:.1}, p90={:.1}, p99={:.1}",
            self.wait_mean, self.wait_p50, self.wait_p90, self.wait_p99
        );

        println!("\nMovement:");
        println!("  Floors traveled: {}", self.floors_traveled);
        println!("  Trips:           {}", self.trips);
        println!("  Floors/trip:     {:.2}", self.floors_per_trip);

        println!("\nState occupancy:");
        println!("  Idle:      {:.1}%", self.idle_share * 100.0);
        println!("  Moving:    {:.1}%", self.moving_share * 100.0);
        println!("  Door open: {:.1}%", self.door_open_share * 100.0);

        println!("\nTotal ticks: {}", self.total_ticks);
    }
}
