use clap::Parser;
use liftsim::{Config, Simulator};
use std::path::PathBuf;
use std::time::Instant;

#[cfg(feature = "cli")]
use colored::Colorize;
#[cfg(feature = "cli")]
use tabled::{settings::Style, Table, Tabled};

#[derive(Parser, Debug)]
#[command(author, version, about = "Single-elevator dispatch simulator", long_about = None)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Minimal output (final metrics only)
    #[arg(short, long)]
    quiet: bool,

    /// Per-tick trace during simulation
    #[arg(short, long)]
    verbose: bool,

    /// Very verbose debug output
    #[arg(long)]
    debug: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Save metrics to JSON file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum VerbosityLevel {
    Quiet,
    Normal,
    Verbose,
    Debug,
}

impl Args {
    fn verbosity_level(&self) -> VerbosityLevel {
        if self.debug {
            VerbosityLevel::Debug
        } else if self.verbose {
            VerbosityLevel::Verbose
        } else if self.quiet {
            VerbosityLevel::Quiet
        } else {
            VerbosityLevel::Normal
        }
    }
}

#[cfg(feature = "cli")]
#[derive(Tabled)]
struct WaitRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Mean")]
    mean: String,
    #[tabled(rename = "p50")]
    p50: String,
    #[tabled(rename = "p90")]
    p90: String,
    #[tabled(rename = "p99")]
    p99: String,
}

#[cfg(feature = "cli")]
#[derive(Tabled)]
struct RequestRow {
    #[tabled(rename = "Requests")]
    kind: String,
    #[tabled(rename = "Count")]
    count: u64,
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    let verbosity = args.verbosity_level();
    let use_color = !args.no_color;

    // Header
    if verbosity >= VerbosityLevel::Normal {
        #[cfg(feature = "cli")]
        if use_color {
            println!("{}", "Elevator Dispatch Simulator".bright_cyan().bold());
        } else {
            println!("Elevator Dispatch Simulator");
        }
        #[cfg(not(feature = "cli"))]
        println!("Elevator Dispatch Simulator");
        println!("Loading configuration from: {:?}\n", args.config);
    }

    // Load configuration
    let config = match Config::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Print configuration summary
    if verbosity >= VerbosityLevel::Normal {
        println!("Configuration:");
        println!(
            "  Building: {} floors, home floor {}",
            config.building.num_floors, config.building.home_floor
        );
        println!(
            "  Controller: {} (preferred direction: {})",
            config.controller.variant, config.controller.preferred_direction
        );
        println!(
            "  Traffic: {} ({} requests)",
            config.traffic.arrival_pattern,
            config
                .traffic
                .num_requests
                .map(|n| n.to_string())
                .unwrap_or_else(|| {
                    if config.traffic.arrival_pattern == "scripted" {
                        config.traffic.script.len().to_string()
                    } else {
                        "unlimited".to_string()
                    }
                })
        );
        println!("  Tick limit: {}\n", config.simulation.max_ticks);
    }

    // Create simulator
    let mut simulator = match Simulator::new(&config) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("Error creating simulator: {}", e);
            std::process::exit(1);
        }
    };

    let start_time = Instant::now();

    let summary = match verbosity {
        VerbosityLevel::Quiet => {
            print!("Simulating... ");
            let _ = std::io::Write::flush(&mut std::io::stdout());
            simulator.run()
        }
        VerbosityLevel::Normal => run_with_dashboard(&mut simulator, use_color, &config),
        VerbosityLevel::Verbose => simulator.run_with_callback(|trace| {
            println!(
                "[tick {:>5}] floor {:>2} | {:<8} | {:<4} | pending {} | {} outstanding",
                trace.tick,
                trace.floor,
                trace.state.to_string(),
                trace.direction.to_string(),
                trace.pending,
                trace.outstanding
            );
        }),
        VerbosityLevel::Debug => simulator.run_with_callback(|trace| {
            println!(
                "[tick {:>5}] floor {:>2} | {:<8} | {:<4} | pending {} (bits {:#06x}) | {} outstanding | {}/{} served",
                trace.tick,
                trace.floor,
                trace.state.to_string(),
                trace.direction.to_string(),
                trace.pending,
                trace.pending.bits(),
                trace.outstanding,
                trace.served,
                trace.issued
            );
        }),
    };

    let elapsed = start_time.elapsed();
    print_final_metrics(
        &summary,
        simulator.current_tick(),
        elapsed,
        verbosity,
        use_color,
    );

    // Save to JSON if requested
    if let Some(output_path) = args.output {
        match save_metrics_json(&summary, &output_path) {
            Ok(_) => {
                if verbosity >= VerbosityLevel::Normal {
                    println!("\nMetrics saved to: {:?}", output_path);
                }
            }
            Err(e) => {
                eprintln!("Error saving metrics to JSON: {}", e);
            }
        }
    }
}

fn run_with_dashboard(
    simulator: &mut Simulator,
    use_color: bool,
    config: &Config,
) -> liftsim::MetricsSummary {
    let refresh_interval = config.simulation.log_interval.max(1);
    let mut first_update = true;
    let num_lines = 4;

    simulator.run_with_callback(|trace| {
        if trace.tick % refresh_interval != 0 {
            return;
        }

        // Clear previous dashboard (move cursor up and clear lines)
        if !first_update {
            print!("\x1B[{}A\x1B[J", num_lines);
        }
        first_update = false;

        #[cfg(feature = "cli")]
        if use_color {
            println!(
                "  Tick:     {}",
                trace.tick.to_string().yellow()
            );
            println!(
                "  Car:      floor {} ({}, {})",
                trace.floor.to_string().green(),
                trace.state,
                trace.direction
            );
            println!(
                "  Requests: {} served / {} issued, {} outstanding",
                trace.served.to_string().green(),
                trace.issued,
                trace.outstanding.to_string().blue()
            );
            println!("  Pending:  {}", trace.pending.to_string().magenta());
            return;
        }
        let _ = use_color;
        println!("  Tick:     {}", trace.tick);
        println!(
            "  Car:      floor {} ({}, {})",
            trace.floor, trace.state, trace.direction
        );
        println!(
            "  Requests: {} served / {} issued, {} outstanding",
            trace.served, trace.issued, trace.outstanding
        );
        println!("  Pending:  {}", trace.pending);
    })
}

#[cfg(feature = "cli")]
fn print_final_metrics(
    summary: &liftsim::MetricsSummary,
    ticks: u64,
    real_time: std::time::Duration,
    verbosity: VerbosityLevel,
    use_color: bool,
) {
    if verbosity == VerbosityLevel::Quiet {
        // Continues the "Simulating... " line printed before the run
        println!("done ({} ticks, {:.2}s real)", ticks, real_time.as_secs_f64());
        println!(
            "Wait: {:.1} ticks (p50: {:.1}, p99: {:.1})",
            summary.wait_mean, summary.wait_p50, summary.wait_p99
        );
        println!(
            "Served {}/{} requests in {} trips",
            summary.requests_served, summary.requests_issued, summary.trips
        );
        return;
    }

    if use_color {
        println!(
            "\n{} ({} ticks, {:.2}s real)",
            "Simulation Complete".bright_green().bold(),
            ticks,
            real_time.as_secs_f64()
        );
        println!("{}", "━".repeat(60).bright_black());
    } else {
        println!(
            "\nSimulation Complete ({} ticks, {:.2}s real)",
            ticks,
            real_time.as_secs_f64()
        );
        println!("{}", "━".repeat(60));
    }

    if use_color {
        println!("\n{}", "REQUESTS".yellow().bold());
    } else {
        println!("\nREQUESTS");
    }
    let request_rows = vec![
        RequestRow {
            kind: "Issued".to_string(),
            count: summary.requests_issued,
        },
        RequestRow {
            kind: "Admitted".to_string(),
            count: summary.requests_admitted,
        },
        RequestRow {
            kind: "Rejected".to_string(),
            count: summary.requests_rejected,
        },
        RequestRow {
            kind: "Served".to_string(),
            count: summary.requests_served,
        },
    ];
    let request_table = Table::new(&request_rows).with(Style::rounded()).to_string();
    println!("{}", request_table);

    if use_color {
        println!("\n{}", "WAIT TIME".yellow().bold());
    } else {
        println!("\nWAIT TIME");
    }
    let wait_rows = vec![WaitRow {
        metric: "Wait (ticks)".to_string(),
        mean: format!("{:.1}", summary.wait_mean),
        p50: format!("{:.1}", summary.wait_p50),
        p90: format!("{:.1}", summary.wait_p90),
        p99: format!("{:.1}", summary.wait_p99),
    }];
    let wait_table = Table::new(&wait_rows).with(Style::rounded()).to_string();
    println!("{}", wait_table);

    if use_color {
        println!("\n{}", "MOVEMENT".yellow().bold());
    } else {
        println!("\nMOVEMENT");
    }
    println!("  • Floors traveled: {}", summary.floors_traveled);
    println!("  • Trips:           {}", summary.trips);
    println!("  • Floors/trip:     {:.2}", summary.floors_per_trip);

    if use_color {
        println!("\n{}", "STATE OCCUPANCY".yellow().bold());
    } else {
        println!("\nSTATE OCCUPANCY");
    }
    println!("  • Idle:      {:.1}%", summary.idle_share * 100.0);
    println!("  • Moving:    {:.1}%", summary.moving_share * 100.0);
    println!("  • Door open: {:.1}%", summary.door_open_share * 100.0);
}

#[cfg(not(feature = "cli"))]
fn print_final_metrics(
    summary: &liftsim::MetricsSummary,
    ticks: u64,
    real_time: std::time::Duration,
    _verbosity: VerbosityLevel,
    _use_color: bool,
) {
    println!(
        "\nSimulation Complete ({} ticks, {:.2}s real)",
        ticks,
        real_time.as_secs_f64()
    );
    summary.print();
}

fn save_metrics_json(
    summary: &liftsim::MetricsSummary,
    path: &PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    use serde_json::json;

    let json_data = json!({
        "requests": {
            "issued": summary.requests_issued,
            "admitted": summary.requests_admitted,
            "rejected": summary.requests_rejected,
            "served": summary.requests_served,
        },
        "wait_ticks": {
            "mean": summary.wait_mean,
            "p50": summary.wait_p50,
            "p90": summary.wait_p90,
            "p99": summary.wait_p99,
        },
        "movement": {
            "floors_traveled": summary.floors_traveled,
            "trips": summary.trips,
            "floors_per_trip": summary.floors_per_trip,
        },
        "state_occupancy": {
            "idle": summary.idle_share,
            "moving": summary.moving_share,
            "door_open": summary.door_open_share,
        },
        "total_ticks": summary.total_ticks,
    });

    std::fs::write(path, serde_json::to_string_pretty(&json_data)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(quiet: bool, verbose: bool, debug: bool) -> Args {
        Args {
            config: PathBuf::from("config.toml"),
            quiet,
            verbose,
            debug,
            no_color: false,
            output: None,
        }
    }

    #[test]
    fn test_verbosity_precedence() {
        assert_eq!(
            args(false, false, false).verbosity_level(),
            VerbosityLevel::Normal
        );
        assert_eq!(
            args(true, false, false).verbosity_level(),
            VerbosityLevel::Quiet
        );
        assert_eq!(
            args(false, true, false).verbosity_level(),
            VerbosityLevel::Verbose
        );

        // debug beats verbose beats quiet
        assert_eq!(
            args(true, true, false).verbosity_level(),
            VerbosityLevel::Verbose
        );
        assert_eq!(
            args(true, true, true).verbosity_level(),
            VerbosityLevel::Debug
        );
    }
}
