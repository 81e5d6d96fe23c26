pub mod config;
pub mod dispatch;
pub mod metrics;
pub mod request;
pub mod simulation;

// Re-export key types
pub use config::Config;
pub use dispatch::{
    ControllerState, DispatchVariant, Dispatcher, Direction, FloorSet, ScanDispatcher,
    SingleTargetDispatcher, SweepDirection, TickInput, TickOutput,
};
pub use metrics::{MetricsCollector, MetricsSummary};
pub use request::{FloorRequest, TrafficGenerator};
pub use simulation::Simulator;
