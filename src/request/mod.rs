pub mod generator;
pub mod request;

pub use generator::TrafficGenerator;
pub use request::FloorRequest;
