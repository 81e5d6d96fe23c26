pub mod direction;
pub mod floor_set;
pub mod scan;
pub mod single;
pub mod state;

pub use direction::{Direction, SweepDirection};
pub use floor_set::{FloorSet, MAX_FLOORS};
pub use scan::ScanDispatcher;
pub use single::SingleTargetDispatcher;
pub use state::ControllerState;

use crate::request::FloorRequest;

/// Which dispatcher implementation a deployment runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchVariant {
    /// At most one outstanding target at a time
    SingleTarget,
    /// Pending-request bitset serviced in directional sweeps
    Scan,
}

impl DispatchVariant {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "single" | "single_target" => Ok(DispatchVariant::SingleTarget),
            "scan" => Ok(DispatchVariant::Scan),
            _ => Err(format!("Unknown dispatch variant: {}", s)),
        }
    }
}

/// All per-tick input ports
///
/// One struct serves both dispatcher variants; each variant reads the
/// ports it has and ignores the rest, so callers are interchangeable.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Synchronous reset; wins over every other port this tick
    pub reset: bool,

    /// Single-target request line (floor + valid strobe)
    pub request: FloorRequest,

    /// Per-floor request lines, level-sensitive; the scan dispatcher
    /// admits floors on rising edges only
    pub request_lines: FloorSet,

    /// Door-close signal (scan variant)
    pub door_close: bool,

    /// Sweep tie-break when work is pending on both sides (scan variant)
    pub preferred_direction: SweepDirection,
}

impl TickInput {
    /// A tick with no input activity
    pub fn quiet() -> Self {
        Self::default()
    }

    /// A tick asserting the synchronous reset
    pub fn reset() -> Self {
        Self {
            reset: true,
            ..Self::default()
        }
    }

    /// A tick strobing the single-target request line for `floor`
    pub fn request(floor: u8) -> Self {
        Self {
            request: FloorRequest::to(floor),
            ..Self::default()
        }
    }

    /// A tick with the given request lines held high
    pub fn lines(lines: FloorSet) -> Self {
        Self {
            request_lines: lines,
            ..Self::default()
        }
    }

    pub fn with_door_close(mut self) -> Self {
        self.door_close = true;
        self
    }

    pub fn with_preferred(mut self, preferred: SweepDirection) -> Self {
        self.preferred_direction = preferred;
        self
    }
}

/// All per-tick output ports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutput {
    pub floor: u8,
    pub state: ControllerState,
    pub direction: Direction,

    /// Single-target: this tick's request was accepted.
    /// Scan: at least one floor was newly admitted this tick.
    pub accepted: bool,

    /// Pending-request set after this tick (single-target: the held
    /// target, if any)
    pub pending: FloorSet,

    /// Completed movement runs so far (trips, not floors)
    pub trips: u32,
}

impl TickOutput {
    pub fn moving_up(&self) -> bool {
        self.state == ControllerState::Moving && self.direction == Direction::Up
    }

    pub fn moving_down(&self) -> bool {
        self.state == ControllerState::Moving && self.direction == Direction::Down
    }

    pub fn door_open(&self) -> bool {
        self.state == ControllerState::DoorOpen
    }
}

/// One synchronous dispatch step per tick, plus state accessors
///
/// Exactly one `step` advances the controller by one tick; everything a
/// tick triggers completes within that call. Callers serialize ticks.
pub trait Dispatcher {
    fn step(&mut self, input: &TickInput) -> TickOutput;

    fn floor(&self) -> u8;
    fn state(&self) -> ControllerState;
    fn direction(&self) -> Direction;
    fn pending(&self) -> FloorSet;
    fn trips(&self) -> u32;
    fn num_floors(&self) -> u8;
}
