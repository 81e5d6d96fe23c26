use super::{ControllerState, Direction, Dispatcher, FloorSet, TickInput, TickOutput, MAX_FLOORS};

/// Multi-request scan dispatch controller
///
/// Pending floors accumulate in a fixed-capacity bitset and are serviced
/// in directional sweeps: the car keeps traveling in its current
/// direction and stops at the *next* pending floor ahead (not the
/// furthest), reversing or idling only when nothing remains ahead. When
/// the car is idle with work on both sides, the caller-supplied
/// preferred direction decides; there is no distance heuristic.
///
/// Request lines are edge-triggered: only the first tick a line is newly
/// high admits its floor, and a line held high does not re-trigger.
/// A floor's bit is cleared exactly when the car enters `DoorOpen` at
/// that floor. The trip counter increments once per contiguous `Moving`
/// run that ends, counting trips rather than floors.
pub struct ScanDispatcher {
    num_floors: u8,
    home_floor: u8,

    floor: u8,
    state: ControllerState,
    direction: Direction,
    pending: FloorSet,
    prev_lines: FloorSet,
    trips: u32,
}

impl ScanDispatcher {
    pub fn new(num_floors: u8) -> Result<Self, String> {
        Self::with_home(num_floors, 1)
    }

    /// Build a controller whose rest position (and reset position) is
    /// `home_floor` rather than floor 1
    pub fn with_home(num_floors: u8, home_floor: u8) -> Result<Self, String> {
        if !(2..=MAX_FLOORS).contains(&num_floors) {
            return Err(format!(
                "num_floors must be in [2, {}], got {}",
                MAX_FLOORS, num_floors
            ));
        }
        if !(1..=num_floors).contains(&home_floor) {
            return Err(format!(
                "home_floor must be in [1, {}], got {}",
                num_floors, home_floor
            ));
        }
        Ok(Self {
            num_floors,
            home_floor,
            floor: home_floor,
            state: ControllerState::Idle,
            direction: Direction::Idle,
            pending: FloorSet::new(),
            prev_lines: FloorSet::new(),
            trips: 0,
        })
    }

    fn reset(&mut self) {
        self.floor = self.home_floor;
        self.state = ControllerState::Idle;
        self.direction = Direction::Idle;
        self.pending.clear();
        // Line history is forgotten too: lines held through a reset
        // look like fresh edges on the following tick.
        self.prev_lines.clear();
        self.trips = 0;
    }

    /// Admit rising edges; a floor equal to the car's current position
    /// is already satisfied and never admitted.
    fn admit(&mut self, lines: FloorSet) -> bool {
        let edges = lines.rising_edges(&self.prev_lines);
        self.prev_lines = lines;

        let mut admitted = false;
        for f in edges.iter() {
            if f <= self.num_floors && f != self.floor {
                self.pending.insert(f);
                admitted = true;
            }
        }
        admitted
    }

    fn enter_door_open(&mut self) {
        self.pending.remove(self.floor);
        self.state = ControllerState::DoorOpen;
        self.direction = Direction::Idle;
    }

    fn output(&self, accepted: bool) -> TickOutput {
        TickOutput {
            floor: self.floor,
            state: self.state,
            direction: self.direction,
            accepted,
            pending: self.pending,
            trips: self.trips,
        }
    }

    fn assert_invariants(&self) {
        debug_assert!((1..=self.num_floors).contains(&self.floor));
        match self.state {
            ControllerState::Moving => debug_assert!(self.direction != Direction::Idle),
            ControllerState::Idle | ControllerState::DoorOpen => {
                debug_assert!(self.direction == Direction::Idle)
            }
        }
    }

    /// Test-only state injection, for arms normal admission cannot reach
    #[cfg(test)]
    fn seed(&mut self, floor: u8, state: ControllerState, direction: Direction, pending: &[u8]) {
        self.floor = floor;
        self.state = state;
        self.direction = direction;
        self.pending = FloorSet::from_floors(pending);
    }
}

impl Dispatcher for ScanDispatcher {
    fn step(&mut self, input: &TickInput) -> TickOutput {
        // Reset wins; no other port is examined this tick.
        if input.reset {
            self.reset();
            return self.output(false);
        }

        let admitted = self.admit(input.request_lines);

        match self.state {
            ControllerState::Idle => {
                if !self.pending.is_empty() {
                    let above = self.pending.any_above(self.floor);
                    let below = self.pending.any_below(self.floor);
                    let start = match input.preferred_direction {
                        super::SweepDirection::Up => {
                            if above {
                                Some(Direction::Up)
                            } else if below {
                                Some(Direction::Down)
                            } else {
                                None
                            }
                        }
                        super::SweepDirection::Down => {
                            if below {
                                Some(Direction::Down)
                            } else if above {
                                Some(Direction::Up)
                            } else {
                                None
                            }
                        }
                    };
                    match start {
                        Some(direction) => {
                            self.state = ControllerState::Moving;
                            self.direction = direction;
                        }
                        // The only pending floor is the current one:
                        // already arrived, open straight away.
                        None => self.enter_door_open(),
                    }
                }
            }
            ControllerState::Moving => {
                let ahead = match self.direction {
                    Direction::Up => self.pending.any_above(self.floor),
                    Direction::Down => self.pending.any_below(self.floor),
                    Direction::Idle => unreachable!("moving with idle direction"),
                };
                if !ahead {
                    // Sweep exhausted without an arrival
                    self.state = ControllerState::Idle;
                    self.direction = Direction::Idle;
                    self.trips += 1;
                } else {
                    self.floor = self.floor.wrapping_add_signed(self.direction.as_i8());
                    if self.pending.contains(self.floor) {
                        self.enter_door_open();
                        self.trips += 1;
                    }
                }
            }
            ControllerState::DoorOpen => {
                if input.door_close {
                    self.state = ControllerState::Idle;
                }
            }
        }

        self.assert_invariants();
        self.output(admitted)
    }

    fn floor(&self) -> u8 {
        self.floor
    }

    fn state(&self) -> ControllerState {
        self.state
    }

    fn direction(&self) -> Direction {
        self.direction
    }

    fn pending(&self) -> FloorSet {
        self.pending
    }

    fn trips(&self) -> u32 {
        self.trips
    }

    fn num_floors(&self) -> u8 {
        self.num_floors
    }
}
