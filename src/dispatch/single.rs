use super::{ControllerState, Direction, Dispatcher, FloorSet, TickInput, TickOutput, MAX_FLOORS};

/// Single-target dispatch controller
///
/// Holds at most one outstanding request. Once a request is accepted the
/// car moves one floor per tick until arrival, opens the doors for
/// exactly one tick, then returns to idle. Everything else is rejected:
/// rejection is a same-tick boolean output, never an error, and
/// out-of-range floors are rejected rather than clamped.
///
/// Phase order within a tick is fixed: reset, accept, move, door. A
/// request accepted this tick does not move until the next tick; the
/// move phase only fires when the car was already moving when the tick
/// began. Test fixtures assert on cycle-by-cycle floor values, so the
/// one-tick lag must hold exactly.
pub struct SingleTargetDispatcher {
    num_floors: u8,
    home_floor: u8,

    floor: u8,
    state: ControllerState,
    direction: Direction,
    target: u8,
    has_target: bool,
    trips: u32,
}

impl SingleTargetDispatcher {
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
            target: 0,
            has_target: false,
            trips: 0,
        })
    }

    /// Target currently being traveled to, if any
    pub fn target(&self) -> Option<u8> {
        if self.has_target {
            Some(self.target)
        } else {
            None
        }
    }

    fn reset(&mut self) {
        self.floor = self.home_floor;
        self.state = ControllerState::Idle;
        self.direction = Direction::Idle;
        self.target = 0;
        self.has_target = false;
        self.trips = 0;
    }

    fn output(&self, accepted: bool) -> TickOutput {
        TickOutput {
            floor: self.floor,
            state: self.state,
            direction: self.direction,
            accepted,
            pending: self.pending(),
            trips: self.trips,
        }
    }

    fn assert_invariants(&self) {
        debug_assert!((1..=self.num_floors).contains(&self.floor));
        debug_assert!(self.has_target == (self.state == ControllerState::Moving));
        match self.state {
            ControllerState::Moving => debug_assert!(self.direction != Direction::Idle),
            ControllerState::Idle | ControllerState::DoorOpen => {
                debug_assert!(self.direction == Direction::Idle)
            }
        }
    }
}

impl Dispatcher for SingleTargetDispatcher {
    fn step(&mut self, input: &TickInput) -> TickOutput {
        // Reset wins; no other port is examined this tick.
        if input.reset {
            self.reset();
            return self.output(false);
        }

        // Movement this tick requires Moving to have been set before
        // the tick began, never by this tick's accept phase.
        let was_moving = self.has_target && self.state == ControllerState::Moving;

        // Accept phase
        let request = input.request;
        let mut accepted = false;
        if self.state == ControllerState::Idle
            && !self.has_target
            && request.valid
            && (1..=self.num_floors).contains(&request.floor)
            && request.floor != self.floor
        {
            self.target = request.floor;
            self.has_target = true;
            accepted = true;
            self.direction = if self.target > self.floor {
                Direction::Up
            } else {
                Direction::Down
            };
            self.state = ControllerState::Moving;
        }

        // Move phase
        let mut arrived = false;
        if was_moving {
            if self.floor < self.target {
                self.floor += 1;
                self.direction = Direction::Up;
            } else if self.floor > self.target {
                self.floor -= 1;
                self.direction = Direction::Down;
            }
            if self.floor == self.target {
                self.state = ControllerState::DoorOpen;
                self.direction = Direction::Idle;
                self.has_target = false;
                self.trips += 1;
                arrived = true;
            }
        }

        // Door phase: dwell is exactly one tick
        if !arrived && self.state == ControllerState::DoorOpen {
            self.state = ControllerState::Idle;
        }

        self.assert_invariants();
        self.output(accepted)
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
        let mut pending = FloorSet::new();
        if self.has_target {
            pending.insert(self.target);
        }
        pending
    }

    fn trips(&self) -> u32 {
        self.trips
    }

    fn num_floors(&self) -> u8 {
        self.num_floors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatcher() -> SingleTargetDispatcher {
        SingleTargetDispatcher::new(10).unwrap()
    }

    #[test]
    fn test_construction_bounds() {
        assert!(SingleTargetDispatcher::new(1).is_err());
        assert!(SingleTargetDispatcher::new(17).is_err());
        assert!(SingleTargetDispatcher::new(2).is_ok());
        assert!(SingleTargetDispatcher::new(16).is_ok());
        assert!(SingleTargetDispatcher::with_home(10, 0).is_err());
        assert!(SingleTargetDispatcher::with_home(10, 11).is_err());
    }

    #[test]
    fn test_initial_state() {
        let d = dispatcher();
        assert_eq!(d.floor(), 1);
        assert_eq!(d.state(), ControllerState::Idle);
        assert_eq!(d.direction(), Direction::Idle);
        assert_eq!(d.target(), None);
    }

    #[test]
    fn test_request_floor_3_cycle_by_cycle() {
        let mut d = dispatcher();

        // Tick 1: accepted, no movement yet (one-tick lag)
        let out = d.step(&TickInput::request(3));
        assert!(out.accepted);
        assert_eq!(out.floor, 1);
        assert_eq!(out.state, ControllerState::Moving);
        assert_eq!(out.direction, Direction::Up);

        // Tick 2: one floor up
        let out = d.step(&TickInput::quiet());
        assert_eq!(out.floor, 2);
        assert_eq!(out.state, ControllerState::Moving);

        // Tick 3: arrival, doors open
        let out = d.step(&TickInput::quiet());
        assert_eq!(out.floor, 3);
        assert_eq!(out.state, ControllerState::DoorOpen);
        assert_eq!(out.direction, Direction::Idle);

        // Tick 4: dwell over, back to idle
        let out = d.step(&TickInput::quiet());
        assert_eq!(out.state, ControllerState::Idle);
        assert_eq!(out.floor, 3);
    }

    #[test]
    fn test_downward_travel() {
        let mut d = SingleTargetDispatcher::with_home(10, 5).unwrap();

        let out = d.step(&TickInput::request(2));
        assert!(out.accepted);
        assert_eq!(out.direction, Direction::Down);
        assert_eq!(out.floor, 5);

        let out = d.step(&TickInput::quiet());
        assert_eq!(out.floor, 4);
        assert_eq!(out.direction, Direction::Down);
        let out = d.step(&TickInput::quiet());
        assert_eq!(out.floor, 3);
        let out = d.step(&TickInput::quiet());
        assert_eq!(out.floor, 2);
        assert_eq!(out.state, ControllerState::DoorOpen);
    }

    #[test]
    fn test_monotonic_approach() {
        let mut d = dispatcher();
        d.step(&TickInput::request(8));

        let mut prev_distance = 7i16;
        loop {
            let out = d.step(&TickInput::quiet());
            let distance = (8i16 - out.floor as i16).abs();
            assert_eq!(distance, prev_distance - 1);
            prev_distance = distance;
            if distance == 0 {
                break;
            }
        }
        assert_eq!(d.state(), ControllerState::DoorOpen);
    }

    #[test]
    fn test_reject_floor_zero() {
        let mut d = dispatcher();
        let out = d.step(&TickInput::request(0));
        assert!(!out.accepted);
        assert_eq!(out.floor, 1);
        assert_eq!(out.state, ControllerState::Idle);
    }

    #[test]
    fn test_reject_floor_above_range() {
        let mut d = dispatcher();
        let out = d.step(&TickInput::request(11));
        assert!(!out.accepted);
        assert_eq!(out.state, ControllerState::Idle);
    }

    #[test]
    fn test_reject_current_floor() {
        let mut d = dispatcher();
        let out = d.step(&TickInput::request(1));
        assert!(!out.accepted);
        assert_eq!(out.state, ControllerState::Idle);
    }

    #[test]
    fn test_reject_invalid_strobe() {
        let mut d = dispatcher();
        let mut input = TickInput::request(3);
        input.request.valid = false;
        let out = d.step(&input);
        assert!(!out.accepted);
        assert_eq!(out.state, ControllerState::Idle);
    }

    #[test]
    fn test_reject_while_busy() {
        let mut d = dispatcher();
        assert!(d.step(&TickInput::request(5)).accepted);

        // Moving: further requests rejected without disturbing travel
        let out = d.step(&TickInput::request(2));
        assert!(!out.accepted);
        assert_eq!(out.floor, 2);
        assert_eq!(d.target(), Some(5));

        // DoorOpen: still rejected
        d.step(&TickInput::quiet());
        d.step(&TickInput::quiet());
        let out = d.step(&TickInput::quiet());
        assert_eq!(out.state, ControllerState::DoorOpen);
        let out = d.step(&TickInput::request(2));
        assert!(!out.accepted);
        assert_eq!(out.state, ControllerState::Idle);

        // Idle again: now accepted
        assert!(d.step(&TickInput::request(2)).accepted);
    }

    #[test]
    fn test_reset_idempotence() {
        let mut d = dispatcher();
        d.step(&TickInput::request(7));
        d.step(&TickInput::quiet());
        d.step(&TickInput::quiet());

        let out = d.step(&TickInput::reset());
        assert!(!out.accepted);
        assert_eq!(out.floor, 1);
        assert_eq!(out.state, ControllerState::Idle);
        assert_eq!(out.direction, Direction::Idle);
        assert_eq!(out.trips, 0);
        assert_eq!(d.target(), None);

        // Reset again from the reset state: identical
        let out = d.step(&TickInput::reset());
        assert_eq!(out.floor, 1);
        assert_eq!(out.state, ControllerState::Idle);
    }

    #[test]
    fn test_reset_ignores_other_inputs() {
        let mut d = dispatcher();
        let mut input = TickInput::request(4);
        input.reset = true;
        let out = d.step(&input);
        assert!(!out.accepted);
        assert_eq!(d.target(), None);
    }

    #[test]
    fn test_door_dwell_is_one_tick() {
        let mut d = dispatcher();
        d.step(&TickInput::request(2));
        let out = d.step(&TickInput::quiet());
        assert_eq!(out.state, ControllerState::DoorOpen);
        let out = d.step(&TickInput::quiet());
        assert_eq!(out.state, ControllerState::Idle);
    }

    #[test]
    fn test_trip_counter() {
        let mut d = dispatcher();
        d.step(&TickInput::request(3));
        d.step(&TickInput::quiet());
        let out = d.step(&TickInput::quiet());
        assert_eq!(out.trips, 1);

        d.step(&TickInput::quiet()); // door closes
        d.step(&TickInput::request(1));
        d.step(&TickInput::quiet());
        let out = d.step(&TickInput::quiet());
        assert_eq!(out.trips, 2);
    }

    #[test]
    fn test_pending_reflects_held_target() {
        let mut d = dispatcher();
        assert!(d.pending().is_empty());
        d.step(&TickInput::request(6));
        assert!(d.pending().contains(6));
        assert_eq!(d.pending().len(), 1);
    }
}
