/// Controller state of the car
///
/// Exactly one is active per tick. `Moving` implies a non-idle direction;
/// `Idle` and `DoorOpen` imply an idle direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// Car at rest, doors closed
    Idle,
    /// Car traveling one floor per tick toward pending work
    Moving,
    /// Doors open at the current floor
    DoorOpen,
}

impl std::fmt::Display for ControllerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControllerState::Idle => write!(f, "Idle"),
            ControllerState::Moving => write!(f, "Moving"),
            ControllerState::DoorOpen => write!(f, "DoorOpen"),
        }
    }
}
