/// Travel direction of the car
///
/// A signed tri-state, not a boolean: `Idle` is a legitimate rest value
/// distinct from both travel directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Down,
    Idle,
    Up,
}

impl Direction {
    /// Signed encoding used on the original hardware port (DOWN=-1, IDLE=0, UP=1)
    pub fn as_i8(&self) -> i8 {
        match self {
            Direction::Down => -1,
            Direction::Idle => 0,
            Direction::Up => 1,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Down => write!(f, "Down"),
            Direction::Idle => write!(f, "Idle"),
            Direction::Up => write!(f, "Up"),
        }
    }
}

/// Preferred sweep direction for the scan controller's tie-break
///
/// Unlike [`Direction`] this is a two-state input: when both sides of the
/// car have pending floors, the sweep starts on this side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepDirection {
    Up,
    Down,
}

impl SweepDirection {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "up" => Ok(SweepDirection::Up),
            "down" => Ok(SweepDirection::Down),
            _ => Err(format!("Unknown sweep direction: {}", s)),
        }
    }
}

impl Default for SweepDirection {
    fn default() -> Self {
        SweepDirection::Up
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_encoding() {
        assert_eq!(Direction::Down.as_i8(), -1);
        assert_eq!(Direction::Idle.as_i8(), 0);
        assert_eq!(Direction::Up.as_i8(), 1);
    }

    #[test]
    fn test_sweep_direction_from_str() {
        assert_eq!(SweepDirection::from_str("up").unwrap(), SweepDirection::Up);
        assert_eq!(SweepDirection::from_str("UP").unwrap(), SweepDirection::Up);
        assert_eq!(
            SweepDirection::from_str("down").unwrap(),
            SweepDirection::Down
        );
        assert!(SweepDirection::from_str("sideways").is_err());
    }
}
