/// A floor request as presented on the single-target request port
///
/// `floor` is deliberately a raw, unvalidated number: the controller
/// itself decides whether it is in range. `valid` is the strobe; with
/// `valid` low the floor value is ignored entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FloorRequest {
    pub floor: u8,
    pub valid: bool,
}

impl FloorRequest {
    /// A request line that is not asserted this tick
    pub fn none() -> Self {
        Self {
            floor: 0,
            valid: false,
        }
    }

    /// An asserted request for `floor`
    pub fn to(floor: u8) -> Self {
        Self { floor, valid: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let req = FloorRequest::to(7);
        assert_eq!(req.floor, 7);
        assert!(req.valid);

        let none = FloorRequest::none();
        assert!(!none.valid);
        assert_eq!(none, FloorRequest::default());
    }
}
