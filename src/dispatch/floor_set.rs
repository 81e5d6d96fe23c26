/// Maximum number of floors any dispatcher supports
///
/// Matches the 4-bit floor port of the original hardware (floors 1..=15
/// usable there); one bit per floor fits in a single 16-bit word.
pub const MAX_FLOORS: u8 = 16;

/// Fixed-capacity set of floors, one bit per floor
///
/// Bit `f - 1` holds floor `f`. The fixed width is deliberate
/// bounded-resource design: the pending-request set of a building can
/// never grow past the floor count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FloorSet {
    bits: u16,
}

impl FloorSet {
    pub fn new() -> Self {
        Self { bits: 0 }
    }

    /// Build a set from a list of floors; out-of-capacity floors are ignored
    pub fn from_floors(floors: &[u8]) -> Self {
        let mut set = Self::new();
        for &f in floors {
            set.insert(f);
        }
        set
    }

    /// Raw bit image (bit 0 = floor 1)
    pub fn bits(&self) -> u16 {
        self.bits
    }

    pub fn insert(&mut self, floor: u8) {
        if (1..=MAX_FLOORS).contains(&floor) {
            self.bits |= 1 << (floor - 1);
        }
    }

    pub fn remove(&mut self, floor: u8) {
        if (1..=MAX_FLOORS).contains(&floor) {
            self.bits &= !(1 << (floor - 1));
        }
    }

    pub fn contains(&self, floor: u8) -> bool {
        (1..=MAX_FLOORS).contains(&floor) && self.bits & (1 << (floor - 1)) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn len(&self) -> u32 {
        self.bits.count_ones()
    }

    pub fn clear(&mut self) {
        self.bits = 0;
    }

    /// Any floor strictly above `floor`?
    pub fn any_above(&self, floor: u8) -> bool {
        if floor >= MAX_FLOORS {
            return false;
        }
        self.bits >> floor != 0
    }

    /// Any floor strictly below `floor`?
    pub fn any_below(&self, floor: u8) -> bool {
        if floor <= 1 {
            return false;
        }
        self.bits & ((1 << (floor - 1)) - 1) != 0
    }

    /// Floors newly raised relative to `prev` (rising edges)
    pub fn rising_edges(&self, prev: &FloorSet) -> FloorSet {
        FloorSet {
            bits: self.bits & !prev.bits,
        }
    }

    /// Iterate set floors in ascending order
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (1..=MAX_FLOORS).filter(|&f| self.contains(f))
    }
}

impl std::fmt::Display for FloorSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        for floor in self.iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{}", floor)?;
            first = false;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_remove_contains() {
        let mut set = FloorSet::new();
        assert!(set.is_empty());

        set.insert(1);
        set.insert(10);
        set.insert(16);
        assert!(set.contains(1));
        assert!(set.contains(10));
        assert!(set.contains(16));
        assert!(!set.contains(2));
        assert_eq!(set.len(), 3);

        set.remove(10);
        assert!(!set.contains(10));
        assert_eq!(set.len(), 2);
        // floors 1 and 16 -> bits 0 and 15
        assert_eq!(set.bits(), 0b1000_0000_0000_0001);
    }

    #[test]
    fn test_out_of_capacity_ignored() {
        let mut set = FloorSet::new();
        set.insert(0);
        set.insert(17);
        assert!(set.is_empty());
        assert!(!set.contains(0));
        assert!(!set.contains(17));
    }

    #[test]
    fn test_above_below() {
        let set = FloorSet::from_floors(&[3, 8]);

        assert!(set.any_above(5));
        assert!(set.any_below(5));
        assert!(set.any_above(3));
        assert!(!set.any_above(8));
        assert!(!set.any_below(3));
        assert!(set.any_below(8));

        // boundaries
        assert!(!set.any_below(1));
        assert!(!set.any_above(16));
    }

    #[test]
    fn test_rising_edges() {
        let prev = FloorSet::from_floors(&[2, 5]);
        let now = FloorSet::from_floors(&[2, 5, 7]);

        let edges = now.rising_edges(&prev);
        assert_eq!(edges, FloorSet::from_floors(&[7]));

        // held lines do not re-trigger
        let held = now.rising_edges(&now);
        assert!(held.is_empty());
    }

    #[test]
    fn test_iter_and_display() {
        let set = FloorSet::from_floors(&[4, 1, 9]);
        let floors: Vec<u8> = set.iter().collect();
        assert_eq!(floors, vec![1, 4, 9]);
        assert_eq!(set.to_string(), "{1, 4, 9}");
    }
}
