//! Cell observations and neighbour summaries

/// What a neighbour lookup sees at a coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellState {
    Active,
    Inactive,
    /// No cell there. Only bounded worlds report this.
    OutOfBounds,
}

impl CellState {
    pub fn from_live(live: bool) -> Self {
        if live {
            CellState::Active
        } else {
            CellState::Inactive
        }
    }

    pub fn is_active(self) -> bool {
        self == CellState::Active
    }
}

/// The eight neighbour observations of a cell, clockwise from north-west:
/// NW, N, NE, E, SE, S, SW, W.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NeighbourSummary(pub [CellState; 8]);

impl NeighbourSummary {
    pub const NORTH_WEST: usize = 0;
    pub const NORTH: usize = 1;
    pub const NORTH_EAST: usize = 2;
    pub const EAST: usize = 3;
    pub const SOUTH_EAST: usize = 4;
    pub const SOUTH: usize = 5;
    pub const SOUTH_WEST: usize = 6;
    pub const WEST: usize = 7;

    /// A summary where every neighbour is dead
    pub fn empty() -> Self {
        Self([CellState::Inactive; 8])
    }

    /// Number of live neighbours; out-of-bounds slots never count
    pub fn live_count(&self) -> u8 {
        self.0.iter().filter(|state| state.is_active()).count() as u8
    }

    /// Number of neighbours in the given state
    pub fn count(&self, expected: CellState) -> u8 {
        self.0.iter().filter(|&&state| state == expected).count() as u8
    }

    pub fn states(&self) -> &[CellState; 8] {
        &self.0
    }
}

impl Default for NeighbourSummary {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<[CellState; 8]> for NeighbourSummary {
    fn from(states: [CellState; 8]) -> Self {
        Self(states)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CellState::*;

    #[test]
    fn test_live_count_ignores_out_of_bounds() {
        #[rustfmt::skip]
        let summary = NeighbourSummary([
            OutOfBounds, OutOfBounds, OutOfBounds, Active,
            Active, Inactive, OutOfBounds, OutOfBounds,
        ]);
        assert_eq!(summary.live_count(), 2);
        assert_eq!(summary.count(OutOfBounds), 5);
        assert_eq!(summary.count(Inactive), 1);
    }

    #[test]
    fn test_empty_summary() {
        assert_eq!(NeighbourSummary::empty().live_count(), 0);
        assert_eq!(NeighbourSummary::default(), NeighbourSummary::empty());
    }

    #[test]
    fn test_from_live() {
        assert_eq!(CellState::from_live(true), Active);
        assert_eq!(CellState::from_live(false), Inactive);
    }
}
