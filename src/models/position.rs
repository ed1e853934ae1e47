/// A cell on the 8x8 colony map.
/// Values range 0-7. (0,0) is the Colony Hub in the upper-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GridPosition {
    pub row: usize,
    pub col: usize,
}

impl GridPosition {
    pub const HUB: GridPosition = GridPosition { row: 0, col: 0 };

    pub const fn new(row: usize, col: usize) -> Self {
        GridPosition { row, col }
    }
}
