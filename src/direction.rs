use glam::{DVec2, IVec2};
use strum_macros::{Display, EnumIter};

/// A cardinal direction on the tile grid. Screen coordinates: `Up` is negative Y.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Direction {
    Up,
    Left,
    Down,
    Right,
}

impl Direction {
    /// Canonical enumeration order. Ghost tie-breaks depend on it, so it must not change.
    pub const DIRECTIONS: [Direction; 4] = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn as_ivec2(&self) -> IVec2 {
        (*self).into()
    }

    pub fn as_dvec2(&self) -> DVec2 {
        self.as_ivec2().as_dvec2()
    }

    /// True for `Left` and `Right`.
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// True when both directions move along the same axis (including equal directions).
    pub fn same_axis(&self, other: Direction) -> bool {
        self.is_horizontal() == other.is_horizontal()
    }
}

impl From<Direction> for IVec2 {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Up => -IVec2::Y,
            Direction::Down => IVec2::Y,
            Direction::Left => -IVec2::X,
            Direction::Right => IVec2::X,
        }
    }
}
