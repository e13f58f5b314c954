pub mod cell;
pub mod grid;

pub use cell::Cell;
pub use grid::{Grid, GridEvent};

/// `(x, y)` position in a [`Grid`].
pub type Coord = (u16, u16);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// The four moves shared by every generator and solver.
///
/// `Bottom` decreases `y` and `Top` increases it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Bottom,
    Top,
}

impl Direction {
    /// The canonical, unshuffled order.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Bottom,
        Direction::Top,
    ];

    /// Unit offset `(dx, dy)` of a single move in this direction.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Bottom => (0, -1),
            Direction::Top => (0, 1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Bottom => Direction::Top,
            Direction::Top => Direction::Bottom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_cancels_offset() {
        for dir in Direction::ALL {
            let (dx, dy) = dir.offset();
            let (ox, oy) = dir.opposite().offset();
            assert_eq!((dx + ox, dy + oy), (0, 0));
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn test_bottom_moves_towards_row_zero() {
        let grid = Grid::new(3, 3);
        let (dx, dy) = Direction::Bottom.offset();
        assert_eq!(grid.neighbor((1, 1), dx, dy), Some((1, 0)));
        assert_eq!(grid.neighbor((1, 0), dx, dy), None);
    }
}
