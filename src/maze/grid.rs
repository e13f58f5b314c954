use std::fmt;

use super::{Coord, cell::Cell};
use crate::error::DimensionError;

/// A change to the grid, recorded for renderers that only redraw what changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridEvent {
    /// Every cell was overwritten with `cell`.
    Filled { cell: Cell },
    /// A single cell changed from `old` to `new`.
    Update { coord: Coord, old: Cell, new: Cell },
}

/// Flat `width × height` buffer of cell states. Walls are cells too.
pub struct Grid {
    data: Box<[Cell]>,
    width: u16,
    height: u16,
    /// Pending change events. `None` when nobody is listening.
    events: Option<Vec<GridEvent>>,
}

impl Grid {
    /// Largest side accepted by [`Grid::validate_lattice`].
    pub const MAX_SIDE: u16 = 1023;

    /// Creates a grid filled with [`Cell::Path`].
    ///
    /// Panics if either dimension is 0.
    pub fn new(width: u16, height: u16) -> Self {
        assert!(
            width > 0 && height > 0,
            "Grid dimensions must be non-zero (got {}x{})",
            width,
            height
        );
        let data = vec![Cell::Path; width as usize * height as usize].into_boxed_slice();
        Grid {
            data,
            width,
            height,
            events: None,
        }
    }

    /// Checks that the dimensions can host the odd lattice used by the stride-2 generators:
    /// both sides odd, at least 3 and at most [`Grid::MAX_SIDE`].
    pub fn validate_lattice(width: u16, height: u16) -> Result<(), DimensionError> {
        for (side, value) in [("width", width), ("height", height)] {
            if value < 3 {
                return Err(DimensionError::TooSmall { side, value });
            }
            if value > Grid::MAX_SIDE {
                return Err(DimensionError::TooLarge {
                    side,
                    value,
                    max: Grid::MAX_SIDE,
                });
            }
            if value % 2 == 0 {
                return Err(DimensionError::Even { side, value });
            }
        }
        Ok(())
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    /// Raw cell states, row-major.
    pub fn cells(&self) -> &[Cell] {
        &self.data
    }

    /// Number of cells currently in the given state.
    pub fn count(&self, cell: Cell) -> usize {
        self.data.iter().filter(|&&c| c == cell).count()
    }

    pub fn is_in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32
    }

    /// The cell `(dx, dy)` away from `coord`, if it lies inside the grid.
    pub fn neighbor(&self, coord: Coord, dx: i32, dy: i32) -> Option<Coord> {
        let x = coord.0 as i32 + dx;
        let y = coord.1 as i32 + dy;
        self.is_in_bounds(x, y).then_some((x as u16, y as u16))
    }

    fn ravel_index(&self, x: u16, y: u16) -> usize {
        assert!(
            x < self.width && y < self.height,
            "Coordinate ({}, {}) is out of bounds for a {}x{} grid",
            x,
            y,
            self.width,
            self.height
        );
        // Overflow-safe since width and height are u16 (assuming usize is at least 32 bits)
        y as usize * self.width as usize + x as usize
    }

    pub fn set(&mut self, coord: Coord, cell: Cell) {
        let idx = self.ravel_index(coord.0, coord.1);
        let old = self.data[idx];
        if old != cell {
            self.data[idx] = cell;
            if let Some(events) = &mut self.events {
                events.push(GridEvent::Update {
                    coord,
                    old,
                    new: cell,
                });
            }
        }
    }

    /// Overwrites every cell with `cell`.
    pub fn fill(&mut self, cell: Cell) {
        self.data.fill(cell);
        if let Some(events) = &mut self.events {
            // Everything before a fill is obsolete
            events.clear();
            events.push(GridEvent::Filled { cell });
        }
    }

    /// Turns every non-wall cell back into [`Cell::Path`], keeping the walls.
    pub fn clear_paths(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                if self[(x, y)].is_open() {
                    self.set((x, y), Cell::Path);
                }
            }
        }
    }

    /// Starts or stops recording [`GridEvent`]s. Stopping discards pending events.
    pub fn record_events(&mut self, enabled: bool) {
        self.events = enabled.then(Vec::new);
    }

    /// Takes all events recorded since the last call.
    pub fn drain_events(&mut self) -> Vec<GridEvent> {
        self.events.as_mut().map(std::mem::take).unwrap_or_default()
    }
}

impl std::ops::Index<Coord> for Grid {
    type Output = Cell;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.data[self.ravel_index(index.0, index.1)]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.data.chunks(self.width as usize) {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
