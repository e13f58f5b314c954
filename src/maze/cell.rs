use crossterm::style::{Color, Stylize};

use std::fmt;

/// State of a single cell in the grid.
///
/// Generators only ever write [`Cell::Wall`] and [`Cell::Path`]. Solvers additionally mark
/// the cells they touch, and the final trace marks the solution route.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    /// A blocked cell.
    Wall,
    /// An open cell not yet touched by a solver.
    #[default]
    Path,
    /// Discovered by a solver and still waiting in its frontier (or on its DFS stack).
    Active,
    /// Expanded by a solver, or abandoned by DFS backtracking.
    Dead,
    /// Part of the traced route.
    Found,
}

impl Cell {
    /// The width of each cell when rendered, in character widths.
    pub const CELL_WIDTH: u16 = 2;

    /// Whether a solver may step onto this cell at all.
    pub fn is_open(self) -> bool {
        self != Cell::Wall
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Cell::Wall => "⬜".with(Color::White),
            Cell::Path => "  ".with(Color::Reset),
            Cell::Active => "▒▒".with(Color::Red),
            Cell::Dead => "* ".with(Color::Blue),
            Cell::Found => "🟨".with(Color::Yellow),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Cell::CELL_WIDTH as usize,
                "Each cell must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_walls_are_closed() {
        assert!(!Cell::Wall.is_open());
        for cell in [Cell::Path, Cell::Active, Cell::Dead, Cell::Found] {
            assert!(cell.is_open(), "{:?} should be open", cell);
        }
    }

    #[test]
    fn test_default_cell_is_path() {
        assert_eq!(Cell::default(), Cell::Path);
    }
}
