use crate::{
    containers::Stack,
    generators::{Edge, Frame},
    maze::{Cell, Coord, Grid},
    rng::MazeRng,
};

/// Frontier edges of randomized Prim: each one leads from a carved room to a room that was
/// uncarved when the edge was added.
#[derive(Debug)]
pub struct Worklist {
    edges: Vec<Edge>,
}

impl Worklist {
    /// Appends the in-bounds edges out of `from`, in up, down, right, left order.
    fn extend_from(&mut self, grid: &Grid, from: Coord) {
        for (dx, dy) in [(0, 2), (0, -2), (2, 0), (-2, 0)] {
            if let Some(to) = grid.neighbor(from, dx, dy) {
                self.edges.push(Edge { from, to });
            }
        }
    }
}

pub(super) fn init(grid: &mut Grid, stack: &mut Stack<Frame>) {
    grid.fill(Cell::Wall);

    let origin = (0, 0);
    grid.set(origin, Cell::Path);

    let (rooms_x, rooms_y) = ((grid.width() / 2) as usize, (grid.height() / 2) as usize);
    let mut worklist = Worklist {
        edges: Vec::with_capacity(rooms_x * rooms_y * 2 + rooms_x + rooms_y),
    };
    for (dx, dy) in [(2, 0), (0, 2)] {
        if let Some(to) = grid.neighbor(origin, dx, dy) {
            worklist.edges.push(Edge { from: origin, to });
        }
    }
    stack.push(Frame::Prim(worklist));
}

/// Removes one uniformly chosen edge. If it still leads to an uncarved room the room and
/// the passage are carved and the room's outgoing edges join the worklist.
pub(super) fn step<R: MazeRng>(
    grid: &mut Grid,
    mut worklist: Worklist,
    stack: &mut Stack<Frame>,
    rng: &mut R,
) {
    if !worklist.edges.is_empty() {
        let i = rng.next_u32() as usize % worklist.edges.len();
        let edge = worklist.edges.swap_remove(i);
        if grid[edge.to] != Cell::Path {
            grid.set(edge.midpoint(), Cell::Path);
            grid.set(edge.to, Cell::Path);
            worklist.extend_from(grid, edge.to);
        }
    }

    if worklist.edges.is_empty() {
        tracing::debug!("Prim worklist exhausted, releasing it");
    } else {
        stack.push(Frame::Prim(worklist));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Pcg32;

    #[test]
    fn test_init_seeds_edges_out_of_origin() {
        let mut grid = Grid::new(7, 5);
        let mut stack = Stack::new();
        init(&mut grid, &mut stack);

        let Some(Frame::Prim(worklist)) = stack.pop() else {
            panic!("expected a Prim frame");
        };
        let targets: Vec<Coord> = worklist.edges.iter().map(|e| e.to).collect();
        assert_eq!(targets, vec![(2, 0), (0, 2)]);
        assert_eq!(grid.count(Cell::Path), 1);
    }

    #[test]
    fn test_extend_skips_out_of_bounds() {
        let grid = Grid::new(5, 5);
        let mut worklist = Worklist { edges: Vec::new() };
        worklist.extend_from(&grid, (4, 0));
        let targets: Vec<Coord> = worklist.edges.iter().map(|e| e.to).collect();
        assert_eq!(targets, vec![(4, 2), (2, 0)]);
    }

    #[test]
    fn test_runs_to_a_spanning_tree() {
        let mut grid = Grid::new(9, 7);
        let mut stack = Stack::new();
        let mut rng = Pcg32::seeded(Some(5));
        init(&mut grid, &mut stack);
        while let Some(Frame::Prim(worklist)) = stack.pop() {
            step(&mut grid, worklist, &mut stack, &mut rng);
        }
        // 5x4 rooms joined by 19 passages
        assert_eq!(grid.count(Cell::Path), 39);
    }
}
