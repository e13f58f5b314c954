use super::{FrontierItem, Search, Status};
use crate::{
    containers::Queue,
    maze::{Cell, Direction, Grid},
};

/// Dequeues the oldest frontier cell. The goal ends the run; any other cell is marked dead and
/// its open [`Cell::Path`] neighbours are recorded, marked active and queued.
pub(super) fn step(
    grid: &mut Grid,
    search: &mut Search,
    frontier: &mut Queue<FrontierItem>,
) -> Status {
    let Some(item) = frontier.dequeue() else {
        return Status::Exhausted;
    };
    search.vertices[item.vertex].in_queue = false;
    if item.coord == search.goal {
        return Status::Reached;
    }

    grid.set(item.coord, Cell::Dead);
    let cost = search.vertices[item.vertex].cost.map(|c| c + 1);
    for direction in Direction::ALL {
        let (dx, dy) = direction.offset();
        let Some(next) = grid.neighbor(item.coord, dx, dy) else {
            continue;
        };
        if grid[next] != Cell::Path {
            continue;
        }

        let index = search.vertices.index_of(next);
        let vertex = &mut search.vertices[index];
        vertex.cost = cost;
        vertex.arrived = Some(direction);
        vertex.in_queue = true;
        grid.set(next, Cell::Active);
        frontier.enqueue(FrontierItem {
            coord: next,
            vertex: index,
        });
    }

    if frontier.is_empty() {
        Status::Exhausted
    } else {
        Status::Running
    }
}

#[cfg(test)]
mod tests {
    use super::super::{Heuristic, Solver, SolverEngine};
    use super::*;
    use crate::rng::Pcg32;

    #[test]
    fn test_expands_in_first_in_first_out_order() {
        let mut grid = Grid::new(3, 3);
        let mut rng = Pcg32::default();
        let mut engine = SolverEngine::new();
        engine.init(&mut grid, Solver::Bfs, Heuristic::Manhattan, &mut rng);

        // Start expands to its right and top neighbours
        assert!(engine.step(&mut grid, &mut rng));
        assert_eq!(grid[(0, 0)], Cell::Dead);
        assert_eq!(grid[(1, 0)], Cell::Active);
        assert_eq!(grid[(0, 1)], Cell::Active);
        assert_eq!(engine.pending(), 2);

        // (1, 0) was queued first
        assert!(engine.step(&mut grid, &mut rng));
        assert_eq!(grid[(1, 0)], Cell::Dead);
        assert_eq!(grid[(0, 1)], Cell::Active);
    }

    #[test]
    fn test_path_length_counts_moves() {
        let mut grid = Grid::new(7, 3);
        let mut rng = Pcg32::default();
        let mut engine = SolverEngine::new();
        engine.init(&mut grid, Solver::Bfs, Heuristic::Manhattan, &mut rng);
        engine.finish(&mut grid, &mut rng);
        assert_eq!(engine.trace(&mut grid, Cell::Found), Some(8));
        assert_eq!(grid.count(Cell::Found), 9);
    }
}
