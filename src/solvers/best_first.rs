//! Dijkstra, A* and greedy best-first share one expansion and differ only in the priority
//! read from the frontier.

use super::{FrontierItem, Search, Solver, Status, Vertex};
use crate::{
    containers::Queue,
    maze::{Cell, Direction, Grid},
};

/// Priority of a frontier vertex, lower first.
fn priority(solver: Solver, vertex: &Vertex) -> f32 {
    let cost = vertex.cost.map_or(f32::INFINITY, |c| c as f32);
    match solver {
        Solver::AStar => cost + vertex.estimate,
        Solver::GreedyBestFirst => vertex.estimate,
        Solver::Dijkstra | Solver::Dfs | Solver::Bfs => cost,
    }
}

/// Dequeues the frontier cell with the lowest priority. The goal ends the run; any other cell
/// is marked dead and every non-wall neighbour is relaxed: if the route through this cell is
/// strictly cheaper its cost, estimate and arrival direction are overwritten, and it joins the
/// frontier unless it is already there.
///
/// Greedy best-first ignores cost when ordering the frontier, so it keeps the first route to
/// each cell. Otherwise dead cells would be reopened and the run would not stay linear.
pub(super) fn step(
    grid: &mut Grid,
    search: &mut Search,
    frontier: &mut Queue<FrontierItem>,
) -> Status {
    let solver = search.solver;
    let vertices = &search.vertices;
    let Some(item) = frontier.priority_dequeue(|item| priority(solver, &vertices[item.vertex]))
    else {
        return Status::Exhausted;
    };
    search.vertices[item.vertex].in_queue = false;
    if item.coord == search.goal {
        return Status::Reached;
    }

    grid.set(item.coord, Cell::Dead);
    let cost = search.vertices[item.vertex].cost.unwrap_or_default() + 1;
    for direction in Direction::ALL {
        let (dx, dy) = direction.offset();
        let Some(next) = grid.neighbor(item.coord, dx, dy) else {
            continue;
        };
        if grid[next] == Cell::Wall {
            continue;
        }

        let index = search.vertices.index_of(next);
        let vertex = &mut search.vertices[index];
        if solver == Solver::GreedyBestFirst && vertex.is_discovered() {
            continue;
        }
        if vertex.cost.is_some_and(|known| known <= cost) {
            continue;
        }
        vertex.cost = Some(cost);
        vertex.arrived = Some(direction);
        vertex.estimate = search.heuristic.estimate(next, search.goal);

        if !vertex.in_queue {
            vertex.in_queue = true;
            grid.set(next, Cell::Active);
            frontier.enqueue(FrontierItem {
                coord: next,
                vertex: index,
            });
        }
    }

    if frontier.is_empty() {
        Status::Exhausted
    } else {
        Status::Running
    }
}

#[cfg(test)]
mod tests {
    use super::super::{Heuristic, SolverEngine};
    use super::*;
    use crate::{
        generators::{Generator, GeneratorEngine},
        rng::Pcg32,
    };

    #[test]
    fn test_priorities() {
        let vertex = Vertex {
            cost: Some(3),
            estimate: 4.5,
            arrived: None,
            in_queue: true,
        };
        assert_eq!(priority(Solver::Dijkstra, &vertex), 3.0);
        assert_eq!(priority(Solver::AStar, &vertex), 7.5);
        assert_eq!(priority(Solver::GreedyBestFirst, &vertex), 4.5);
    }

    #[test]
    fn test_greedy_heads_straight_for_the_goal() {
        // On an open grid greedy never expands a cell off the shortest route
        let mut grid = Grid::new(8, 8);
        let mut rng = Pcg32::default();
        let mut engine = SolverEngine::new();
        engine.init(&mut grid, Solver::GreedyBestFirst, Heuristic::Manhattan, &mut rng);
        let steps = engine.finish(&mut grid, &mut rng);
        assert_eq!(steps, 15);
        assert_eq!(engine.trace(&mut grid, Cell::Found), Some(14));
    }

    #[test]
    fn test_astar_expands_no_more_than_dijkstra() {
        let run = |solver| {
            let mut grid = Grid::new(15, 15);
            grid.set((3, 0), Cell::Wall);
            grid.set((3, 1), Cell::Wall);
            grid.set((3, 2), Cell::Wall);
            let mut rng = Pcg32::default();
            let mut engine = SolverEngine::new();
            engine.init(&mut grid, solver, Heuristic::Manhattan, &mut rng);
            let steps = engine.finish(&mut grid, &mut rng);
            (steps, engine.trace(&mut grid, Cell::Found))
        };

        let (dijkstra_steps, dijkstra_path) = run(Solver::Dijkstra);
        let (astar_steps, astar_path) = run(Solver::AStar);
        assert_eq!(dijkstra_path, Some(28));
        assert_eq!(astar_path, dijkstra_path);
        assert!(astar_steps <= dijkstra_steps);
    }

    #[test]
    fn test_greedy_keeps_the_first_route() {
        // .#...
        // ...#.
        // ..#..
        // ...#.
        // (0,3) is first reached the long way round and found cheaper after it is dead
        let mut grid = Grid::new(5, 4);
        for coord in [(1, 0), (3, 1), (2, 2), (3, 3)] {
            grid.set(coord, Cell::Wall);
        }
        let mut rng = Pcg32::default();
        let mut engine = SolverEngine::new();
        engine.init(&mut grid, Solver::GreedyBestFirst, Heuristic::Manhattan, &mut rng);
        assert_eq!(engine.finish(&mut grid, &mut rng), 15);
        assert_eq!(engine.trace(&mut grid, Cell::Found), Some(9));
    }

    #[test]
    fn test_greedy_steps_stay_within_the_cell_count() {
        for side in [9u16, 17, 33] {
            for seed in 0..20 {
                let mut rng = Pcg32::seeded(Some(seed));
                let mut grid = Grid::new(side, side);
                let mut generator = GeneratorEngine::new();
                generator.init(&mut grid, Generator::Random, &mut rng);
                generator.finish(&mut grid, &mut rng);

                let mut engine = SolverEngine::new();
                engine.init(&mut grid, Solver::GreedyBestFirst, Heuristic::Manhattan, &mut rng);
                let steps = engine.finish(&mut grid, &mut rng);
                let cells = side as usize * side as usize;
                assert!(steps <= cells, "{} steps on {}x{} seed {}", steps, side, side, seed);
            }
        }
    }
}
