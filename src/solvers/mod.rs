//! Maze solvers as resumable state machines.
//!
//! A run searches from the top-left cell to the bottom-right one. Each [`SolverEngine::step`]
//! expands exactly one cell, painting discovered cells [`Cell::Active`] and expanded ones
//! [`Cell::Dead`]. Once a step reports the run is over, [`SolverEngine::trace`] walks the
//! recorded arrival directions back from the goal to paint the path.

mod best_first;
mod bfs;
mod dfs;
mod vertex;

use crate::{
    containers::{Queue, Stack},
    maze::{Cell, Coord, Grid},
    rng::MazeRng,
};

pub use dfs::DfsFrame;
pub use vertex::{Vertex, Vertices};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Solver {
    Dfs,
    Bfs,
    Dijkstra,
    AStar,
    GreedyBestFirst,
}

impl Solver {
    pub const ALL: [Solver; 5] = [
        Solver::Dfs,
        Solver::Bfs,
        Solver::Dijkstra,
        Solver::AStar,
        Solver::GreedyBestFirst,
    ];

    /// Whether the ordering of the frontier depends on a [`Heuristic`].
    pub fn uses_heuristic(self) -> bool {
        matches!(self, Solver::AStar | Solver::GreedyBestFirst)
    }
}

impl std::fmt::Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Solver::Dfs => write!(f, "Depth-First Search (DFS)"),
            Solver::Bfs => write!(f, "Breadth-First Search (BFS)"),
            Solver::Dijkstra => write!(f, "Dijkstra's Algorithm"),
            Solver::AStar => write!(f, "A* Search"),
            Solver::GreedyBestFirst => write!(f, "Greedy Best-First Search"),
        }
    }
}

/// Distance estimate to the goal. Both are admissible on a 4-connected unit-cost grid.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Heuristic {
    #[default]
    Manhattan,
    Euclidean,
}

impl Heuristic {
    pub fn estimate(self, from: Coord, to: Coord) -> f32 {
        let dx = (from.0 as f32 - to.0 as f32).abs();
        let dy = (from.1 as f32 - to.1 as f32).abs();
        match self {
            Heuristic::Manhattan => dx + dy,
            Heuristic::Euclidean => dx.hypot(dy),
        }
    }
}

impl std::fmt::Display for Heuristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Heuristic::Manhattan => write!(f, "Manhattan"),
            Heuristic::Euclidean => write!(f, "Euclidean"),
        }
    }
}

/// Control frame of a run. It owns the vertex array for as long as the run lasts.
#[derive(Debug)]
pub struct Search {
    solver: Solver,
    heuristic: Heuristic,
    start: Coord,
    goal: Coord,
    vertices: Vertices,
}

/// A cell waiting in the frontier. `vertex` indexes the owning [`Search`]'s vertex array, so
/// the priority key always reads the live cost and estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierItem {
    pub coord: Coord,
    pub vertex: usize,
}

/// What a single step left behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Running,
    Reached,
    Exhausted,
}

/// Result of a finished run, kept until [`SolverEngine::trace`] consumes it.
#[derive(Debug)]
struct Outcome {
    reached: bool,
    start: Coord,
    goal: Coord,
    vertices: Vertices,
}

/// Drives one solver run over a caller-owned grid.
#[derive(Debug, Default)]
pub struct SolverEngine {
    search: Option<Search>,
    /// Path of suspended depth-first calls, deepest on top.
    stack: Stack<DfsFrame>,
    frontier: Queue<FrontierItem>,
    outcome: Option<Outcome>,
    reached: Option<bool>,
    /// Steps taken by the current run.
    steps: usize,
}

impl SolverEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears marks left by an earlier run, marks the start cell active and primes the
    /// frontier. The start is the top-left cell and the goal the bottom-right one.
    ///
    /// Any run in progress, or outcome not yet traced, is dropped first.
    pub fn init<R: MazeRng>(
        &mut self,
        grid: &mut Grid,
        solver: Solver,
        heuristic: Heuristic,
        rng: &mut R,
    ) {
        self.clear();
        grid.clear_paths();

        let start = (0, 0);
        let goal = (grid.width() - 1, grid.height() - 1);
        let mut vertices = Vertices::new(grid.width(), grid.height());
        vertices[start] = Vertex {
            cost: Some(0),
            estimate: heuristic.estimate(start, goal),
            arrived: None,
            in_queue: solver != Solver::Dfs,
        };
        grid.set(start, Cell::Active);

        tracing::info!(
            "Starting solver {} ({} heuristic) from {:?} to {:?}",
            solver,
            heuristic,
            start,
            goal
        );

        if solver == Solver::Dfs {
            dfs::init(start, &mut self.stack, rng);
        } else {
            self.frontier.enqueue(FrontierItem {
                coord: start,
                vertex: vertices.index_of(start),
            });
        }
        self.search = Some(Search {
            solver,
            heuristic,
            start,
            goal,
            vertices,
        });
    }

    /// Expands one cell. Returns whether the run continues.
    ///
    /// The step that ends the run, by reaching the goal or by running out of frontier,
    /// releases the stack and queue and stores the outcome for [`SolverEngine::trace`].
    ///
    /// Panics if the engine is idle.
    pub fn step<R: MazeRng>(&mut self, grid: &mut Grid, rng: &mut R) -> bool {
        let Some(search) = self.search.as_mut() else {
            panic!("Stepped a solver that is not running");
        };

        let status = match search.solver {
            Solver::Dfs => dfs::step(grid, search, &mut self.stack, rng),
            Solver::Bfs => bfs::step(grid, search, &mut self.frontier),
            Solver::Dijkstra | Solver::AStar | Solver::GreedyBestFirst => {
                best_first::step(grid, search, &mut self.frontier)
            }
        };
        self.steps += 1;

        match status {
            Status::Running => true,
            Status::Reached => {
                self.retire(true);
                false
            }
            Status::Exhausted => {
                self.retire(false);
                false
            }
        }
    }

    fn retire(&mut self, reached: bool) {
        let Some(search) = self.search.take() else {
            return;
        };
        tracing::info!(
            "Solver {} {} after {} steps",
            search.solver,
            if reached {
                "reached the goal"
            } else {
                "exhausted the frontier"
            },
            self.steps
        );

        self.stack.clear();
        self.frontier.clear();
        self.reached = Some(reached);
        self.outcome = Some(Outcome {
            reached,
            start: search.start,
            goal: search.goal,
            vertices: search.vertices,
        });
    }

    /// Steps until the run completes. Returns the number of steps taken.
    pub fn finish<R: MazeRng>(&mut self, grid: &mut Grid, rng: &mut R) -> usize {
        let mut steps = 0;
        while !self.is_idle() {
            self.step(grid, rng);
            steps += 1;
        }
        steps
    }

    /// Whether the last finished run discovered the goal. `None` while a run is in progress
    /// or before any run.
    pub fn goal_reached(&self) -> Option<bool> {
        self.reached
    }

    /// Paints the path found by the last run with `mark`, goal and start included, and
    /// returns its length in moves.
    ///
    /// Returns `None` and leaves the grid untouched if the goal was not reached, or if there
    /// is no finished run to trace. Either way the vertex array is released.
    pub fn trace(&mut self, grid: &mut Grid, mark: Cell) -> Option<usize> {
        let outcome = self.outcome.take()?;
        if !outcome.reached {
            tracing::debug!("Goal unreachable, nothing to trace");
            return None;
        }

        let mut coord = outcome.goal;
        let mut moves = 0;
        grid.set(coord, mark);
        while let Some(arrived) = outcome.vertices[coord].arrived {
            let (dx, dy) = arrived.opposite().offset();
            let Some(previous) = grid.neighbor(coord, dx, dy) else {
                panic!("Arrival direction at {:?} leads off the grid", coord);
            };
            coord = previous;
            grid.set(coord, mark);
            moves += 1;
        }
        debug_assert_eq!(coord, outcome.start);

        tracing::debug!("Traced a path of {} moves", moves);
        Some(moves)
    }

    /// Abandons the current run and drops any untraced outcome. Partial marks stay in the
    /// grid.
    pub fn clear(&mut self) {
        if let Some(search) = self.search.take() {
            tracing::debug!(
                "Abandoning solver {} after {} steps ({} frames, {} frontier items dropped)",
                search.solver,
                self.steps,
                self.stack.len(),
                self.frontier.len()
            );
        }
        self.stack.clear();
        self.frontier.clear();
        self.outcome = None;
        self.reached = None;
        self.steps = 0;
    }

    pub fn is_idle(&self) -> bool {
        self.search.is_none()
    }

    /// Algorithm of the run in progress.
    pub fn active(&self) -> Option<Solver> {
        self.search.as_ref().map(|search| search.solver)
    }

    /// Number of suspended depth-first frames plus frontier items.
    pub fn pending(&self) -> usize {
        self.stack.len() + self.frontier.len()
    }
}
