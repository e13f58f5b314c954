//! Maze generators as resumable state machines.
//!
//! Each algorithm is split into an `init` that seeds the grid and the frame stack, and a `step`
//! that performs the body of one recursive call: it takes the popped [`Frame`] and pushes zero,
//! one or two continuation frames. Nothing is kept on the Rust call stack between steps, so the
//! host can interleave steps with rendering, run them all at once, or abandon the run.

mod dfs;
mod kruskal;
mod prim;
mod random;
mod recur_div;

use crate::{
    containers::Stack,
    maze::{Coord, Grid},
    rng::MazeRng,
};

pub use dfs::DfsFrame;
pub use kruskal::EdgeForest;
pub use prim::Worklist;
pub use recur_div::Region;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Generator {
    Random,
    RecurBacktrack,
    RecurDiv,
    Kruskal,
    Prim,
}

impl Generator {
    pub const ALL: [Generator; 5] = [
        Generator::Random,
        Generator::RecurBacktrack,
        Generator::RecurDiv,
        Generator::Kruskal,
        Generator::Prim,
    ];

    /// Whether the algorithm carves rooms on even coordinates with a 2-cell stride,
    /// which needs odd grid dimensions of at least 3.
    pub fn requires_odd_lattice(self) -> bool {
        !matches!(self, Generator::Random)
    }
}

impl std::fmt::Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Generator::Random => write!(f, "Random"),
            Generator::RecurBacktrack => write!(f, "Randomized Depth-First Search (DFS)"),
            Generator::RecurDiv => write!(f, "Recursive Division"),
            Generator::Kruskal => write!(f, "Kruskal's Algorithm"),
            Generator::Prim => write!(f, "Prim's Algorithm"),
        }
    }
}

/// A suspended generator step. Buffers owned by a frame are released when the frame is
/// retired, i.e. popped and not pushed back, or dropped by [`GeneratorEngine::clear`].
#[derive(Debug)]
pub enum Frame {
    Random,
    Dfs(DfsFrame),
    Division(Region),
    Kruskal(EdgeForest),
    Prim(Worklist),
}

/// Passage between two lattice rooms two cells apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub from: Coord,
    pub to: Coord,
}

impl Edge {
    /// The wall cell between the two rooms.
    pub fn midpoint(&self) -> Coord {
        (
            (self.from.0 + self.to.0) / 2,
            (self.from.1 + self.to.1) / 2,
        )
    }
}

/// Drives one generator run over a caller-owned grid.
#[derive(Debug, Default)]
pub struct GeneratorEngine {
    stack: Stack<Frame>,
    /// Algorithm of the current run, `None` when idle.
    active: Option<Generator>,
    /// Steps taken by the current run.
    steps: usize,
}

impl GeneratorEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepares `grid` for `generator` and pushes its first frame.
    ///
    /// Any run in progress is abandoned first.
    ///
    /// Panics if `generator` carves an odd lattice and the grid dimensions do not fit one.
    pub fn init<R: MazeRng>(&mut self, grid: &mut Grid, generator: Generator, rng: &mut R) {
        if generator.requires_odd_lattice()
            && let Err(err) = Grid::validate_lattice(grid.width(), grid.height())
        {
            panic!(
                "{} cannot run on a {}x{} grid: {}",
                generator,
                grid.width(),
                grid.height(),
                err
            );
        }

        self.clear();
        tracing::info!(
            "Starting generator {} on a {}x{} grid",
            generator,
            grid.width(),
            grid.height()
        );

        match generator {
            Generator::Random => random::init(&mut self.stack),
            Generator::RecurBacktrack => dfs::init(grid, &mut self.stack, rng),
            Generator::RecurDiv => recur_div::init(grid, &mut self.stack, rng),
            Generator::Kruskal => kruskal::init(grid, &mut self.stack, rng),
            Generator::Prim => prim::init(grid, &mut self.stack),
        }
        self.active = Some(generator);
    }

    /// Performs one bounded unit of work. Returns whether the run continues.
    ///
    /// Panics if the engine is idle.
    pub fn step<R: MazeRng>(&mut self, grid: &mut Grid, rng: &mut R) -> bool {
        let Some(frame) = self.stack.pop() else {
            panic!("Stepped a generator that is not running");
        };

        match frame {
            Frame::Random => random::step(grid, rng),
            Frame::Dfs(frame) => dfs::step(grid, frame, &mut self.stack, rng),
            Frame::Division(region) => recur_div::step(grid, region, &mut self.stack, rng),
            Frame::Kruskal(forest) => kruskal::step(grid, forest, &mut self.stack),
            Frame::Prim(worklist) => prim::step(grid, worklist, &mut self.stack, rng),
        }
        self.steps += 1;

        let running = !self.stack.is_empty();
        if !running && let Some(generator) = self.active.take() {
            tracing::info!("Generator {} finished after {} steps", generator, self.steps);
        }
        running
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

    /// Abandons the current run. Partial progress stays in the grid.
    pub fn clear(&mut self) {
        if let Some(generator) = self.active.take() {
            tracing::debug!(
                "Abandoning generator {} after {} steps ({} frames dropped)",
                generator,
                self.steps,
                self.stack.len()
            );
        }
        self.stack.clear();
        self.steps = 0;
    }

    pub fn is_idle(&self) -> bool {
        self.stack.is_empty()
    }

    /// Algorithm of the run in progress.
    pub fn active(&self) -> Option<Generator> {
        self.active
    }

    /// Number of suspended frames.
    pub fn pending(&self) -> usize {
        self.stack.len()
    }
}
