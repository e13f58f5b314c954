use crate::{
    containers::Stack,
    generators::Frame,
    maze::{Cell, Grid},
    rng::MazeRng,
};

pub(super) fn init(stack: &mut Stack<Frame>) {
    stack.push(Frame::Random);
}

/// Fills the whole grid in one pass, roughly one wall in four, then opens the start and goal
/// corners. Pushes nothing, so the run is over after this single step.
pub(super) fn step<R: MazeRng>(grid: &mut Grid, rng: &mut R) {
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let cell = if rng.next_u32() & 3 == 0 {
                Cell::Wall
            } else {
                Cell::Path
            };
            grid.set((x, y), cell);
        }
    }

    grid.set((0, 0), Cell::Path);
    grid.set((grid.width() - 1, grid.height() - 1), Cell::Path);
}
