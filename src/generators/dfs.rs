use crate::{
    containers::Stack,
    generators::{Edge, Frame},
    maze::{Cell, Coord, Direction, Grid},
    rng::MazeRng,
};

/// Locals of one recursive backtracker call: the room being carved from, its shuffled
/// direction order, and how many of those directions were already tried.
#[derive(Debug, Clone)]
pub struct DfsFrame {
    coord: Coord,
    choice: [Direction; 4],
    at: usize,
}

impl DfsFrame {
    fn new<R: MazeRng>(coord: Coord, rng: &mut R) -> Self {
        let mut choice = Direction::ALL;
        rng.shuffle(&mut choice);
        DfsFrame {
            coord,
            choice,
            at: 0,
        }
    }
}

pub(super) fn init<R: MazeRng>(grid: &mut Grid, stack: &mut Stack<Frame>, rng: &mut R) {
    grid.fill(Cell::Wall);

    let origin = (0, 0);
    grid.set(origin, Cell::Path);
    stack.push(Frame::Dfs(DfsFrame::new(origin, rng)));
}

/// Resumes `frame` at its cursor. The first untried direction leading to an uncarved room
/// carves the passage, then the resumed frame and the new room's frame are pushed (the new
/// room on top). When no direction is left the frame is dropped, which is the backtrack.
pub(super) fn step<R: MazeRng>(
    grid: &mut Grid,
    mut frame: DfsFrame,
    stack: &mut Stack<Frame>,
    rng: &mut R,
) {
    while frame.at < frame.choice.len() {
        let (dx, dy) = frame.choice[frame.at].offset();
        frame.at += 1;

        let Some(next) = grid.neighbor(frame.coord, dx * 2, dy * 2) else {
            continue;
        };
        if grid[next] == Cell::Path {
            continue;
        }

        let edge = Edge {
            from: frame.coord,
            to: next,
        };
        grid.set(edge.midpoint(), Cell::Path);
        grid.set(next, Cell::Path);

        stack.push(Frame::Dfs(frame));
        stack.push(Frame::Dfs(DfsFrame::new(next, rng)));
        return;
    }
}
