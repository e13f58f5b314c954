use super::{Search, Status};
use crate::{
    containers::Stack,
    maze::{Cell, Coord, Direction, Grid},
    rng::MazeRng,
};

/// Locals of one recursive depth-first call: the cell, its shuffled direction order, and
/// how many of those directions were already tried.
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

pub(super) fn init<R: MazeRng>(start: Coord, stack: &mut Stack<DfsFrame>, rng: &mut R) {
    stack.push(DfsFrame::new(start, rng));
}

/// Resumes the deepest frame. A frame standing on the goal ends the run. Otherwise the first
/// untried direction into an open [`Cell::Path`] cell records the move, marks the cell active
/// and descends into it; with no direction left the cell is marked dead and the frame dropped.
pub(super) fn step<R: MazeRng>(
    grid: &mut Grid,
    search: &mut Search,
    stack: &mut Stack<DfsFrame>,
    rng: &mut R,
) -> Status {
    let Some(mut frame) = stack.pop() else {
        return Status::Exhausted;
    };
    if frame.coord == search.goal {
        return Status::Reached;
    }

    while frame.at < frame.choice.len() {
        let direction = frame.choice[frame.at];
        frame.at += 1;

        let (dx, dy) = direction.offset();
        let Some(next) = grid.neighbor(frame.coord, dx, dy) else {
            continue;
        };
        if grid[next] != Cell::Path {
            continue;
        }

        let cost = search.vertices[frame.coord].cost.map(|c| c + 1);
        let vertex = &mut search.vertices[next];
        vertex.cost = cost;
        vertex.arrived = Some(direction);
        grid.set(next, Cell::Active);

        stack.push(frame);
        stack.push(DfsFrame::new(next, rng));
        return Status::Running;
    }

    // Backtrack
    grid.set(frame.coord, Cell::Dead);
    if stack.is_empty() {
        Status::Exhausted
    } else {
        Status::Running
    }
}
