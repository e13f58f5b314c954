use crate::{
    containers::Stack,
    generators::{Edge, Frame},
    maze::{Cell, Coord, Grid},
    rng::MazeRng,
};

/// The whole run of randomized Kruskal lives in this single control frame: the shuffled edge
/// list, the forest id of every lattice room, and a cursor into the edge list.
#[derive(Debug)]
pub struct EdgeForest {
    edges: Vec<Edge>,
    /// Forest id per room. Rooms with equal ids are already connected.
    forest: Vec<u32>,
    at: usize,
    /// Rooms per lattice row.
    columns: usize,
}

impl EdgeForest {
    fn room_index(&self, coord: Coord) -> usize {
        (coord.1 / 2) as usize * self.columns + (coord.0 / 2) as usize
    }

    /// Merges the set of `b` into the set of `a` by relabeling every room.
    /// Returns false if they were already one set.
    fn union(&mut self, a: Coord, b: Coord) -> bool {
        let keep = self.forest[self.room_index(a)];
        let merge = self.forest[self.room_index(b)];
        if keep == merge {
            return false;
        }
        self.forest
            .iter_mut()
            .filter(|id| **id == merge)
            .for_each(|id| *id = keep);
        true
    }
}

pub(super) fn init<R: MazeRng>(grid: &mut Grid, stack: &mut Stack<Frame>, rng: &mut R) {
    grid.fill(Cell::Wall);

    let (width, height) = (grid.width(), grid.height());
    let columns = (width / 2) as usize + 1;
    let rows = (height / 2) as usize + 1;

    // Horizontal edges column by column, then vertical edges row by row
    let mut edges: Vec<Edge> = (0..width - 2)
        .step_by(2)
        .flat_map(|x| {
            (0..height).step_by(2).map(move |y| Edge {
                from: (x, y),
                to: (x + 2, y),
            })
        })
        .chain((0..height - 2).step_by(2).flat_map(|y| {
            (0..width).step_by(2).map(move |x| Edge {
                from: (x, y),
                to: (x, y + 2),
            })
        }))
        .collect();
    rng.shuffle(&mut edges);

    let forest = (0..(columns * rows) as u32).collect();
    stack.push(Frame::Kruskal(EdgeForest {
        edges,
        forest,
        at: 0,
        columns,
    }));
}

/// Consumes one edge. If it joins two different trees they are merged and the passage is
/// carved; otherwise the edge is skipped. The frame is retired with the last edge.
pub(super) fn step(grid: &mut Grid, mut forest: EdgeForest, stack: &mut Stack<Frame>) {
    if let Some(&edge) = forest.edges.get(forest.at) {
        forest.at += 1;
        if forest.union(edge.from, edge.to) {
            grid.set(edge.from, Cell::Path);
            grid.set(edge.to, Cell::Path);
            grid.set(edge.midpoint(), Cell::Path);
        }
    }

    if forest.at < forest.edges.len() {
        stack.push(Frame::Kruskal(forest));
    } else {
        tracing::debug!(
            "Kruskal consumed all {} edges, releasing edge list and forest",
            forest.edges.len()
        );
    }
}
