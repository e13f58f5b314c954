use std::ops::{Index, IndexMut};

use crate::maze::{Coord, Direction};

/// Search bookkeeping for one cell.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vertex {
    /// Moves from the start along the best known route. `None` until discovered.
    pub cost: Option<u32>,
    /// Heuristic distance to the goal, filled in when the vertex is relaxed.
    pub estimate: f32,
    /// Direction of the move that reached this cell. Stepping the opposite way leads back
    /// towards the start.
    pub arrived: Option<Direction>,
    /// Whether the cell currently sits in the frontier.
    pub in_queue: bool,
}

impl Vertex {
    pub fn is_discovered(&self) -> bool {
        self.cost.is_some()
    }
}

/// One [`Vertex`] per grid cell, row-major like the grid itself.
#[derive(Debug)]
pub struct Vertices {
    data: Box<[Vertex]>,
    width: u16,
}

impl Vertices {
    pub fn new(width: u16, height: u16) -> Self {
        Vertices {
            data: vec![Vertex::default(); width as usize * height as usize].into_boxed_slice(),
            width,
        }
    }

    /// Flat index of `coord`, usable as a stable handle into this array.
    pub fn index_of(&self, coord: Coord) -> usize {
        coord.1 as usize * self.width as usize + coord.0 as usize
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Index<usize> for Vertices {
    type Output = Vertex;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl IndexMut<usize> for Vertices {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl Index<Coord> for Vertices {
    type Output = Vertex;

    fn index(&self, coord: Coord) -> &Self::Output {
        &self.data[self.index_of(coord)]
    }
}

impl IndexMut<Coord> for Vertices {
    fn index_mut(&mut self, coord: Coord) -> &mut Self::Output {
        let index = self.index_of(coord);
        &mut self.data[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_vertices_are_undiscovered() {
        let vertices = Vertices::new(4, 3);
        assert_eq!(vertices.len(), 12);
        assert!((0..vertices.len()).all(|i| !vertices[i].is_discovered()));
    }

    #[test]
    fn test_coord_and_flat_index_agree() {
        let mut vertices = Vertices::new(4, 3);
        vertices[(3, 2)].cost = Some(5);
        assert_eq!(vertices.index_of((3, 2)), 11);
        assert_eq!(vertices[11].cost, Some(5));
        assert_eq!(vertices.index_of((1, 1)), 5);
    }
}
