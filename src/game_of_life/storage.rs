//! Grid storage backends
//!
//! Both backends answer the same question ("is the cell at this coordinate
//! alive?"), but they differ in what a step has to visit. A dense grid visits
//! every cell. A sparse grid visits only its frontier: live cells plus the one
//! ring of neighbours around them, which is everything that can change in a
//! single generation.

use super::coord::{in_bounds, Coord, Geometry};
use itertools::iproduct;
use std::collections::HashSet;

/// Storage capability shared by every grid buffer
pub trait GridStorage: Send + Sync {
    /// Create an all-dead buffer. Callers guarantee both dimensions are positive.
    fn with_size(height: usize, width: usize) -> Self
    where
        Self: Sized;

    /// `(height, width)`
    fn size(&self) -> (usize, usize);

    /// False for dead or never-written cells. Callers pass in-range coordinates.
    fn is_live(&self, coord: Coord) -> bool;

    fn set_state(&mut self, coord: Coord, live: bool);

    /// Coordinates whose next state has to be computed in a step
    fn relevant_coordinates(&self, geometry: Geometry) -> Vec<Coord>;

    fn live_cells(&self) -> Vec<Coord>;

    fn live_count(&self) -> usize;

    /// Kill every cell
    fn clear(&mut self);

    /// Prepare this buffer to receive the next generation
    fn recycle(&mut self) {}
}

/// Row-major `Vec<bool>` covering the whole board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl DenseGrid {
    /// Convert 2D coordinates to the 1D index
    #[inline]
    fn index(&self, coord: Coord) -> usize {
        coord.y as usize * self.width + coord.x as usize
    }
}

impl GridStorage for DenseGrid {
    fn with_size(height: usize, width: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    fn size(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    fn is_live(&self, coord: Coord) -> bool {
        in_bounds(coord, self.height, self.width) && self.cells[self.index(coord)]
    }

    fn set_state(&mut self, coord: Coord, live: bool) {
        if in_bounds(coord, self.height, self.width) {
            let idx = self.index(coord);
            self.cells[idx] = live;
        }
    }

    fn relevant_coordinates(&self, _geometry: Geometry) -> Vec<Coord> {
        iproduct!(0..self.height as i64, 0..self.width as i64)
            .map(|(y, x)| Coord::new(x, y))
            .collect()
    }

    fn live_cells(&self) -> Vec<Coord> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &live)| live)
            .map(|(i, _)| Coord::new((i % self.width) as i64, (i / self.width) as i64))
            .collect()
    }

    fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    fn clear(&mut self) {
        self.cells.fill(false);
    }
}

/// Set of live coordinates; absence means dead
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseGrid {
    width: usize,
    height: usize,
    live: HashSet<Coord>,
}

impl GridStorage for SparseGrid {
    fn with_size(height: usize, width: usize) -> Self {
        Self {
            width,
            height,
            live: HashSet::new(),
        }
    }

    fn size(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    fn is_live(&self, coord: Coord) -> bool {
        self.live.contains(&coord)
    }

    fn set_state(&mut self, coord: Coord, live: bool) {
        if !in_bounds(coord, self.height, self.width) {
            return;
        }
        if live {
            self.live.insert(coord);
        } else {
            self.live.remove(&coord);
        }
    }

    fn relevant_coordinates(&self, geometry: Geometry) -> Vec<Coord> {
        let mut frontier: HashSet<Coord> = HashSet::with_capacity(self.live.len() * 9);
        for &cell in &self.live {
            frontier.insert(cell);
            for neighbour in cell.neighbours() {
                let mapped = geometry.transform(neighbour, self.height, self.width);
                if in_bounds(mapped, self.height, self.width) {
                    frontier.insert(mapped);
                }
            }
        }
        frontier.into_iter().collect()
    }

    fn live_cells(&self) -> Vec<Coord> {
        self.live.iter().copied().collect()
    }

    fn live_count(&self) -> usize {
        self.live.len()
    }

    fn clear(&mut self) {
        self.live.clear();
    }

    // Only explicit writes from the last step ever land here, so stale
    // generations must be dropped before reuse.
    fn recycle(&mut self) {
        self.live.clear();
    }
}
