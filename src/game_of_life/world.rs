//! The double-buffered world

use super::cell::{CellState, NeighbourSummary};
use super::coord::{in_bounds, Coord, Geometry};
use super::storage::{DenseGrid, GridStorage};
use crate::error::{LifeError, LifeResult};
use tracing::info;

/// A board with a current generation and a next-generation write target.
///
/// Exactly one of the two buffers is active at a time. Reads always go to the
/// active buffer; a step writes into the other one and then swaps.
#[derive(Debug, Clone)]
pub struct World<S: GridStorage = DenseGrid> {
    height: usize,
    width: usize,
    buffers: [S; 2],
    active: usize,
    geometry: Geometry,
}

impl World<DenseGrid> {
    /// Bounded world on dense storage
    pub fn new(height: usize, width: usize) -> LifeResult<Self> {
        Self::with_geometry(height, width, Geometry::Bounded)
    }

    /// Toroidal world on dense storage
    pub fn new_toroidal(height: usize, width: usize) -> LifeResult<Self> {
        Self::with_geometry(height, width, Geometry::Toroidal)
    }
}

impl<S: GridStorage> World<S> {
    /// Create a world with any storage backend and geometry
    pub fn with_geometry(height: usize, width: usize, geometry: Geometry) -> LifeResult<Self> {
        if height == 0 || width == 0 {
            return Err(LifeError::ImpossibleWorld { height, width });
        }

        info!(height, width, ?geometry, "created world");

        Ok(Self {
            height,
            width,
            buffers: [S::with_size(height, width), S::with_size(height, width)],
            active: 0,
            geometry,
        })
    }

    /// `(height, width)`
    pub fn size(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn is_coord_valid(&self, coord: Coord) -> bool {
        in_bounds(coord, self.height, self.width)
    }

    /// The current generation
    pub fn active(&self) -> &S {
        &self.buffers[self.active]
    }

    /// Bring a cell to life in the current generation.
    ///
    /// Toroidal worlds wrap the coordinate first, so this only fails on
    /// bounded worlds.
    pub fn activate_cell(&mut self, coord: Coord) -> LifeResult<()> {
        let coord = self.geometry.transform(coord, self.height, self.width);
        if !self.is_coord_valid(coord) {
            return Err(LifeError::InvalidCoordinate(coord));
        }
        self.buffers[self.active].set_state(coord, true);
        Ok(())
    }

    pub fn is_cell_live(&self, coord: Coord) -> LifeResult<bool> {
        if !self.is_coord_valid(coord) {
            return Err(LifeError::InvalidCoordinate(coord));
        }
        Ok(self.active().is_live(coord))
    }

    pub fn cell_state(&self, coord: Coord) -> CellState {
        cell_state_in(self.active(), coord)
    }

    pub fn neighbour_summary(&self, coord: Coord) -> NeighbourSummary {
        neighbour_summary_in(self.active(), self.geometry, coord)
    }

    /// Coordinates a step has to evaluate, in no particular order
    pub fn relevant_coordinates(&self) -> Vec<Coord> {
        self.active().relevant_coordinates(self.geometry)
    }

    pub fn for_each_coordinate<F: FnMut(Coord)>(&self, mut visit: F) {
        for coord in self.relevant_coordinates() {
            visit(coord);
        }
    }

    /// Make the next generation current
    pub fn swap_buffers(&mut self) {
        self.active ^= 1;
        let inactive = self.active ^ 1;
        self.buffers[inactive].recycle();
    }

    /// Split into the frozen current generation and the write target
    pub(crate) fn buffers_mut(&mut self) -> (&S, &mut S) {
        let (first, second) = self.buffers.split_at_mut(1);
        if self.active == 0 {
            (&first[0], &mut second[0])
        } else {
            (&second[0], &mut first[0])
        }
    }

    pub fn live_cells(&self) -> Vec<Coord> {
        self.active().live_cells()
    }

    pub fn population(&self) -> usize {
        self.active().live_count()
    }

    pub fn is_empty(&self) -> bool {
        self.population() == 0
    }

    /// Kill every cell in both generations
    pub fn clear(&mut self) {
        for buffer in &mut self.buffers {
            buffer.clear();
        }
    }
}

pub(crate) fn cell_state_in<S: GridStorage>(grid: &S, coord: Coord) -> CellState {
    let (height, width) = grid.size();
    if !in_bounds(coord, height, width) {
        return CellState::OutOfBounds;
    }
    CellState::from_live(grid.is_live(coord))
}

pub(crate) fn neighbour_summary_in<S: GridStorage>(
    grid: &S,
    geometry: Geometry,
    coord: Coord,
) -> NeighbourSummary {
    let (height, width) = grid.size();
    let neighbours = coord.neighbours();
    NeighbourSummary(std::array::from_fn(|i| {
        cell_state_in(grid, geometry.transform(neighbours[i], height, width))
    }))
}
