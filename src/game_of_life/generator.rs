//! Generation stepping

use super::coord::Coord;
use super::rules::RuleSet;
use super::storage::{DenseGrid, GridStorage};
use super::world::{neighbour_summary_in, World};
use rayon::prelude::*;
use tracing::{debug, trace};

/// Where a step currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPhase {
    Idle,
    Evaluating,
    Swapping,
}

/// Outcome of a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    /// Generation number the world is now at
    pub generation: u64,
    /// How many coordinates had their next state computed
    pub evaluated: usize,
    /// Live cells after the step
    pub population: usize,
}

/// Drives a world forward one generation at a time.
///
/// The generator borrows the world exclusively, so nothing can read the
/// board while a step is half done. On sparse storage only the frontier is
/// evaluated, so custom rules that bring cells to life with no live neighbour
/// have no effect there.
pub struct Generator<'w, S: GridStorage = DenseGrid> {
    world: &'w mut World<S>,
    rules: RuleSet,
    parallel: bool,
    generation: u64,
    phase: StepPhase,
}

impl<'w, S: GridStorage> Generator<'w, S> {
    /// Generator running the standard Conway rules
    pub fn new(world: &'w mut World<S>) -> Self {
        Self::with_rules(world, RuleSet::conway())
    }

    pub fn with_rules(world: &'w mut World<S>, rules: RuleSet) -> Self {
        Self {
            world,
            rules,
            parallel: false,
            generation: 0,
            phase: StepPhase::Idle,
        }
    }

    /// Evaluate cells on the rayon thread pool
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    pub fn world(&self) -> &World<S> {
        &*self.world
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> StepPhase {
        self.phase
    }

    /// Compute the next generation and make it current
    pub fn step(&mut self) -> StepReport {
        debug_assert_eq!(self.phase, StepPhase::Idle);

        self.phase = StepPhase::Evaluating;
        let geometry = self.world.geometry();
        let coords = self.world.relevant_coordinates();
        let rules = &self.rules;
        let (active, inactive) = self.world.buffers_mut();

        let evaluate = |coord: Coord| -> (Coord, bool) {
            let live = active.is_live(coord);
            let neighbours = neighbour_summary_in(active, geometry, coord);
            (coord, rules.evaluate(coord, live, &neighbours))
        };

        if self.parallel {
            // Every coordinate appears once, so each result has a single writer.
            let next: Vec<(Coord, bool)> =
                coords.par_iter().map(|&coord| evaluate(coord)).collect();
            for (coord, live) in next {
                inactive.set_state(coord, live);
            }
        } else {
            for &coord in &coords {
                let (coord, live) = evaluate(coord);
                inactive.set_state(coord, live);
            }
        }

        self.phase = StepPhase::Swapping;
        trace!(generation = self.generation, "swapping buffers");
        self.world.swap_buffers();

        self.phase = StepPhase::Idle;
        self.generation += 1;

        let report = StepReport {
            generation: self.generation,
            evaluated: coords.len(),
            population: self.world.population(),
        };
        debug!(
            generation = report.generation,
            evaluated = report.evaluated,
            population = report.population,
            "step complete"
        );
        report
    }

    /// Step `generations` times, returning the last report
    pub fn run(&mut self, generations: u64) -> Option<StepReport> {
        (0..generations).map(|_| self.step()).last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::cell::NeighbourSummary;
    use crate::game_of_life::coord::Geometry;
    use crate::game_of_life::rules::Rule;
    use crate::game_of_life::storage::SparseGrid;
    use std::collections::HashSet;

    fn live_set<S: GridStorage>(world: &World<S>) -> HashSet<Coord> {
        world.live_cells().into_iter().collect()
    }

    fn coords(cells: &[(i64, i64)]) -> HashSet<Coord> {
        cells.iter().map(|&(x, y)| Coord::new(x, y)).collect()
    }

    fn seeded<S: GridStorage>(
        height: usize,
        width: usize,
        geometry: Geometry,
        cells: &[(i64, i64)],
    ) -> World<S> {
        let mut world = World::with_geometry(height, width, geometry).unwrap();
        for &(x, y) in cells {
            world.activate_cell(Coord::new(x, y)).unwrap();
        }
        world
    }

    #[test]
    fn test_cell_alone_dies() {
        let mut world = World::new(3, 3).unwrap();
        world.activate_cell(Coord::new(1, 1)).unwrap();

        Generator::new(&mut world).step();

        world.for_each_coordinate(|coord| {
            assert!(!world.is_cell_live(coord).unwrap());
        });
    }

    #[test]
    fn test_cell_with_single_neighbour_dies() {
        let mut world = World::new(3, 3).unwrap();
        world.activate_cell(Coord::new(1, 0)).unwrap();
        world.activate_cell(Coord::new(1, 1)).unwrap();

        let report = Generator::new(&mut world).step();

        assert_eq!(report.population, 0);
        assert!(world.is_empty());
    }

    #[test]
    fn test_three_cells_inline_rotate() {
        let mut world = seeded::<DenseGrid>(3, 3, Geometry::Bounded, &[(1, 0), (1, 1), (1, 2)]);
        let original = live_set(&world);

        let mut generator = Generator::new(&mut world);
        generator.step();
        assert_eq!(live_set(generator.world()), coords(&[(0, 1), (1, 1), (2, 1)]));

        generator.step();
        assert_eq!(generator.generation(), 2);
        assert_eq!(live_set(generator.world()), original);
    }

    #[test]
    fn test_still_life_block() {
        let cells = [(1, 1), (2, 1), (1, 2), (2, 2)];
        let mut world = seeded::<DenseGrid>(4, 4, Geometry::Bounded, &cells);
        Generator::new(&mut world).run(5);
        assert_eq!(live_set(&world), coords(&cells));
    }

    #[test]
    fn test_empty_world_stays_empty() {
        let mut world = World::new(5, 5).unwrap();
        let mut generator = Generator::new(&mut world);
        for _ in 0..10 {
            assert_eq!(generator.step().population, 0);
        }
        assert_eq!(generator.phase(), StepPhase::Idle);
    }

    #[test]
    fn test_run_zero_generations() {
        let mut world = World::new(2, 2).unwrap();
        assert_eq!(Generator::new(&mut world).run(0), None);
    }

    #[test]
    fn test_step_never_sees_partial_generation() {
        // A rule that copies the west neighbour shifts every row east by one.
        // If writes leaked into reads, a single cell would smear across the row.
        let shift_east = RuleSet::new(vec![Rule::new(
            "copy west",
            |_, _| true,
            |neighbours: &NeighbourSummary, _| {
                neighbours.states()[NeighbourSummary::WEST].is_active()
            },
        )]);
        let mut world = seeded::<DenseGrid>(1, 5, Geometry::Bounded, &[(0, 0)]);
        Generator::with_rules(&mut world, shift_east).step();
        assert_eq!(live_set(&world), coords(&[(1, 0)]));
    }

    #[test]
    fn test_sparse_blinker() {
        let mut world = seeded::<SparseGrid>(3, 3, Geometry::Bounded, &[(1, 0), (1, 1), (1, 2)]);
        let mut generator = Generator::new(&mut world);
        let report = generator.step();
        assert_eq!(report.evaluated, 9);
        assert_eq!(live_set(generator.world()), coords(&[(0, 1), (1, 1), (2, 1)]));
        generator.step();
        assert_eq!(live_set(generator.world()), coords(&[(1, 0), (1, 1), (1, 2)]));
    }

    #[test]
    fn test_sparse_evaluates_only_frontier() {
        let blinker = [(500, 500), (501, 500), (502, 500)];
        let mut world = seeded::<SparseGrid>(1000, 1000, Geometry::Bounded, &blinker);
        let report = Generator::new(&mut world).step();
        assert_eq!(report.evaluated, 15);
        assert_eq!(live_set(&world), coords(&[(501, 499), (501, 500), (501, 501)]));
    }

    #[test]
    fn test_parallel_matches_serial() {
        let glider = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];
        let mut serial = seeded::<DenseGrid>(8, 8, Geometry::Toroidal, &glider);
        let mut parallel = seeded::<DenseGrid>(8, 8, Geometry::Toroidal, &glider);

        Generator::new(&mut serial).run(12);
        Generator::new(&mut parallel).parallel(true).run(12);

        assert_eq!(live_set(&serial), live_set(&parallel));
        assert_eq!(serial.population(), 5);
    }

    #[test]
    fn test_glider_wraps_on_torus() {
        let glider = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];
        let mut world = seeded::<SparseGrid>(6, 6, Geometry::Toroidal, &glider);
        // A glider moves one cell diagonally every four generations
        Generator::new(&mut world).run(24);
        assert_eq!(live_set(&world), coords(&glider));
    }

    #[test]
    fn test_custom_rule_set() {
        // Seeds (B2/S): every live cell dies, births need two neighbours
        let rules = RuleSet::life_like(&[2], &[]).unwrap();
        let mut world = seeded::<DenseGrid>(4, 4, Geometry::Bounded, &[(1, 1), (2, 1)]);
        Generator::with_rules(&mut world, rules).step();
        assert_eq!(live_set(&world), coords(&[(1, 0), (2, 0), (1, 2), (2, 2)]));
    }
}
