//! Game of Life simulation engine

pub mod cell;
pub mod coord;
pub mod generator;
pub mod io;
pub mod pattern;
pub mod placer;
pub mod rules;
pub mod storage;
pub mod world;

pub use cell::{CellState, NeighbourSummary};
pub use coord::{Coord, Geometry};
pub use generator::{Generator, StepPhase, StepReport};
pub use io::{create_example_patterns, import_species, load_pattern_from_file, parse_pattern};
pub use pattern::Pattern;
pub use placer::{seed_random, Placer};
pub use rules::{LifeRule, Rule, RuleSet};
pub use storage::{DenseGrid, GridStorage, SparseGrid};
pub use world::World;
