//! Conway's Game of Life engine
//!
//! This library provides a double-buffered cellular automaton with dense and
//! sparse grid storage, bounded and toroidal geometry, and pluggable rules.

pub mod config;
pub mod error;
pub mod game_of_life;
pub mod simulation;
pub mod utils;

pub use config::Settings;
pub use error::{LifeError, LifeResult};
pub use game_of_life::{Coord, Generator, RuleSet, World};

use anyhow::Result;
use config::StorageKind;
use game_of_life::{DenseGrid, Pattern, SparseGrid};
use simulation::RunSummary;
use std::collections::BTreeMap;
use std::io::Write;

/// Main entry point: build the configured world and run it, rendering to `out`
pub fn simulate<W: Write>(
    settings: &Settings,
    imported: &BTreeMap<String, Pattern>,
    out: &mut W,
) -> Result<RunSummary> {
    match settings.world.storage {
        StorageKind::Dense => {
            let mut world = simulation::build_world::<DenseGrid>(settings, imported)?;
            simulation::run(&mut world, settings, out)
        }
        StorageKind::Sparse => {
            let mut world = simulation::build_world::<SparseGrid>(settings, imported)?;
            simulation::run(&mut world, settings, out)
        }
    }
}
