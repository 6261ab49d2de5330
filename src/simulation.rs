//! Wiring settings, patterns and the engine into a running simulation

use crate::config::Settings;
use crate::game_of_life::{seed_random, Generator, GridStorage, Pattern, Placer, RuleSet, World};
use crate::utils::Printer;
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;
use std::io::Write;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Totals reported once a run finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub generations: u64,
    pub population: usize,
    pub elapsed: Duration,
}

/// Build and seed a world from settings.
///
/// Seeding happens in the order explicit positions, random cells, then the
/// population of named species. `imported` patterns take precedence over
/// species defined in the settings file.
pub fn build_world<S: GridStorage>(
    settings: &Settings,
    imported: &BTreeMap<String, Pattern>,
) -> Result<World<S>> {
    let mut world = World::<S>::with_geometry(
        settings.world.height,
        settings.world.width,
        settings.world.geometry(),
    )
    .context("Failed to create world")?;

    for &position in &settings.seeding.positions {
        world
            .activate_cell(position)
            .with_context(|| format!("Could not activate configured position {}", position))?;
    }

    if settings.seeding.random_cells > 0 {
        let mut rng = match settings.seeding.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        seed_random(&mut world, settings.seeding.random_cells, &mut rng)
            .context("Failed to seed random cells")?;
    }

    let mut placer = Placer::new(&mut world);
    for life in &settings.population {
        let pattern = imported
            .get(&life.species)
            .or_else(|| settings.species.get(&life.species))
            .with_context(|| format!("Invalid species {}", life.species))?;

        placer
            .place(pattern, life.position)
            .with_context(|| {
                format!("Could not insert {} in position {}", life.species, life.position)
            })?;
    }

    if world.is_empty() {
        warn!("world starts with no live cells");
    }
    info!(population = world.population(), "seeded world");

    Ok(world)
}

/// Run the configured number of generations, rendering each one to `out`.
///
/// Zero generations means run forever.
pub fn run<S: GridStorage, W: Write>(
    world: &mut World<S>,
    settings: &Settings,
    out: &mut W,
) -> Result<RunSummary> {
    let pause = settings.simulation.generation_duration()?;
    let printer = Printer::from(&settings.output);
    let rules = RuleSet::from(settings.simulation.rule);
    let generations = settings.simulation.generations;

    let mut generator = Generator::with_rules(world, rules).parallel(settings.simulation.parallel);
    let start = Instant::now();

    info!(
        rule = %settings.simulation.rule,
        generations,
        parallel = settings.simulation.parallel,
        "starting simulation"
    );

    while generations == 0 || generator.generation() < generations {
        if settings.output.clear_screen {
            write!(out, "\x1b[2J\x1b[H")?;
        }
        write!(out, "{}", printer.render(generator.world()))?;
        out.flush()?;

        if !pause.is_zero() {
            std::thread::sleep(pause);
        }
        generator.step();
    }

    Ok(RunSummary {
        generations: generator.generation(),
        population: generator.world().population(),
        elapsed: start.elapsed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PopulationEntry;
    use crate::game_of_life::{Coord, DenseGrid, SparseGrid};

    fn quiet_settings() -> Settings {
        let mut settings = Settings::default();
        settings.world.height = 5;
        settings.world.width = 5;
        settings.simulation.generation_duration = "0ms".to_string();
        settings.output.clear_screen = false;
        settings
    }

    #[test]
    fn test_build_world_from_positions() {
        let mut settings = quiet_settings();
        settings.seeding.positions = vec![Coord::new(0, 0), Coord::new(4, 4)];
        let world: World<DenseGrid> = build_world(&settings, &BTreeMap::new()).unwrap();
        assert_eq!(world.population(), 2);
    }

    #[test]
    fn test_build_world_rejects_invalid_position() {
        let mut settings = quiet_settings();
        settings.seeding.positions = vec![Coord::new(5, 0)];
        assert!(build_world::<DenseGrid>(&settings, &BTreeMap::new()).is_err());
    }

    #[test]
    fn test_build_world_places_species() {
        let mut settings = quiet_settings();
        settings
            .species
            .insert("blinker".to_string(), Pattern::new(vec![vec![1, 1, 1]]).unwrap());
        settings.population.push(PopulationEntry {
            species: "blinker".to_string(),
            position: Coord::new(1, 2),
        });

        let world: World<SparseGrid> = build_world(&settings, &BTreeMap::new()).unwrap();
        assert_eq!(world.population(), 3);
        assert!(world.is_cell_live(Coord::new(3, 2)).unwrap());

        settings.population[0].species = "unknown".to_string();
        assert!(build_world::<SparseGrid>(&settings, &BTreeMap::new()).is_err());
    }

    #[test]
    fn test_build_world_rejects_far_population_position() {
        let content = "
world: {height: 5, width: 5}
species:
  blinker: [[1, 1, 1]]
population:
  - species: blinker
    position: [9223372036854775807, 0]
";
        let settings = Settings::from_yaml_str(content).unwrap();
        let err = build_world::<DenseGrid>(&settings, &BTreeMap::new()).unwrap_err();
        assert!(err.to_string().contains("Could not insert blinker"));
    }

    #[test]
    fn test_imported_species_take_precedence() {
        let mut settings = quiet_settings();
        settings
            .species
            .insert("thing".to_string(), Pattern::new(vec![vec![1]]).unwrap());
        settings.population.push(PopulationEntry {
            species: "thing".to_string(),
            position: Coord::new(0, 0),
        });
        let mut imported = BTreeMap::new();
        imported.insert("thing".to_string(), Pattern::new(vec![vec![1, 1]]).unwrap());

        let world: World<DenseGrid> = build_world(&settings, &imported).unwrap();
        assert_eq!(world.population(), 2);
    }

    #[test]
    fn test_seeded_random_cells_are_reproducible() {
        let mut settings = quiet_settings();
        settings.seeding.random_cells = 10;
        settings.seeding.seed = Some(1234);

        let first: World<DenseGrid> = build_world(&settings, &BTreeMap::new()).unwrap();
        let second: World<DenseGrid> = build_world(&settings, &BTreeMap::new()).unwrap();
        assert_eq!(first.live_cells(), second.live_cells());
    }

    #[test]
    fn test_run_renders_each_generation() {
        let mut settings = quiet_settings();
        settings.simulation.generations = 2;
        settings.seeding.positions = vec![Coord::new(2, 1), Coord::new(2, 2), Coord::new(2, 3)];

        let mut world: World<DenseGrid> = build_world(&settings, &BTreeMap::new()).unwrap();
        let mut out = Vec::new();
        let summary = run(&mut world, &settings, &mut out).unwrap();

        assert_eq!(summary.generations, 2);
        assert_eq!(summary.population, 3);

        let rendered = String::from_utf8(out).unwrap();
        let frame = "#######\n#     #\n#  o  #\n#  o  #\n#  o  #\n#     #\n#######\n";
        assert!(rendered.starts_with(frame));
        assert_eq!(rendered.matches("#######\n").count(), 4);
    }
}
