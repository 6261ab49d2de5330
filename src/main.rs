//! Main CLI application for the Game of Life simulator

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use life_engine::{
    config::{settings::default_config_path, CliOverrides, PopulationEntry, Settings},
    game_of_life::{
        create_example_patterns, import_species, load_pattern_from_file, LifeRule, Pattern,
    },
    utils::{format_pattern_with_coords, Tone},
    Coord,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "life_engine")]
#[command(about = "Conway's Game of Life simulator")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Import a pattern file as a named species (name=path), repeatable
        #[arg(short = 'i', long = "import", value_parser = parse_import)]
        imports: Vec<(String, PathBuf)>,

        /// Number of generations, 0 runs forever (overrides config)
        #[arg(short, long)]
        generations: Option<u64>,

        /// Rulestring such as B3/S23 (overrides config)
        #[arg(short, long)]
        rule: Option<LifeRule>,

        /// Seed for random cells (overrides config)
        #[arg(long)]
        seed: Option<u64>,

        /// Evaluate cells on all cores
        #[arg(long)]
        parallel: bool,

        /// Use sparse live-cell storage
        #[arg(long)]
        sparse: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create an example configuration and pattern files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Import a pattern file and print it
    Show {
        /// Pattern file (Life 1.05)
        pattern: PathBuf,
    },
}

fn parse_import(value: &str) -> Result<(String, PathBuf), String> {
    match value.split_once('=') {
        Some((name, path)) if !name.is_empty() && !path.is_empty() => {
            Ok((name.to_string(), PathBuf::from(path)))
        }
        _ => Err(format!("Could not parse option \"{}\", expected name=path", value)),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "life_engine=debug" } else { "life_engine=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // Logs go to stderr so they never interleave with rendered frames
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            imports,
            generations,
            rule,
            seed,
            parallel,
            sparse,
            verbose,
        } => {
            init_tracing(verbose);
            let overrides = CliOverrides { generations, rule, parallel, sparse, seed };
            run_command(config, imports, overrides)
        }
        Commands::Setup { directory, force } => {
            init_tracing(false);
            setup_command(directory, force)
        }
        Commands::Show { pattern } => {
            init_tracing(false);
            show_command(pattern)
        }
    }
}

fn run_command(
    config_path: PathBuf,
    imports: Vec<(String, PathBuf)>,
    overrides: CliOverrides,
) -> Result<()> {
    let mut settings = if config_path.exists() {
        Settings::from_file(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        let message = format!("Config file {} not found, using defaults", config_path.display());
        eprintln!("{}", Tone::Warning.paint(&message));
        Settings::default()
    };

    settings.merge_with_cli(&overrides);
    settings.validate()
        .context("Configuration validation failed")?;

    let imported = import_species(
        imports.iter().map(|(name, path)| (name.as_str(), path.as_path())),
    )?;

    let mut stdout = std::io::stdout().lock();
    let summary = life_engine::simulate(&settings, &imported, &mut stdout)?;

    info!(
        generations = summary.generations,
        population = summary.population,
        "simulation finished"
    );
    let message = format!(
        "Using {} steps has taken {:.3}s",
        summary.generations,
        summary.elapsed.as_secs_f64()
    );
    println!("{}", Tone::Success.paint(&message));

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", Tone::Info.paint("Setting up example files..."));

    let patterns_dir = directory.join("patterns");
    create_example_patterns(&patterns_dir)
        .context("Failed to create example patterns")?;
    println!("Created example patterns in: {}", patterns_dir.display());

    let config_path = default_config_path(&directory);
    if !config_path.exists() || force {
        let mut settings = Settings::default();
        settings.world.toroidal = true;
        settings.seeding.random_cells = 80;
        settings.species.insert(
            "glider".to_string(),
            Pattern::new(vec![vec![0, 1, 0], vec![0, 0, 1], vec![1, 1, 1]])?,
        );
        settings.population.push(PopulationEntry {
            species: "glider".to_string(),
            position: Coord::new(1, 1),
        });
        settings.to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    println!("\n{}", Tone::Success.paint("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit {}", config_path.display());
    println!(
        "2. Run: cargo run -- run --config {} -i beacon={}",
        config_path.display(),
        patterns_dir.join("beacon.lif").display()
    );

    Ok(())
}

fn show_command(pattern_path: PathBuf) -> Result<()> {
    let pattern = load_pattern_from_file(&pattern_path)?;
    let (height, width) = pattern.size();

    println!("Pattern {} ({}x{}):", pattern_path.display(), width, height);
    println!("{}", format_pattern_with_coords(&pattern));
    println!("Living cells: {}", pattern.living_count());

    Ok(())
}
