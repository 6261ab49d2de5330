//! Configuration settings for the simulator

use crate::game_of_life::{Coord, Geometry, LifeRule, Pattern};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub world: WorldConfig,
    pub simulation: SimulationConfig,
    pub seeding: SeedingConfig,
    pub species: BTreeMap<String, Pattern>,
    pub population: Vec<PopulationEntry>,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
    pub height: usize,
    pub width: usize,
    pub toroidal: bool,
    pub storage: StorageKind,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    #[default]
    Dense,
    Sparse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Zero means run until interrupted
    pub generations: u64,
    pub generation_duration: String,
    pub rule: LifeRule,
    pub parallel: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeedingConfig {
    pub positions: Vec<Coord>,
    pub random_cells: usize,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PopulationEntry {
    pub species: String,
    pub position: Coord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub border: char,
    pub live: char,
    pub clear_screen: bool,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            height: 20,
            width: 40,
            toroidal: false,
            storage: StorageKind::Dense,
        }
    }
}

impl WorldConfig {
    pub fn geometry(&self) -> Geometry {
        if self.toroidal {
            Geometry::Toroidal
        } else {
            Geometry::Bounded
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            generations: 100,
            generation_duration: "100ms".to_string(),
            rule: LifeRule::conway(),
            parallel: false,
        }
    }
}

impl SimulationConfig {
    pub fn generation_duration(&self) -> Result<Duration> {
        parse_duration(&self.generation_duration)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            border: '#',
            live: 'o',
            clear_screen: true,
        }
    }
}

impl Settings {
    /// Load settings from a YAML (or JSON) file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings = Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(settings)
    }

    /// Parse and validate settings from YAML (or JSON) text.
    ///
    /// Documents whose top-level keys are capitalised (`Size`, `Circular`, ...)
    /// are read with the legacy JSON layout.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)?;
        let settings = if value.is_null() {
            Settings::default()
        } else if is_legacy_layout(&value) {
            let legacy: LegacyConfig = serde_yaml::from_value(value)
                .context("Failed to parse legacy config")?;
            Settings::from(legacy)
        } else {
            serde_yaml::from_value(value)?
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.world.height == 0 || self.world.width == 0 {
            anyhow::bail!(
                "World dimensions must be positive (got {}x{})",
                self.world.height,
                self.world.width
            );
        }

        self.simulation
            .generation_duration()
            .context("Invalid generation duration")?;

        if self.output.border == self.output.live {
            anyhow::bail!("Border and live characters must differ");
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(generations) = cli_overrides.generations {
            self.simulation.generations = generations;
        }
        if let Some(rule) = cli_overrides.rule {
            self.simulation.rule = rule;
        }
        if cli_overrides.parallel {
            self.simulation.parallel = true;
        }
        if cli_overrides.sparse {
            self.world.storage = StorageKind::Sparse;
        }
        if let Some(seed) = cli_overrides.seed {
            self.seeding.seed = Some(seed);
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub generations: Option<u64>,
    pub rule: Option<LifeRule>,
    pub parallel: bool,
    pub sparse: bool,
    pub seed: Option<u64>,
}

/// Flat, capitalised layout used by older JSON configs
#[derive(Debug, Deserialize)]
#[serde(default, rename_all = "PascalCase", deny_unknown_fields)]
struct LegacyConfig {
    size: LegacySize,
    generation_duration: String,
    random_cells: usize,
    circular: bool,
    positions: Vec<Coord>,
    species: BTreeMap<String, Pattern>,
    population: Vec<LegacyPopulation>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
struct LegacySize {
    height: usize,
    width: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
struct LegacyPopulation {
    specie: String,
    position: LegacyCoord,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LegacyCoord {
    #[serde(rename = "X")]
    x: i64,
    #[serde(rename = "Y")]
    y: i64,
}

impl Default for LegacyConfig {
    fn default() -> Self {
        Self {
            size: LegacySize::default(),
            generation_duration: "0".to_string(),
            random_cells: 0,
            circular: false,
            positions: Vec::new(),
            species: BTreeMap::new(),
            population: Vec::new(),
        }
    }
}

impl From<LegacyConfig> for Settings {
    fn from(legacy: LegacyConfig) -> Self {
        Self {
            world: WorldConfig {
                height: legacy.size.height,
                width: legacy.size.width,
                toroidal: legacy.circular,
                storage: StorageKind::Dense,
            },
            simulation: SimulationConfig {
                generations: 0,
                generation_duration: legacy.generation_duration,
                ..SimulationConfig::default()
            },
            seeding: SeedingConfig {
                positions: legacy.positions,
                random_cells: legacy.random_cells,
                seed: None,
            },
            species: legacy.species,
            population: legacy
                .population
                .into_iter()
                .map(|entry| PopulationEntry {
                    species: entry.specie,
                    position: Coord::new(entry.position.x, entry.position.y),
                })
                .collect(),
            output: OutputConfig::default(),
        }
    }
}

fn is_legacy_layout(value: &serde_yaml::Value) -> bool {
    value.as_mapping().is_some_and(|mapping| {
        mapping.keys().any(|key| {
            key.as_str()
                .and_then(|k| k.chars().next())
                .is_some_and(|c| c.is_ascii_uppercase())
        })
    })
}

/// Location of the configuration written by `setup`
pub fn default_config_path(directory: &Path) -> PathBuf {
    directory.join("config").join("default.yaml")
}

/// Parse durations such as `500ms`, `2s`, `1.5s` or `1m30s`
pub fn parse_duration(text: &str) -> Result<Duration> {
    let text = text.trim();
    if text.is_empty() {
        anyhow::bail!("Empty duration");
    }
    if text == "0" {
        return Ok(Duration::ZERO);
    }

    let mut total = Duration::ZERO;
    let mut rest = text;

    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if number_len == 0 {
            anyhow::bail!("Expected a number in duration \"{}\"", text);
        }
        let value: f64 = rest[..number_len]
            .parse()
            .with_context(|| format!("Invalid number in duration \"{}\"", text))?;
        rest = &rest[number_len..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let nanos_per_unit = match &rest[..unit_len] {
            "ns" => 1.0,
            "us" | "µs" => 1e3,
            "ms" => 1e6,
            "s" => 1e9,
            "m" => 60e9,
            "h" => 3600e9,
            "" => anyhow::bail!("Missing unit in duration \"{}\"", text),
            unit => anyhow::bail!("Unknown unit \"{}\" in duration \"{}\"", unit, text),
        };
        rest = &rest[unit_len..];

        total += Duration::from_nanos((value * nanos_per_unit).round() as u64);
    }

    Ok(total)
}
