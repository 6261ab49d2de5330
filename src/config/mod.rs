//! Configuration management for the simulator

pub mod settings;

pub use settings::{
    parse_duration, CliOverrides, OutputConfig, PopulationEntry, SeedingConfig, Settings,
    SimulationConfig, StorageKind, WorldConfig,
};
