//! Error types for the simulation engine

use crate::game_of_life::Coord;
use thiserror::Error;

/// Errors produced by world construction, cell access, placement and parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifeError {
    #[error("Impossible world: {height}x{width} (both dimensions must be positive)")]
    ImpossibleWorld { height: usize, width: usize },

    #[error("Invalid coordinate {0}")]
    InvalidCoordinate(Coord),

    #[error("Invalid position {origin} for a {height}x{width} form of life")]
    InvalidPlacement {
        origin: Coord,
        height: usize,
        width: usize,
    },

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Invalid char '{ch}' on line {line}")]
    InvalidPatternChar { ch: char, line: usize },

    #[error("Invalid rule: {0}")]
    InvalidRule(String),
}

pub type LifeResult<T> = std::result::Result<T, LifeError>;
