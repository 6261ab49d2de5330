//! Patterns ("species"): small 0/1 matrices placed onto a world

use super::coord::Coord;
use crate::error::{LifeError, LifeResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A rectangular pattern of live and dead cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u8>>", into = "Vec<Vec<u8>>")]
pub struct Pattern {
    height: usize,
    width: usize,
    cells: Vec<bool>,
}

impl Pattern {
    /// Create a pattern from rows of `0` (dead) and `1` (alive)
    pub fn new(rows: Vec<Vec<u8>>) -> LifeResult<Self> {
        let cells = rows
            .into_iter()
            .enumerate()
            .map(|(row_idx, row)| {
                row.into_iter()
                    .map(|value| match value {
                        0 => Ok(false),
                        1 => Ok(true),
                        other => Err(LifeError::InvalidPattern(format!(
                            "value {} in row {}; only 0 and 1 are allowed",
                            other, row_idx
                        ))),
                    })
                    .collect::<LifeResult<Vec<bool>>>()
            })
            .collect::<LifeResult<Vec<Vec<bool>>>>()?;

        Self::from_cells(cells)
    }

    /// Create a pattern from a 2D boolean array
    pub fn from_cells(cells: Vec<Vec<bool>>) -> LifeResult<Self> {
        if cells.is_empty() || cells[0].is_empty() {
            return Err(LifeError::InvalidPattern("pattern cannot be empty".to_string()));
        }

        let height = cells.len();
        let width = cells[0].len();

        if let Some((i, row)) = cells.iter().enumerate().find(|(_, row)| row.len() != width) {
            return Err(LifeError::InvalidPattern(format!(
                "row {} has length {}, expected {}",
                i,
                row.len(),
                width
            )));
        }

        Ok(Self {
            height,
            width,
            cells: cells.into_iter().flatten().collect(),
        })
    }

    /// `(height, width)`
    pub fn size(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn is_live(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.cells[row * self.width + col]
    }

    /// Offsets `(col, row)` of live cells from the top-left corner
    pub fn live_offsets(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &live)| live)
            .map(move |(i, _)| Coord::new((i % self.width) as i64, (i / self.width) as i64))
    }

    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    pub fn rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(|&live| live as u8).collect())
            .collect()
    }
}

impl TryFrom<Vec<Vec<u8>>> for Pattern {
    type Error = LifeError;

    fn try_from(rows: Vec<Vec<u8>>) -> Result<Self, Self::Error> {
        Self::new(rows)
    }
}

impl From<Pattern> for Vec<Vec<u8>> {
    fn from(pattern: Pattern) -> Self {
        pattern.rows()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for &live in row {
                write!(f, "{}", if live { '*' } else { '.' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simplest() {
        let simple = Pattern::new(vec![vec![1]]).unwrap();
        assert_eq!(simple.size(), (1, 1));
        assert!(simple.is_live(0, 0));
    }

    #[test]
    fn test_glider_and_letter_l() {
        let glider = Pattern::new(vec![vec![0, 1, 0], vec![0, 0, 1], vec![1, 1, 1]]).unwrap();
        assert_eq!(glider.size(), (3, 3));
        assert_eq!(glider.living_count(), 5);

        let l = Pattern::new(vec![vec![1, 0], vec![1, 0], vec![1, 1]]).unwrap();
        assert_eq!(l.size(), (3, 2));
        let offsets: Vec<_> = l.live_offsets().collect();
        assert_eq!(
            offsets,
            vec![Coord::new(0, 0), Coord::new(0, 1), Coord::new(0, 2), Coord::new(1, 2)]
        );
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(Pattern::new(vec![]).is_err());
        assert!(Pattern::new(vec![vec![]]).is_err());
        assert!(Pattern::new(vec![vec![1, 0], vec![1]]).is_err());
        assert!(Pattern::new(vec![vec![2]]).is_err());
    }

    #[test]
    fn test_parse_from_matrix() {
        let pattern: Pattern = serde_json::from_str("[[0,1,0],[0,0,1],[1,1,1]]").unwrap();
        let glider = Pattern::new(vec![vec![0, 1, 0], vec![0, 0, 1], vec![1, 1, 1]]).unwrap();
        assert_eq!(pattern, glider);
        assert_eq!(serde_json::to_string(&glider).unwrap(), "[[0,1,0],[0,0,1],[1,1,1]]");
    }

    #[test]
    fn test_display() {
        let glider = Pattern::new(vec![vec![0, 1, 0], vec![0, 0, 1], vec![1, 1, 1]]).unwrap();
        assert_eq!(glider.to_string(), ".*.\n..*\n***\n");
    }
}
