//! Pattern file I/O (Life 1.05 text format)

use super::Pattern;
use crate::error::{LifeError, LifeResult};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;

/// Load a pattern from a `.lif` file
pub fn load_pattern_from_file<P: AsRef<Path>>(path: P) -> Result<Pattern> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read pattern file: {}", path.as_ref().display()))?;

    parse_pattern(&content)
        .with_context(|| format!("Failed to parse pattern from file: {}", path.as_ref().display()))
}

/// Parse a Life 1.05 pattern.
///
/// `.` is a dead cell, `*` and `O` are live ones. Lines starting with `#`
/// (headers, descriptions, offsets) and blank lines are skipped; shorter rows
/// are padded with dead cells.
pub fn parse_pattern(content: &str) -> LifeResult<Pattern> {
    let lines: Vec<(usize, &str)> = content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim_matches(' ')))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .collect();

    let width = lines.iter().map(|(_, line)| line.chars().count()).max().unwrap_or(0);

    let mut cells = Vec::with_capacity(lines.len());

    for (line_number, line) in lines {
        let mut row = vec![false; width];
        for (col, ch) in line.chars().enumerate() {
            row[col] = match ch {
                '.' => false,
                '*' | 'O' => true,
                _ => return Err(LifeError::InvalidPatternChar { ch, line: line_number }),
            };
        }
        cells.push(row);
    }

    Pattern::from_cells(cells)
}

/// Convert a pattern to Life 1.05 text
pub fn pattern_to_string(pattern: &Pattern) -> String {
    format!("#Life 1.05\n{}", pattern)
}

/// Save a pattern to a `.lif` file
pub fn save_pattern_to_file<P: AsRef<Path>>(pattern: &Pattern, path: P) -> Result<()> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, pattern_to_string(pattern))
        .with_context(|| format!("Failed to write pattern to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Load several `name=path` imports into a species map
pub fn import_species<'a, I>(imports: I) -> Result<BTreeMap<String, Pattern>>
where
    I: IntoIterator<Item = (&'a str, &'a Path)>,
{
    let mut species = BTreeMap::new();

    for (name, path) in imports {
        if species.contains_key(name) {
            anyhow::bail!("Cannot define imported life \"{}\" more than once", name);
        }
        let pattern = load_pattern_from_file(path)
            .with_context(|| format!("Could not import \"{}\"", name))?;
        species.insert(name.to_string(), pattern);
    }

    Ok(species)
}

/// Create example pattern files
pub fn create_example_patterns<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let examples = [
        ("glider.lif", "#Life 1.05\n#D This is a glider.\n#N\n#P -1 -1\n.*\n..*\n***\n"),
        ("blinker.lif", "#Life 1.05\n#D Period 2 oscillator\n***\n"),
        ("block.lif", "#Life 1.05\n#D Still life\n**\n**\n"),
        ("beacon.lif", "#Life 1.05\n#D Period 2 oscillator\n**..\n**..\n..**\n..**\n"),
    ];

    for (name, content) in examples {
        std::fs::write(dir.join(name), content)
            .with_context(|| format!("Failed to write {}", name))?;
    }

    Ok(())
}
