//! Display and output formatting utilities

use crate::config::OutputConfig;
use crate::game_of_life::{Coord, GridStorage, Pattern, World};

/// Renders a world as bordered text
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    border: char,
    live: char,
}

impl Default for Printer {
    fn default() -> Self {
        Self {
            border: '#',
            live: 'o',
        }
    }
}

impl From<&OutputConfig> for Printer {
    fn from(config: &OutputConfig) -> Self {
        Self::new(config.border, config.live)
    }
}

impl Printer {
    pub fn new(border: char, live: char) -> Self {
        Self { border, live }
    }

    fn horizontal_border(&self, width: usize) -> String {
        let mut line: String = std::iter::repeat(self.border).take(width + 2).collect();
        line.push('\n');
        line
    }

    fn line<S: GridStorage>(&self, world: &World<S>, y: usize, width: usize) -> String {
        let mut output = String::with_capacity(width + 3);
        output.push(self.border);
        for x in 0..width {
            let live = world
                .is_cell_live(Coord::new(x as i64, y as i64))
                .unwrap_or(false);
            output.push(if live { self.live } else { ' ' });
        }
        output.push(self.border);
        output.push('\n');
        output
    }

    /// Render the current generation
    pub fn render<S: GridStorage>(&self, world: &World<S>) -> String {
        let (height, width) = world.size();
        let mut output = self.horizontal_border(width);
        for y in 0..height {
            output.push_str(&self.line(world, y, width));
        }
        output.push_str(&self.horizontal_border(width));
        output
    }
}

/// Format a pattern with column and row numbers
pub fn format_pattern_with_coords(pattern: &Pattern) -> String {
    let (height, width) = pattern.size();
    let mut output = String::new();

    // Header with column numbers
    output.push_str("   ");
    for x in 0..width {
        output.push_str(&format!("{:2}", x % 10));
    }
    output.push('\n');

    // Rows with row numbers
    for y in 0..height {
        output.push_str(&format!("{:2} ", y));
        for x in 0..width {
            output.push_str(if pattern.is_live(y, x) { "██" } else { "··" });
        }
        output.push('\n');
    }

    output
}

/// Status message tones for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Info,
}

impl Tone {
    fn ansi_code(self) -> u8 {
        match self {
            Tone::Success => 32,
            Tone::Warning => 33,
            Tone::Info => 34,
        }
    }

    /// Wrap `text` in this tone's ANSI colour unless `NO_COLOR` is set or the
    /// terminal is dumb
    pub fn paint(self, text: &str) -> String {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        let dumb = std::env::var("TERM").is_ok_and(|term| term == "dumb");
        if no_color || dumb {
            text.to_string()
        } else {
            format!("\x1b[{}m{}\x1b[0m", self.ansi_code(), text)
        }
    }
}
