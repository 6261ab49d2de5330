//! Output helpers

pub mod display;

pub use display::{format_pattern_with_coords, Printer, Tone};
