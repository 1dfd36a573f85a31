//! Output formatting for completion results
//!
//! Renders candidate lists and node descriptions:
//! - Plain text (one candidate per line, help-style descriptions)
//! - JSON for programmatic hosts
//! - Optional color highlighting for descriptions

mod colorizer;
mod json;
mod plain;

pub use colorizer::Colorizer;
pub use json::JsonFormatter;
pub use plain::PlainFormatter;

use crate::catalog::CommandNode;
use crate::completion::Candidate;
use crate::config::{DisplayConfig, OutputFormat};
use crate::error::Result;

/// Main formatter, dispatching on the configured output format
pub struct Formatter {
    format: OutputFormat,
    plain: PlainFormatter,
    json: JsonFormatter,
}

impl Formatter {
    /// Create a new formatter
    ///
    /// # Arguments
    /// * `format` - Output format type
    /// * `descriptions` - Append tool-tips in plain candidate lists
    /// * `use_colors` - Enable colored descriptions
    pub fn new(format: OutputFormat, descriptions: bool, use_colors: bool) -> Self {
        Self {
            format,
            plain: PlainFormatter::new(descriptions, use_colors),
            json: JsonFormatter::new(true),
        }
    }

    /// Create a formatter from the display section of the configuration
    pub fn from_config(display: &DisplayConfig, use_colors: bool) -> Self {
        Self::new(display.format, display.descriptions, use_colors)
    }

    pub fn format_candidates(&self, candidates: &[Candidate]) -> Result<String> {
        match self.format {
            OutputFormat::Plain => Ok(self.plain.format_candidates(candidates)),
            OutputFormat::Json => self.json.format_candidates(candidates),
        }
    }

    pub fn format_node(&self, node: &CommandNode) -> Result<String> {
        match self.format {
            OutputFormat::Plain => Ok(self.plain.format_node(node)),
            OutputFormat::Json => self.json.format_node(node),
        }
    }
}
