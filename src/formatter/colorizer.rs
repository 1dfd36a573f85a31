//! Color output support for terminal formatting

use nu_ansi_term::{Color, Style};

/// Color scheme for node descriptions
#[derive(Debug, Clone, Copy)]
pub struct Colorizer {
    /// Enable colors
    enabled: bool,
}

impl Colorizer {
    /// Create a new colorizer
    ///
    /// # Arguments
    /// * `enabled` - Enable color output
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn paint(&self, style: Style, text: &str) -> String {
        if self.enabled {
            style.paint(text).to_string()
        } else {
            text.to_string()
        }
    }

    /// Section heading (bold)
    pub fn heading(&self, text: &str) -> String {
        self.paint(Style::new().bold(), text)
    }

    /// Group, command or option name (cyan)
    pub fn name(&self, text: &str) -> String {
        self.paint(Color::Cyan.normal(), text)
    }

    /// Attribute tag such as `Preview` (yellow)
    pub fn attribute(&self, text: &str) -> String {
        self.paint(Color::Yellow.normal(), text)
    }

    /// Secondary text such as allowed values (dimmed)
    pub fn dim(&self, text: &str) -> String {
        self.paint(Style::new().dimmed(), text)
    }
}
