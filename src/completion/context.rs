//! Completion context definitions
//!
//! A context says what kind of candidate the element under the cursor
//! wants, independent of where the candidates come from.

use std::sync::Arc;

use super::matcher::SpellingSet;
use crate::catalog::CommandNode;

/// What to complete at the cursor
#[derive(Debug, Clone)]
pub enum CompletionContext {
    /// Child entry names of a group
    SubCommand {
        group: Arc<CommandNode>,
        prefix: String,
    },

    /// Allowed values of the option spelled `option` on a command
    ParameterValue {
        command: Arc<CommandNode>,
        option: String,
        prefix: String,
    },

    /// Option spellings of a command not already on the line
    ParameterName {
        command: Arc<CommandNode>,
        prefix: String,
        used: SpellingSet,
    },

    /// Built-in help flags of a group
    HelpFlags { prefix: String },

    /// No completion available
    None,
}

impl CompletionContext {
    /// Get the prefix for this context
    pub fn prefix(&self) -> &str {
        match self {
            Self::SubCommand { prefix, .. }
            | Self::ParameterValue { prefix, .. }
            | Self::ParameterName { prefix, .. }
            | Self::HelpFlags { prefix } => prefix,
            Self::None => "",
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Short label used in diagnostics
    pub fn label(&self) -> &'static str {
        match self {
            Self::SubCommand { .. } => "sub-command",
            Self::ParameterValue { .. } => "parameter-value",
            Self::ParameterName { .. } => "parameter-name",
            Self::HelpFlags { .. } => "help-flags",
            Self::None => "none",
        }
    }
}
