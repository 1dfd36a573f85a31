//! Completer for reedline - provides completion suggestions

use std::sync::Arc;

use reedline::{Completer, Span, Suggestion};

use crate::completion::CompletionEngine;
use crate::parser::with_program;

/// Catalog completer for reedline
pub struct CatalogCompleter {
    /// Completion engine shared with the REPL
    engine: Arc<CompletionEngine>,
    /// Program name implied at the start of every line
    program: String,
}

impl CatalogCompleter {
    /// Create a new catalog completer
    ///
    /// # Arguments
    /// * `engine` - Completion engine
    /// * `program` - Root program name, prepended when the line omits it
    pub fn new(engine: Arc<CompletionEngine>, program: impl Into<String>) -> Self {
        Self {
            engine,
            program: program.into(),
        }
    }
}

impl Completer for CatalogCompleter {
    /// Complete the input at the given cursor position
    ///
    /// # Arguments
    /// * `line` - The input line
    /// * `pos` - Cursor position (byte index)
    ///
    /// # Returns
    /// * `Vec<Suggestion>` - List of completion suggestions
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let (full, shift) = with_program(&self.program, line);
        let (start, candidates) = self.engine.complete_line(&full, pos + shift);
        let start = start.saturating_sub(shift).min(pos);

        candidates
            .into_iter()
            .map(|candidate| Suggestion {
                value: candidate.insert_text,
                description: Some(candidate.tool_tip).filter(|t| !t.is_empty()),
                span: Span::new(start, pos),
                append_whitespace: true,
                ..Default::default()
            })
            .collect()
    }
}
