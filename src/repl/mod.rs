//! Interactive REPL for exploring the catalog
//!
//! This module provides a line editor with:
//! - TAB completion backed by the completion engine
//! - Command history management
//! - A description of the resolved group or command on Enter

mod completer;
mod prompt;

pub use completer::CatalogCompleter;
pub use prompt::CatalogPrompt;

use std::sync::Arc;

use reedline::{
    ColumnarMenu, Emacs, FileBackedHistory, KeyCode, KeyModifiers, MenuBuilder, Reedline,
    ReedlineEvent, ReedlineMenu, Signal, default_emacs_keybindings,
};
use tracing::{debug, warn};

use crate::completion::CompletionEngine;
use crate::config::HistoryConfig;
use crate::error::Result;
use crate::formatter::Formatter;
use crate::parser::{tokenize, with_program};

const COMPLETION_MENU: &str = "completion_menu";

/// What the REPL does with one submitted line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplAction {
    /// Print this text
    Print(String),
    /// Leave the loop
    Exit,
    /// Nothing to do
    Skip,
}

/// REPL engine for interactive completion
pub struct ReplEngine {
    /// Line editor for command input
    editor: Reedline,

    prompt: CatalogPrompt,

    engine: Arc<CompletionEngine>,

    formatter: Formatter,

    /// Whether to continue running
    running: bool,
}

impl ReplEngine {
    /// Create a new REPL engine
    ///
    /// # Arguments
    /// * `engine` - Completion engine over the loaded catalog
    /// * `formatter` - Formatter for node descriptions
    /// * `history_config` - History configuration
    ///
    /// # Returns
    /// * `Result<Self>` - New REPL engine or error
    pub fn new(
        engine: Arc<CompletionEngine>,
        formatter: Formatter,
        history_config: &HistoryConfig,
    ) -> Result<Self> {
        let program = engine.store().program().to_string();
        let completer = Box::new(CatalogCompleter::new(Arc::clone(&engine), program.clone()));
        let menu = Box::new(ColumnarMenu::default().with_name(COMPLETION_MENU));

        let mut keybindings = default_emacs_keybindings();
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu(COMPLETION_MENU.to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );

        let mut editor = Reedline::create()
            .with_completer(completer)
            .with_menu(ReedlineMenu::EngineCompleter(menu))
            .with_edit_mode(Box::new(Emacs::new(keybindings)));

        if history_config.persist {
            if let Some(parent) = history_config.file_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let history = FileBackedHistory::with_file(
                history_config.max_size,
                history_config.file_path.clone(),
            )?;
            editor = editor.with_history(Box::new(history));
        }

        Ok(Self {
            editor,
            prompt: CatalogPrompt::new(program),
            engine,
            formatter,
            running: true,
        })
    }

    /// Run the loop until EOF or `exit`
    pub fn run(&mut self) -> Result<()> {
        while self.running {
            match self.editor.read_line(&self.prompt)? {
                Signal::Success(line) => match process_line(&self.engine, &self.formatter, &line) {
                    ReplAction::Print(text) => println!("{text}"),
                    ReplAction::Exit => self.running = false,
                    ReplAction::Skip => {}
                },
                Signal::CtrlD => self.running = false,
                _ => {}
            }
        }
        Ok(())
    }
}

/// Handle one submitted line
///
/// The deepest node named by the line is described; catalog failures are
/// logged and reported without leaving the loop.
pub fn process_line(engine: &CompletionEngine, formatter: &Formatter, line: &str) -> ReplAction {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ReplAction::Skip;
    }
    if matches!(trimmed, "exit" | "quit") {
        return ReplAction::Exit;
    }

    let (full, _) = with_program(engine.store().program(), trimmed);
    let elements = tokenize(&full);
    debug!(line = %full, "describing node");

    let described = engine
        .resolve_node(&elements)
        .and_then(|node| formatter.format_node(&node));
    match described {
        Ok(text) => ReplAction::Print(text),
        Err(e) => {
            warn!(error = %e, "cannot describe command line");
            ReplAction::Print(format!("Error: {e}"))
        }
    }
}
