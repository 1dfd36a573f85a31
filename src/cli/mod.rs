//! Command-line interface for catalog-complete
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and validation
//! - Dispatch of the one-shot subcommands and the REPL

mod completion;

pub use completion::generate_completion;

use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

use crate::catalog::CatalogStore;
use crate::completion::{Candidate, CompletionEngine, TokenStream};
use crate::config::{Config, LogLevel, OutputFormat};
use crate::error::Result;
use crate::formatter::Formatter;
use crate::parser::tokenize;
use crate::repl::ReplEngine;

/// Catalog-driven tab completion for large command-line tools
#[derive(Parser, Debug)]
#[command(
    name = "catalog-complete",
    version,
    about = "Tab completion for large CLIs from a lazily loaded command catalog",
    long_about = "Resolves tab-completion candidates for a multi-level command-line tool
from a persisted command catalog, loading only the parts of the catalog a request needs."
)]
pub struct CliArgs {
    /// Catalog directory (overrides the config file)
    #[arg(long, value_name = "DIR")]
    pub catalog: Option<PathBuf>,

    /// Root program name (overrides the config file)
    #[arg(long, value_name = "NAME")]
    pub program: Option<String>,

    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Output format (plain, json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Print tool-tips next to candidates
    #[arg(long)]
    pub descriptions: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Quiet mode (errors only)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose mode (detailed logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (trace logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands for catalog-complete
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print completion candidates for a command line
    Complete {
        /// Cursor byte offset (defaults to the end of the line)
        #[arg(long, value_name = "OFFSET")]
        cursor: Option<usize>,

        /// Partial word under completion (defaults to the text typed so far)
        #[arg(long, value_name = "WORD", allow_hyphen_values = true)]
        word: Option<String>,

        /// Command line, program name first
        #[arg(last = true, value_name = "LINE")]
        line: Vec<String>,
    },

    /// Describe the group or command a command line names
    Describe {
        /// Command line, program name first
        #[arg(last = true, value_name = "LINE")]
        line: Vec<String>,
    },

    /// Start an interactive prompt with TAB completion
    Repl,

    /// Generate shell completion script
    Completion {
        /// Shell type (bash, zsh, fish)
        #[arg(value_name = "SHELL")]
        shell: String,
    },

    /// Show version information
    Version,

    /// Show configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Validate configuration file
        #[arg(long)]
        validate: bool,
    },
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Loaded configuration
    config: Config,
}

impl CliInterface {
    /// Create a new CLI interface from the process arguments
    pub fn new() -> Result<Self> {
        Self::from_args(CliArgs::parse())
    }

    /// Create a CLI interface from already parsed arguments
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let config = Self::load_config(&args)?;
        Ok(Self { args, config })
    }

    /// Load configuration from file and merge with arguments
    fn load_config(args: &CliArgs) -> Result<Config> {
        let mut config = Config::load_from_file(args.config_file.as_deref())?;

        if let Err(e) = config.validate() {
            eprintln!("Warning: Configuration validation failed: {}", e);
            eprintln!("Using default configuration instead.");
            config = Config::default();
        }

        Self::apply_args_to_config(&mut config, args);
        Ok(config)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Apply CLI arguments to configuration
    fn apply_args_to_config(config: &mut Config, args: &CliArgs) {
        Self::apply_catalog_args(config, args);
        Self::apply_display_args(config, args);
        Self::apply_logging_args(config, args);
    }

    fn apply_catalog_args(config: &mut Config, args: &CliArgs) {
        if let Some(root) = &args.catalog {
            config.catalog.root = root.clone();
        }
        if let Some(program) = args.program.as_ref().filter(|p| !p.trim().is_empty()) {
            config.catalog.program = program.clone();
        }
    }

    fn apply_display_args(config: &mut Config, args: &CliArgs) {
        if let Some(format_str) = &args.format {
            config.display.format = Self::parse_output_format(format_str);
        }
        if args.descriptions {
            config.display.descriptions = true;
        }
    }

    fn apply_logging_args(config: &mut Config, args: &CliArgs) {
        config.logging.level = if args.very_verbose {
            LogLevel::Trace
        } else if args.verbose {
            LogLevel::Debug
        } else if args.quiet {
            LogLevel::Error
        } else {
            config.logging.level
        };
    }

    /// Parse output format string
    fn parse_output_format(format_str: &str) -> OutputFormat {
        match format_str.to_lowercase().as_str() {
            "plain" | "text" => OutputFormat::Plain,
            "json" => OutputFormat::Json,
            _ => {
                eprintln!("Warning: Unknown format '{}', using default", format_str);
                OutputFormat::Plain
            }
        }
    }

    fn use_colors(&self) -> bool {
        !self.args.no_color && std::io::stdout().is_terminal()
    }

    fn formatter(&self) -> Formatter {
        Formatter::from_config(&self.config.display, self.use_colors())
    }

    fn engine(&self) -> CompletionEngine {
        CompletionEngine::new(Arc::new(CatalogStore::open(&self.config.catalog)))
    }

    /// Run the selected subcommand
    pub fn run(&self) -> Result<()> {
        match &self.args.command {
            Commands::Complete { cursor, word, line } => {
                let line = line.join(" ");
                let candidates =
                    complete_command_line(&self.engine(), &line, *cursor, word.as_deref());
                let output = self.formatter().format_candidates(&candidates)?;
                if !output.is_empty() {
                    println!("{}", output);
                }
                Ok(())
            }
            Commands::Describe { line } => {
                let elements = tokenize(&line.join(" "));
                let node = self.engine().resolve_node(&elements)?;
                println!("{}", self.formatter().format_node(&node)?);
                Ok(())
            }
            Commands::Repl => {
                let engine = Arc::new(self.engine());
                let mut repl = ReplEngine::new(engine, self.formatter(), &self.config.history)?;
                repl.run()
            }
            Commands::Completion { shell } => {
                print!("{}", generate_completion(shell, &self.config.catalog.program)?);
                Ok(())
            }
            Commands::Version => {
                self.show_version();
                Ok(())
            }
            Commands::Config { show, validate } => self.handle_config_command(*show, *validate),
        }
    }

    /// Show version information
    fn show_version(&self) {
        println!("catalog-complete version {}", env!("CARGO_PKG_VERSION"));
        println!("Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
    }

    /// Handle config subcommand
    fn handle_config_command(&self, show: bool, validate: bool) -> Result<()> {
        if validate {
            self.validate_config_file();
        }
        if show {
            self.show_config()?;
        }
        Ok(())
    }

    /// Validate configuration file
    fn validate_config_file(&self) {
        let path = self.get_config_path();
        println!("Validating configuration file: {}", path.display());

        if !path.exists() {
            println!("Configuration file does not exist");
            return;
        }

        match Config::load_from_file(Some(&path)) {
            Ok(config) => match config.validate() {
                Ok(_) => println!("Configuration is valid"),
                Err(e) => println!("Configuration validation failed: {}", e),
            },
            Err(e) => println!("Failed to load configuration: {}", e),
        }
    }

    /// Show effective configuration
    fn show_config(&self) -> Result<()> {
        println!("Configuration file: {}", self.get_config_path().display());
        println!();
        println!("=== Effective Configuration ===");
        println!();
        println!("{}", self.config.to_toml()?);
        Ok(())
    }

    /// Get configuration file path (from args or default)
    fn get_config_path(&self) -> PathBuf {
        self.args
            .config_file
            .clone()
            .unwrap_or_else(Config::default_path)
    }
}

/// Candidates for `line` the way a shell hook asks for them
///
/// The cursor defaults to the end of the line and the partial word to the
/// text of the element under the cursor, cut at the cursor. Catalog
/// failures are logged and yield no candidates.
pub fn complete_command_line(
    engine: &CompletionEngine,
    line: &str,
    cursor: Option<usize>,
    word: Option<&str>,
) -> Vec<Candidate> {
    let elements = tokenize(line);
    let cursor = cursor.unwrap_or(line.len()).min(line.len());
    let partial = match word {
        Some(word) => word.to_string(),
        None => TokenStream::new(&elements, cursor).partial_word(),
    };
    engine.complete(&partial, &elements, cursor)
}
