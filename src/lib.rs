//! Catalog Complete Library
//!
//! Tab completion for large, multi-level command-line tools, driven by a
//! persisted command catalog that is materialized one node at a time.
//!
//! # Modules
//!
//! - `catalog`: Catalog entries, lazily materialized command nodes and the store
//! - `completion`: Token classification and candidate resolution
//! - `parser`: Command-line tokenization for hosts
//! - `config`: Configuration management
//! - `error`: Error types and handling
//! - `formatter`: Output formatting and display
//! - `repl`: Interactive REPL engine
//! - `cli`: Command-line interface and argument parsing
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use catalog_complete::{CatalogStore, CompletionEngine, config::Config, parser};
//!
//! let config = Config::default();
//! let engine = CompletionEngine::new(Arc::new(CatalogStore::open(&config.catalog)));
//!
//! let line = "az vm ";
//! let elements = parser::tokenize(line);
//! let candidates = engine.get_completions("", &elements, line.len()).unwrap();
//! for candidate in candidates {
//!     println!("{}", candidate.insert_text);
//! }
//! ```

pub mod catalog;
pub mod cli;
pub mod completion;
pub mod config;
pub mod error;
pub mod formatter;
pub mod parser;
pub mod repl;

// Re-export commonly used types
pub use catalog::{CatalogStore, CommandNode};
pub use completion::{Candidate, CandidateKind, CompletionEngine};
pub use config::Config;
pub use error::{CompleteError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
pub fn version() -> &'static str {
    VERSION
}
