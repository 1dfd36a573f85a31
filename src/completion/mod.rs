//! Completion resolver
//!
//! Given a tokenized command line and a cursor position, decides whether the
//! user is typing a sub-command, an option name or an option value, and
//! produces the matching candidates from the lazy catalog.
//!
//! # Architecture
//!
//! - **TokenStream**: command-line elements with cursor awareness
//! - **Classifier**: walks the command path and picks the completion mode
//! - **Context**: standardized representation of what to complete
//! - **Matcher**: case-insensitive wildcard prefix matching
//! - **Engine**: orchestrates the entire completion flow
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use catalog_complete::catalog::CatalogStore;
//! use catalog_complete::completion::CompletionEngine;
//! use catalog_complete::config::CatalogConfig;
//!
//! let store = Arc::new(CatalogStore::open(&CatalogConfig::default()));
//! let engine = CompletionEngine::new(store);
//!
//! // Complete "az vm cr" with the cursor at the end
//! let (start, candidates) = engine.complete_line("az vm cr", 8);
//! ```

mod classifier;
mod context;
mod engine;
mod matcher;
mod token_stream;

pub use classifier::{Classification, CompletionMode, TokenClassifier};
pub use context::CompletionContext;
pub use engine::{Candidate, CandidateKind, CompletionEngine, HELP_FLAGS};
pub use matcher::{Matcher, SpellingSet};
pub use token_stream::{CommandElement, ElementKind, TokenStream};
