//! Error handling module for catalog completion.
//!
//! Errors fall into three families:
//! - Catalog errors: a persisted file is missing or malformed, or an entry
//!   violates its construction rules
//! - Configuration errors
//! - Host errors (I/O, JSON output, line editor)
//!
//! Only catalog corruption ever escapes the resolver; hosts log it and show
//! no suggestions.
//!
//! # Example
//!
//! ```rust
//! use catalog_complete::error::{CatalogError, CompleteError, Result};
//!
//! fn load() -> Result<()> {
//!     Err(CatalogError::corrupt("az-entries.json", "unexpected end of file").into())
//! }
//!
//! assert!(load().unwrap_err().is_catalog_corrupt());
//! ```

pub mod kinds;

// Re-export commonly used types
pub use kinds::{CatalogError, CompleteError, ConfigError, Result};
