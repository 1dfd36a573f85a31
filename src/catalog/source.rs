//! Storage behind the catalog
//!
//! The store never touches the filesystem directly; it asks a
//! [`CatalogSource`] for files by their path relative to the catalog root.

use std::io;
use std::path::{Path, PathBuf};

/// Trait for reading persisted catalog files
pub trait CatalogSource: Send + Sync {
    /// Read the file at `relative` (relative to the catalog root)
    fn read_to_string(&self, relative: &Path) -> io::Result<String>;

    /// Human-readable location of `relative`, for diagnostics
    fn locate(&self, relative: &Path) -> String {
        relative.display().to_string()
    }
}

/// Catalog stored in a directory tree
#[derive(Debug, Clone)]
pub struct FsCatalogSource {
    root: PathBuf,
}

impl FsCatalogSource {
    /// Create a source rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl CatalogSource for FsCatalogSource {
    fn read_to_string(&self, relative: &Path) -> io::Result<String> {
        std::fs::read_to_string(self.root.join(relative))
    }

    fn locate(&self, relative: &Path) -> String {
        self.root.join(relative).display().to_string()
    }
}
