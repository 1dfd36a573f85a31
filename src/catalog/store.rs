//! Catalog store
//!
//! Owns the root group and the storage it was loaded from. The host builds
//! one store per process and hands it to every completion request.

use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, info};

use super::format;
use super::node::{CommandNode, GroupNode};
use super::source::{CatalogSource, FsCatalogSource};
use crate::config::CatalogConfig;
use crate::error::Result;

/// Lazily materialized command catalog
pub struct CatalogStore {
    source: Arc<dyn CatalogSource>,
    program: String,
    description: String,
    root: RwLock<Option<Arc<CommandNode>>>,
}

impl CatalogStore {
    /// Open the on-disk catalog described by `config`
    ///
    /// Nothing is read until the first request needs the root.
    pub fn open(config: &CatalogConfig) -> Self {
        info!(root = %config.root.display(), program = %config.program, "opening catalog");
        Self::with_source(
            Arc::new(FsCatalogSource::new(config.root.clone())),
            config.program.clone(),
            config.root_description(),
        )
    }

    /// Create a store over an arbitrary source
    ///
    /// # Arguments
    /// * `source` - Storage holding the persisted catalog
    /// * `program` - Name of the root program; names the root listing file
    /// * `description` - Description of the root group
    pub fn with_source(
        source: Arc<dyn CatalogSource>,
        program: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            source,
            program: program.into(),
            description: description.into(),
            root: RwLock::new(None),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// The root group, loaded on first call and cached for the store's life
    ///
    /// # Errors
    /// `CatalogError::Corrupt` when the root listing is missing or malformed.
    pub fn root(&self) -> Result<Arc<CommandNode>> {
        if let Some(root) = self
            .root
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Ok(Arc::clone(root));
        }

        let mut slot = self.root.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(root) = slot.as_ref() {
            return Ok(Arc::clone(root));
        }

        let file = format::root_listing_path(&self.program);
        debug!(file = %file.display(), "loading root listing");
        let origin = self.source.locate(&file);
        let text = format::read(self.source.as_ref(), &file)?;
        let entries = format::parse_listing(&origin, &text)?;
        let group = GroupNode::new(
            self.program.clone(),
            self.description.clone(),
            PathBuf::new(),
            entries,
        )
        .map_err(|e| format::into_corrupt(&origin, e))?;

        let root = Arc::new(CommandNode::Group(group));
        *slot = Some(Arc::clone(&root));
        Ok(root)
    }

    /// Resolve a child of `group` by name, materializing it on first access
    ///
    /// Returns `Ok(None)` when `group` declares no such child.
    pub fn resolve_child(&self, group: &GroupNode, name: &str) -> Result<Option<Arc<CommandNode>>> {
        group.child(name, self.source.as_ref())
    }

    /// Walk a path of names from the root
    ///
    /// Returns `Ok(None)` as soon as a name is unknown or a command is asked
    /// for children.
    pub fn resolve_path<'a, I>(&self, names: I) -> Result<Option<Arc<CommandNode>>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut current = self.root()?;
        for name in names {
            let next = match current.as_group() {
                Some(group) => self.resolve_child(group, name)?,
                None => None,
            };
            match next {
                Some(node) => current = node,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testing::{MemoryCatalogSource, sample_source};

    fn store_with(source: Arc<MemoryCatalogSource>) -> CatalogStore {
        CatalogStore::with_source(source, "tool", "tool root command")
    }

    #[test]
    fn test_root_loaded_once() {
        let source = Arc::new(sample_source());
        let store = store_with(source.clone());
        assert_eq!(source.reads(), 0);

        let first = store.root().unwrap();
        let second = store.root().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.reads(), 1);

        assert_eq!(first.name(), "tool");
        assert_eq!(first.description(), "tool root command");
        let names: Vec<&str> = first
            .as_group()
            .unwrap()
            .entries()
            .iter()
            .map(|e| e.name())
            .collect();
        assert_eq!(names, vec!["group1", "group2", "login"]);
    }

    #[test]
    fn test_missing_root_is_corrupt() {
        let store = store_with(Arc::new(MemoryCatalogSource::new()));
        let err = store.root().unwrap_err();
        assert!(err.is_catalog_corrupt());
        assert!(err.to_string().contains("tool-entries.json"));
    }

    #[test]
    fn test_resolve_child_identity() {
        let source = Arc::new(sample_source());
        let store = store_with(source.clone());
        let root = store.root().unwrap();
        let group = root.as_group().unwrap();

        let a = store.resolve_child(group, "group1").unwrap().unwrap();
        let reads = source.reads();
        let b = store.resolve_child(group, "group1").unwrap().unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(source.reads(), reads);
    }

    #[test]
    fn test_resolve_path() {
        let store = store_with(Arc::new(sample_source()));

        let deep = store.resolve_path(["group1", "sub", "deep"]).unwrap().unwrap();
        assert_eq!(deep.name(), "deep");
        assert!(deep.as_command().is_some());

        assert!(store.resolve_path(["group1", "nope"]).unwrap().is_none());
        assert!(store.resolve_path(["login", "more"]).unwrap().is_none());
        assert_eq!(
            store
                .resolve_path(std::iter::empty())
                .unwrap()
                .unwrap()
                .name(),
            "tool"
        );
    }

    #[test]
    fn test_resolve_path_corrupt_child() {
        let store = store_with(Arc::new(sample_source()));
        let err = store.resolve_path(["group2", "broken"]).unwrap_err();
        assert!(err.is_catalog_corrupt());
    }

    #[test]
    fn test_concurrent_materialization_reads_once() {
        let source = Arc::new(sample_source());
        let store = Arc::new(store_with(source.clone()));
        store.root().unwrap();
        let before = source.reads();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.resolve_path(["group1"]).unwrap().unwrap())
            })
            .collect();
        let nodes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert!(nodes.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        assert_eq!(source.reads(), before + 1);
    }
}
