//! Lazy command catalog
//!
//! The catalog describes every group, command, and option of the wrapped
//! tool. It is far too large to load at once, so the tree is materialized
//! one node at a time:
//!
//! - **Entry**: what a group knows about each child before loading it
//! - **Node**: a materialized group or command
//! - **Store**: owns the root and the storage behind it
//! - **Source**: where catalog files come from
//!
//! # Examples
//!
//! ```no_run
//! use catalog_complete::catalog::CatalogStore;
//! use catalog_complete::config::CatalogConfig;
//!
//! let store = CatalogStore::open(&CatalogConfig::default());
//! let vm = store.resolve_path(["vm", "create"]).unwrap();
//! ```

mod entry;
pub mod format;
mod node;
mod source;
mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use entry::{
    CatalogEntry, CatalogOption, CommandKind, LONG_PREFIX, SHORT_PREFIX, fold_case,
    is_long_form, is_short_form,
};
pub use node::{CommandNode, CommandSpec, GroupNode, NodeHeader};
pub use source::{CatalogSource, FsCatalogSource};
pub use store::CatalogStore;
