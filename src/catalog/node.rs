//! Command nodes of the catalog tree
//!
//! A node is either a [`GroupNode`], which lists child entries and
//! materializes them on first access, or a [`CommandSpec`], a terminal
//! command owning its options.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use super::entry::{CatalogEntry, CatalogOption, CommandKind, fold_case, require_non_empty};
use super::format;
use super::source::CatalogSource;
use crate::error::{CatalogError, Result};

/// Name and description shared by both node variants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeHeader {
    pub name: String,
    pub description: String,
}

impl NodeHeader {
    fn new(name: String, description: String) -> Result<Self> {
        require_non_empty(&name, "node name")?;
        require_non_empty(&description, &format!("description of node '{name}'"))?;
        Ok(Self { name, description })
    }
}

/// A node of the catalog tree
#[derive(Debug)]
pub enum CommandNode {
    Group(GroupNode),
    Command(CommandSpec),
}

impl CommandNode {
    pub fn header(&self) -> &NodeHeader {
        match self {
            CommandNode::Group(g) => &g.header,
            CommandNode::Command(c) => &c.header,
        }
    }

    pub fn name(&self) -> &str {
        &self.header().name
    }

    pub fn description(&self) -> &str {
        &self.header().description
    }

    pub fn kind(&self) -> CommandKind {
        match self {
            CommandNode::Group(_) => CommandKind::Group,
            CommandNode::Command(_) => CommandKind::Command,
        }
    }

    pub fn as_group(&self) -> Option<&GroupNode> {
        match self {
            CommandNode::Group(g) => Some(g),
            CommandNode::Command(_) => None,
        }
    }

    pub fn as_command(&self) -> Option<&CommandSpec> {
        match self {
            CommandNode::Command(c) => Some(c),
            CommandNode::Group(_) => None,
        }
    }
}

/// A group of commands whose children are loaded on demand
#[derive(Debug)]
pub struct GroupNode {
    header: NodeHeader,
    /// Directory of this group, relative to the catalog root
    location: PathBuf,
    entries: Vec<CatalogEntry>,
    /// Folded entry name -> position in `entries`
    index: HashMap<String, usize>,
    /// Folded entry name -> materialized child. Entries are never replaced.
    children: RwLock<HashMap<String, Arc<CommandNode>>>,
}

impl GroupNode {
    /// Create a group from its child listing
    ///
    /// # Arguments
    /// * `name` - Group name
    /// * `description` - Group description
    /// * `location` - Directory of the group relative to the catalog root
    /// * `entries` - Child entries in declaration order, non-empty and unique
    ///   (case-insensitive)
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        location: impl Into<PathBuf>,
        entries: Vec<CatalogEntry>,
    ) -> Result<Self> {
        let header = NodeHeader::new(name.into(), description.into())?;
        if entries.is_empty() {
            return Err(CatalogError::invalid(format!(
                "group '{}' has no child entries",
                header.name
            ))
            .into());
        }

        let mut index = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if index.insert(fold_case(entry.name()), position).is_some() {
                return Err(CatalogError::invalid(format!(
                    "group '{}' lists '{}' more than once",
                    header.name,
                    entry.name()
                ))
                .into());
            }
        }

        Ok(Self {
            header,
            location: location.into(),
            entries,
            index,
            children: RwLock::new(HashMap::new()),
        })
    }

    pub fn name(&self) -> &str {
        &self.header.name
    }

    pub fn description(&self) -> &str {
        &self.header.description
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Child entries in declaration order
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Look up a child entry by name, case-insensitive
    pub fn entry(&self, name: &str) -> Option<&CatalogEntry> {
        self.index.get(&fold_case(name)).map(|&i| &self.entries[i])
    }

    /// Number of children materialized so far
    pub fn materialized_count(&self) -> usize {
        self.children
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Resolve a child by name, materializing it on first access
    ///
    /// Returns `Ok(None)` when the group declares no such child. The first
    /// successful call for a name reads storage once and caches the node;
    /// later calls return the same `Arc` without touching storage. The
    /// populate step runs under the group's write lock, so concurrent
    /// callers still materialize each child at most once.
    ///
    /// # Errors
    /// `CatalogError::Corrupt` when the child's file is missing or malformed.
    pub fn child(&self, name: &str, source: &dyn CatalogSource) -> Result<Option<Arc<CommandNode>>> {
        let key = fold_case(name);
        let Some(&position) = self.index.get(&key) else {
            return Ok(None);
        };

        if let Some(node) = self
            .children
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Ok(Some(Arc::clone(node)));
        }

        let mut children = self.children.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(node) = children.get(&key) {
            return Ok(Some(Arc::clone(node)));
        }

        let node = Arc::new(self.materialize(&self.entries[position], source)?);
        children.insert(key, Arc::clone(&node));
        Ok(Some(node))
    }

    fn materialize(&self, entry: &CatalogEntry, source: &dyn CatalogSource) -> Result<CommandNode> {
        match entry.kind() {
            CommandKind::Group => {
                let location = self.location.join(entry.name());
                let file = format::group_listing_path(&self.location, entry.name());
                debug!(group = entry.name(), file = %file.display(), "materializing group");

                let origin = source.locate(&file);
                let text = format::read(source, &file)?;
                let entries = format::parse_listing(&origin, &text)?;
                let group = GroupNode::new(entry.name(), entry.description(), location, entries)
                    .map_err(|e| format::into_corrupt(&origin, e))?;
                Ok(CommandNode::Group(group))
            }
            CommandKind::Command => {
                let file = format::command_path(&self.location, entry.name());
                debug!(command = entry.name(), file = %file.display(), "materializing command");

                let origin = source.locate(&file);
                let text = format::read(source, &file)?;
                let command = format::parse_command(&origin, &text)?;
                Ok(CommandNode::Command(command))
            }
        }
    }
}

/// A terminal command and its options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    header: NodeHeader,
    options: Vec<CatalogOption>,
    examples: Option<String>,
}

impl CommandSpec {
    /// Create a command; `options` must be non-empty
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        options: Vec<CatalogOption>,
        examples: Option<String>,
    ) -> Result<Self> {
        let header = NodeHeader::new(name.into(), description.into())?;
        if options.is_empty() {
            return Err(CatalogError::invalid(format!(
                "command '{}' has no options",
                header.name
            ))
            .into());
        }

        Ok(Self {
            header,
            options,
            examples: examples.filter(|e| !e.trim().is_empty()),
        })
    }

    pub fn name(&self) -> &str {
        &self.header.name
    }

    pub fn description(&self) -> &str {
        &self.header.description
    }

    /// Options in declaration order
    pub fn options(&self) -> &[CatalogOption] {
        &self.options
    }

    pub fn examples(&self) -> Option<&str> {
        self.examples.as_deref()
    }

    /// Find an option by any of its spellings (case-insensitive, exact)
    pub fn find_option(&self, spelling: &str) -> Option<&CatalogOption> {
        self.options.iter().find(|o| o.is_spelled(spelling))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::testing::{MemoryCatalogSource, entry, option};

    fn sample_group() -> GroupNode {
        GroupNode::new(
            "az",
            "root",
            "",
            vec![
                entry("vm", CommandKind::Group, "Manage VMs."),
                entry("login", CommandKind::Command, "Log in."),
            ],
        )
        .unwrap()
    }

    fn sample_source() -> MemoryCatalogSource {
        MemoryCatalogSource::new()
            .with_file(
                "vm/vm-entries.json",
                r#"[{"name": "create", "type": "Command", "description": "Create a VM."}]"#,
            )
            .with_file(
                "login.json",
                r#"{"name": "login", "description": "Log in.",
                    "options": [{"name": "--tenant", "short": ["-t"], "description": "Tenant."}]}"#,
            )
    }

    #[test]
    fn test_group_rejects_duplicate_names() {
        let err = GroupNode::new(
            "az",
            "root",
            "",
            vec![
                entry("vm", CommandKind::Group, "a"),
                entry("VM", CommandKind::Command, "b"),
            ],
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_group_rejects_empty_listing() {
        assert!(GroupNode::new("az", "root", "", vec![]).is_err());
    }

    #[test]
    fn test_entry_lookup_case_insensitive() {
        let group = sample_group();
        assert_eq!(group.entry("VM").map(|e| e.name()), Some("vm"));
        assert!(group.entry("vmss").is_none());
    }

    #[test]
    fn test_child_unknown_name() {
        let group = sample_group();
        let source = sample_source();
        assert!(group.child("nope", &source).unwrap().is_none());
        assert_eq!(source.reads(), 0);
    }

    #[test]
    fn test_child_materialized_once() {
        let group = sample_group();
        let source = sample_source();

        let first = group.child("vm", &source).unwrap().unwrap();
        let second = group.child("VM", &source).unwrap().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.reads(), 1);
        assert_eq!(group.materialized_count(), 1);

        let vm = first.as_group().unwrap();
        assert_eq!(vm.location(), Path::new("vm"));
        assert_eq!(vm.description(), "Manage VMs.");
        assert_eq!(vm.entries()[0].name(), "create");
    }

    #[test]
    fn test_child_command() {
        let group = sample_group();
        let source = sample_source();

        let login = group.child("login", &source).unwrap().unwrap();
        let command = login.as_command().unwrap();
        assert_eq!(command.options().len(), 1);
        assert_eq!(command.find_option("-T").map(|o| o.name()), Some("--tenant"));
    }

    #[test]
    fn test_child_missing_file_is_corrupt() {
        let group = sample_group();
        let source = MemoryCatalogSource::new();

        let err = group.child("vm", &source).unwrap_err();
        assert!(err.is_catalog_corrupt());
        // failures are not cached
        assert_eq!(group.materialized_count(), 0);
    }

    #[test]
    fn test_command_requires_options() {
        assert!(CommandSpec::new("login", "Log in.", vec![], None).is_err());
    }

    #[test]
    fn test_find_option_by_alias() {
        let command = CommandSpec::new(
            "create",
            "Create.",
            vec![
                option("--name", &["--resource-name"], &["-n"], None),
                option("--output", &[], &["-o"], Some(&["json", "table"])),
            ],
            Some("   ".to_string()),
        )
        .unwrap();

        assert_eq!(
            command.find_option("--RESOURCE-NAME").map(|o| o.name()),
            Some("--name")
        );
        assert!(command.find_option("--out").is_none());
        assert_eq!(command.examples(), None);
    }
}
