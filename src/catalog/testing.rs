//! Test helpers: in-memory catalog source and entity builders

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::entry::{CatalogEntry, CatalogOption, CommandKind};
use super::source::CatalogSource;
use super::store::CatalogStore;

/// Catalog held in memory, counting every read
#[derive(Debug, Default)]
pub struct MemoryCatalogSource {
    files: HashMap<PathBuf, String>,
    reads: AtomicUsize,
}

impl MemoryCatalogSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: &str, text: &str) -> Self {
        self.files.insert(PathBuf::from(path), text.to_string());
        self
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl CatalogSource for MemoryCatalogSource {
    fn read_to_string(&self, relative: &Path) -> io::Result<String> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.files
            .get(relative)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, relative.display().to_string()))
    }
}

pub fn entry(name: &str, kind: CommandKind, description: &str) -> CatalogEntry {
    CatalogEntry::new(name, kind, description, None).unwrap()
}

pub fn option(
    name: &str,
    aliases: &[&str],
    shorts: &[&str],
    arguments: Option<&[&str]>,
) -> CatalogOption {
    CatalogOption::new(
        name,
        format!("Description of {name}."),
        aliases.iter().map(|s| s.to_string()).collect(),
        shorts.iter().map(|s| s.to_string()).collect(),
        None,
        arguments.map(|a| a.iter().map(|s| s.to_string()).collect()),
    )
    .unwrap()
}

/// The sample catalog used across completion tests:
///
/// ```text
/// tool
/// ├── group1 (Group)
/// │   ├── do-thing (Command: --output/-o [json, table], --name/--resource-name/-n, --verbose)
/// │   └── sub (Group)
/// │       └── deep (Command: --flag)
/// ├── group2 (Group, Preview)
/// │   └── broken (Command, file missing)
/// └── login (Command: --tenant/-t)
/// ```
pub fn sample_source() -> MemoryCatalogSource {
    MemoryCatalogSource::new()
        .with_file(
            "tool-entries.json",
            r#"[
                {"name": "group1", "type": "Group", "description": "First group."},
                {"name": "group2", "type": "Group", "description": "Second group.", "attribute": "Preview"},
                {"name": "login", "type": "Command", "description": "Log in."}
            ]"#,
        )
        .with_file(
            "group1/group1-entries.json",
            r#"[
                {"name": "do-thing", "type": "Command", "description": "Do the thing."},
                {"name": "sub", "type": "Group", "description": "Nested group."}
            ]"#,
        )
        .with_file(
            "group1/do-thing.json",
            r#"{
                "name": "do-thing",
                "description": "Do the thing.",
                "options": [
                    {"name": "--output", "short": ["-o"], "description": "Output format.",
                     "arguments": ["json", "table"]},
                    {"name": "--name", "alias": ["--resource-name"], "short": ["-n"],
                     "description": "Resource name."},
                    {"name": "--verbose", "attribute": "Preview", "description": "Chatty logs."}
                ]
            }"#,
        )
        .with_file(
            "group1/sub/sub-entries.json",
            r#"[{"name": "deep", "type": "Command", "description": "Deep command."}]"#,
        )
        .with_file(
            "group1/sub/deep.json",
            r#"{"name": "deep", "description": "Deep command.",
                "options": [{"name": "--flag", "description": "A flag."}]}"#,
        )
        .with_file(
            "group2/group2-entries.json",
            r#"[{"name": "broken", "type": "Command", "description": "Has no file."}]"#,
        )
        .with_file(
            "login.json",
            r#"{"name": "login", "description": "Log in.",
                "options": [{"name": "--tenant", "short": ["-t"], "description": "Tenant."}]}"#,
        )
}

pub fn sample_store() -> CatalogStore {
    CatalogStore::with_source(Arc::new(sample_source()), "tool", "tool root command")
}
