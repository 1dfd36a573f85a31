//! Persisted catalog format
//!
//! Layout under the catalog root:
//! - `<program>-entries.json` lists the root group's children
//! - a child group `g` of a group at directory `D` lives in
//!   `D/g/g-entries.json`
//! - a child command `c` of a group at directory `D` lives in `D/c.json`
//!
//! Listings are arrays of `{name, type, description, attribute?}`; command
//! descriptors are `{name, description, options: [...], examples?}`. Field
//! names written by the harvester in PascalCase are accepted too.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::entry::{CatalogEntry, CatalogOption, CommandKind};
use super::node::CommandSpec;
use super::source::CatalogSource;
use crate::error::{CatalogError, CompleteError, Result};

/// File listing the root group's children
pub fn root_listing_path(program: &str) -> PathBuf {
    PathBuf::from(format!("{program}-entries.json"))
}

/// File listing the children of group `name` declared under `parent`
pub fn group_listing_path(parent: &Path, name: &str) -> PathBuf {
    parent.join(name).join(format!("{name}-entries.json"))
}

/// Descriptor file of command `name` declared under `parent`
pub fn command_path(parent: &Path, name: &str) -> PathBuf {
    parent.join(format!("{name}.json"))
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(alias = "Name")]
    name: String,
    #[serde(rename = "type", alias = "Type")]
    kind: RawKind,
    #[serde(alias = "Description")]
    description: String,
    #[serde(default, alias = "Attribute")]
    attribute: Option<String>,
}

/// Entry kind as a name ("Group") or as the harvester's enum ordinal (0)
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawKind {
    Name(String),
    Ordinal(u8),
}

impl RawKind {
    fn resolve(&self) -> std::result::Result<CommandKind, String> {
        match self {
            RawKind::Name(name) if name.eq_ignore_ascii_case("group") => Ok(CommandKind::Group),
            RawKind::Name(name) if name.eq_ignore_ascii_case("command") => {
                Ok(CommandKind::Command)
            }
            RawKind::Ordinal(0) => Ok(CommandKind::Group),
            RawKind::Ordinal(1) => Ok(CommandKind::Command),
            RawKind::Name(other) => Err(format!("unknown entry type '{other}'")),
            RawKind::Ordinal(other) => Err(format!("unknown entry type {other}")),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawOption {
    #[serde(alias = "Name")]
    name: String,
    #[serde(default, alias = "Alias")]
    alias: Option<Vec<String>>,
    #[serde(default, alias = "Short")]
    short: Option<Vec<String>>,
    #[serde(default, alias = "Attribute")]
    attribute: Option<String>,
    #[serde(alias = "Description")]
    description: String,
    #[serde(default, alias = "Arguments")]
    arguments: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct RawCommand {
    #[serde(alias = "Name")]
    name: String,
    #[serde(alias = "Description")]
    description: String,
    #[serde(alias = "Options")]
    options: Vec<RawOption>,
    #[serde(default, alias = "Examples")]
    examples: Option<String>,
}

/// Parse a group listing
///
/// # Arguments
/// * `origin` - Location of the file, used in error messages
/// * `text` - File contents
pub fn parse_listing(origin: &str, text: &str) -> Result<Vec<CatalogEntry>> {
    let raw: Vec<RawEntry> = serde_json::from_str(text).map_err(|e| corrupt(origin, e))?;

    raw.into_iter()
        .map(|r| {
            let kind = r.kind.resolve().map_err(|e| corrupt(origin, e))?;
            CatalogEntry::new(r.name.trim(), kind, r.description, r.attribute)
                .map_err(|e| into_corrupt(origin, e))
        })
        .collect()
}

/// Parse a command descriptor
pub fn parse_command(origin: &str, text: &str) -> Result<CommandSpec> {
    let raw: RawCommand = serde_json::from_str(text).map_err(|e| corrupt(origin, e))?;

    let options = raw
        .options
        .into_iter()
        .map(|o| {
            CatalogOption::new(
                o.name.trim(),
                o.description,
                trimmed(o.alias),
                trimmed(o.short),
                o.attribute,
                o.arguments,
            )
        })
        .collect::<Result<Vec<_>>>()
        .map_err(|e| into_corrupt(origin, e))?;

    CommandSpec::new(raw.name, raw.description, options, raw.examples)
        .map_err(|e| into_corrupt(origin, e))
}

/// Spellings as captured by the harvester keep a trailing separator
fn trimmed(spellings: Option<Vec<String>>) -> Vec<String> {
    spellings
        .unwrap_or_default()
        .into_iter()
        .map(|s| s.trim().to_string())
        .collect()
}

/// Read a catalog file, reporting any failure as corruption
pub(crate) fn read(source: &dyn CatalogSource, file: &Path) -> Result<String> {
    source
        .read_to_string(file)
        .map_err(|e| corrupt(&source.locate(file), e))
}

/// Corruption error for the file at `origin`
pub(crate) fn corrupt(origin: &str, reason: impl fmt::Display) -> CompleteError {
    CatalogError::corrupt(origin, reason).into()
}

/// Reclassify a validation failure found inside a persisted file
pub(crate) fn into_corrupt(origin: &str, err: CompleteError) -> CompleteError {
    match err {
        CompleteError::Catalog(CatalogError::InvalidEntry(reason)) => corrupt(origin, reason),
        other => other,
    }
}
