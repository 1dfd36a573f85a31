//! Catalog entries and options
//!
//! Immutable descriptors of groups, commands, and options as they appear in
//! the persisted catalog. Constructors validate their input and fail fast.

use std::fmt;

use crate::error::{CatalogError, Result};

/// Long-option prefix shared by every option name and alias.
pub const LONG_PREFIX: &str = "--";

/// Single-dash prefix of short forms.
pub const SHORT_PREFIX: &str = "-";

/// Kind of a catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// Has children, materialized lazily
    Group,
    /// Terminal command owning an option list
    Command,
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandKind::Group => write!(f, "Group"),
            CommandKind::Command => write!(f, "Command"),
        }
    }
}

/// A named reference to a child of a group, before the child is materialized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    name: String,
    kind: CommandKind,
    description: String,
    attribute: Option<String>,
}

impl CatalogEntry {
    /// Create a new entry
    ///
    /// # Arguments
    /// * `name` - Entry name, non-empty
    /// * `kind` - Group or command
    /// * `description` - Human description, non-empty
    /// * `attribute` - Optional tag such as "Preview" or "Experimental"
    ///
    /// # Returns
    /// * `Result<Self>` - The entry, or `CatalogError::InvalidEntry`
    pub fn new(
        name: impl Into<String>,
        kind: CommandKind,
        description: impl Into<String>,
        attribute: Option<String>,
    ) -> Result<Self> {
        let name = name.into();
        let description = description.into();
        require_non_empty(&name, "entry name")?;
        require_non_empty(&description, &format!("description of entry '{name}'"))?;

        Ok(Self {
            name,
            kind,
            description,
            attribute: normalize_attribute(attribute),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn attribute(&self) -> Option<&str> {
        self.attribute.as_deref()
    }

    /// Tool-tip shown next to the entry in a completion list
    pub fn tool_tip(&self) -> String {
        tool_tip(self.attribute(), &self.description)
    }
}

/// One option of a terminal command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogOption {
    name: String,
    aliases: Vec<String>,
    short_forms: Vec<String>,
    attribute: Option<String>,
    description: String,
    arguments: Option<Vec<String>>,
}

impl CatalogOption {
    /// Create a new option
    ///
    /// The long name and every alias must begin with `--`; every short form
    /// must be a single dash followed by a single character. No spelling may
    /// repeat inside one option (case-insensitive).
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        aliases: Vec<String>,
        short_forms: Vec<String>,
        attribute: Option<String>,
        arguments: Option<Vec<String>>,
    ) -> Result<Self> {
        let name = name.into();
        let description = description.into();
        require_non_empty(&name, "option name")?;
        require_non_empty(&description, &format!("description of option '{name}'"))?;

        for long in std::iter::once(&name).chain(aliases.iter()) {
            if !is_long_form(long) {
                return Err(CatalogError::invalid(format!(
                    "option spelling '{long}' must start with '{LONG_PREFIX}'"
                ))
                .into());
            }
        }

        for short in &short_forms {
            if !is_short_form(short) {
                return Err(CatalogError::invalid(format!(
                    "short form '{short}' of option '{name}' must be '-' followed by one character"
                ))
                .into());
            }
        }

        let mut seen = crate::completion::SpellingSet::new();
        for spelling in std::iter::once(&name)
            .chain(aliases.iter())
            .chain(short_forms.iter())
        {
            if !seen.insert(spelling) {
                return Err(CatalogError::invalid(format!(
                    "option '{name}' declares spelling '{spelling}' more than once"
                ))
                .into());
            }
        }

        Ok(Self {
            name,
            aliases,
            short_forms,
            attribute: normalize_attribute(attribute),
            description,
            arguments,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn short_forms(&self) -> &[String] {
        &self.short_forms
    }

    pub fn attribute(&self) -> Option<&str> {
        self.attribute.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Literal values the option accepts, when it declares an enumeration
    pub fn arguments(&self) -> Option<&[String]> {
        self.arguments.as_deref()
    }

    /// Every spelling in declaration order: long name, aliases, short forms
    pub fn spellings(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str())
            .chain(self.aliases.iter().map(String::as_str))
            .chain(self.short_forms.iter().map(String::as_str))
    }

    /// Case-insensitive exact match against any spelling
    pub fn is_spelled(&self, spelling: &str) -> bool {
        let wanted = fold_case(spelling);
        self.spellings().any(|s| fold_case(s) == wanted)
    }

    /// Tool-tip shown next to each of this option's spellings
    pub fn tool_tip(&self) -> String {
        tool_tip(self.attribute(), &self.description)
    }
}

/// Case folding shared by every name and spelling comparison
pub fn fold_case(text: &str) -> String {
    text.to_lowercase()
}

/// True for `--name` spellings
pub fn is_long_form(spelling: &str) -> bool {
    spelling.len() > LONG_PREFIX.len() && spelling.starts_with(LONG_PREFIX)
}

/// True for `-x` spellings
pub fn is_short_form(spelling: &str) -> bool {
    let mut chars = spelling.chars();
    chars.next() == Some('-')
        && matches!(chars.next(), Some(c) if c != '-')
        && chars.next().is_none()
}

fn tool_tip(attribute: Option<&str>, description: &str) -> String {
    match attribute {
        Some(attr) => format!("{attr} {description}"),
        None => description.to_string(),
    }
}

/// Blank attributes are absent; `[Preview]` is stored as `Preview`
fn normalize_attribute(attribute: Option<String>) -> Option<String> {
    let attribute = attribute?;
    let trimmed = attribute.trim();
    let bare = trimmed
        .strip_prefix('[')
        .and_then(|a| a.strip_suffix(']'))
        .unwrap_or(trimmed)
        .trim();
    (!bare.is_empty()).then(|| bare.to_string())
}

pub(crate) fn require_non_empty(value: &str, what: &str) -> Result<()> {
    if value.is_empty() {
        return Err(CatalogError::invalid(format!("{what} cannot be empty")).into());
    }
    Ok(())
}
