use std::{fmt, io};

/// Crate-wide `Result` type using [`CompleteError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, CompleteError>;

/// Top-level error type for catalog completion.
///
/// This type wraps more specific error kinds and provides a single
/// error type that can be used throughout the crate.
#[derive(Debug)]
pub enum CompleteError {
    /// Catalog loading or validation errors.
    Catalog(CatalogError),

    /// Configuration errors.
    Config(ConfigError),

    /// I/O errors.
    Io(io::Error),

    /// JSON encoding errors while rendering output.
    Json(serde_json::Error),

    /// Line editor errors.
    Readline(String),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Catalog-specific errors.
#[derive(Debug)]
pub enum CatalogError {
    /// A child declared in its parent's listing has no readable or
    /// parseable persisted file.
    Corrupt { path: String, reason: String },

    /// An entry, option, or node violates its construction rules.
    InvalidEntry(String),
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },
}

impl CatalogError {
    /// Build a corruption error for a catalog file.
    pub fn corrupt(path: impl Into<String>, reason: impl fmt::Display) -> Self {
        CatalogError::Corrupt {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Build a malformed-input error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        CatalogError::InvalidEntry(msg.into())
    }
}

impl CompleteError {
    /// True when the error means the persisted catalog is unusable for the
    /// requested sub-tree.
    pub fn is_catalog_corrupt(&self) -> bool {
        matches!(self, CompleteError::Catalog(CatalogError::Corrupt { .. }))
    }
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for CompleteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompleteError::Catalog(e) => write!(f, "Catalog error: {e}"),
            CompleteError::Config(e) => write!(f, "Configuration error: {e}"),
            CompleteError::Io(e) => write!(f, "I/O error: {e}"),
            CompleteError::Json(e) => write!(f, "JSON error: {e}"),
            CompleteError::Readline(msg) => write!(f, "Readline error: {msg}"),
            CompleteError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Corrupt { path, reason } => {
                write!(f, "corrupt catalog file '{path}': {reason}")
            }
            CatalogError::InvalidEntry(msg) => write!(f, "invalid catalog entry: {msg}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
        }
    }
}

impl std::error::Error for CompleteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompleteError::Catalog(e) => Some(e),
            CompleteError::Config(e) => Some(e),
            CompleteError::Io(e) => Some(e),
            CompleteError::Json(e) => Some(e),
            _ => None,
        }
    }
}
impl std::error::Error for CatalogError {}
impl std::error::Error for ConfigError {}

/* ========================= Conversions to CompleteError ========================= */

impl From<io::Error> for CompleteError {
    fn from(err: io::Error) -> Self {
        CompleteError::Io(err)
    }
}

impl From<serde_json::Error> for CompleteError {
    fn from(err: serde_json::Error) -> Self {
        CompleteError::Json(err)
    }
}

impl From<CatalogError> for CompleteError {
    fn from(err: CatalogError) -> Self {
        CompleteError::Catalog(err)
    }
}

impl From<ConfigError> for CompleteError {
    fn from(err: ConfigError) -> Self {
        CompleteError::Config(err)
    }
}

impl From<reedline::ReedlineError> for CompleteError {
    fn from(err: reedline::ReedlineError) -> Self {
        CompleteError::Readline(err.to_string())
    }
}

impl From<String> for CompleteError {
    fn from(msg: String) -> Self {
        CompleteError::Generic(msg)
    }
}

impl From<&str> for CompleteError {
    fn from(msg: &str) -> Self {
        CompleteError::Generic(msg.to_owned())
    }
}
