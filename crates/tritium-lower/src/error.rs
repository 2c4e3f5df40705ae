use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::ir::{BlockId, LocalId};

/// Errors loading a [`PassConfig`](crate::config::PassConfig).
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("Error reading lowering configuration {path}: {message}")]
    #[diagnostic(
        code("LOWER-001"),
        help("Check that the file exists and is readable")
    )]
    Read { path: PathBuf, message: String },

    /// The configuration is not valid TOML or has unknown keys
    #[error("Invalid lowering configuration: {0}")]
    #[diagnostic(
        code("LOWER-002"),
        help("Known keys are lower, fold, warn, stats, helper_prefix, widths and the [features] table")
    )]
    Parse(String),

    /// A configured helper width is outside 1..=128 trits
    #[error("Unsupported helper width {0}")]
    #[diagnostic(
        code("LOWER-003"),
        help("Helper widths must be between 1 and 128 trits")
    )]
    Width(u32),

    /// The helper prefix is not a valid symbol prefix
    #[error("Invalid helper prefix '{0}'")]
    #[diagnostic(
        code("LOWER-004"),
        help("Use a non-empty prefix made of ASCII letters, digits and underscores")
    )]
    Prefix(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.message().to_string())
    }
}

/// Errors raised while rewriting a function.
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum LowerError {
    /// A statement refers to a local the function does not declare
    #[error("Unknown local {0} in function '{1}'")]
    #[diagnostic(code("LOWER-101"))]
    UnknownLocal(LocalId, String),

    /// A block id does not belong to the function
    #[error("Unknown basic block {0} in function '{1}'")]
    #[diagnostic(code("LOWER-102"))]
    UnknownBlock(BlockId, String),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}
