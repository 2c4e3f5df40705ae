//! Configuration of the lowering pass.
//!
//! Mirrors the plugin options of a host compiler as a TOML document:
//!
//! ```toml
//! lower = true
//! warn = false
//! helper_prefix = "__ternary"
//! widths = [32, 64]
//!
//! [features]
//! arith = true
//! cmp = true
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tritium_core::{Category, Width};

use crate::error::ConfigError;

pub const DEFAULT_PREFIX: &str = "__ternary";

/// Widths the runtime ships helpers for.
pub const DEFAULT_WIDTHS: [u32; 6] = [6, 12, 24, 32, 64, 128];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PassConfig {
    /// Lower conditional expressions to select helpers
    pub lower: bool,

    /// Evaluate constant operations and apply algebraic identities
    pub fold: bool,

    /// Warn about every ternary operation found
    pub warn: bool,

    /// Log a summary after each function
    pub stats: bool,

    /// Operation categories to rewrite
    pub features: Features,

    /// Prefix of every helper symbol
    pub helper_prefix: String,

    /// Trit widths helpers exist for
    pub widths: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Features {
    pub arith: bool,
    pub logic: bool,
    pub cmp: bool,
    pub shift: bool,
    pub conv: bool,
    pub mem: bool,
    pub vector: bool,
}

impl Default for PassConfig {
    fn default() -> Self {
        Self {
            lower: false,
            fold: true,
            warn: false,
            stats: false,
            features: Features::default(),
            helper_prefix: DEFAULT_PREFIX.to_string(),
            widths: DEFAULT_WIDTHS.to_vec(),
        }
    }
}

impl Features {
    pub fn all() -> Self {
        Self {
            arith: true,
            logic: true,
            cmp: true,
            shift: true,
            conv: true,
            mem: true,
            vector: true,
        }
    }

    pub fn enabled(&self, category: Category) -> bool {
        match category {
            Category::Arith => self.arith,
            Category::Logic => self.logic,
            Category::Cmp => self.cmp,
            Category::Shift => self.shift,
            Category::Conv => self.conv,
            Category::Mem => self.mem,
        }
    }
}

impl PassConfig {
    /// Everything switched on.
    pub fn all() -> Self {
        Self {
            lower: true,
            features: Features::all(),
            ..Self::default()
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: PassConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|err| ConfigError::Read {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let prefix_ok = !self.helper_prefix.is_empty()
            && self
                .helper_prefix
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
            && !self.helper_prefix.starts_with(|c: char| c.is_ascii_digit());
        if !prefix_ok {
            return Err(ConfigError::Prefix(self.helper_prefix.clone()));
        }
        self.helper_widths().map(|_| ())
    }

    /// The configured widths as [`Width`]s, sorted and deduplicated.
    pub fn helper_widths(&self) -> Result<Vec<Width>, ConfigError> {
        let mut widths = self
            .widths
            .iter()
            .map(|&trits| Width::new(trits).map_err(|_| ConfigError::Width(trits)))
            .collect::<Result<Vec<_>, _>>()?;
        widths.sort();
        widths.dedup();
        Ok(widths)
    }
}
