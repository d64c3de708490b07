//! Configuration loader for the fnlang parser and CLI.
//!
//! `defaults/fnlang.default.toml` is embedded into the crate so that the documented defaults
//! and runtime behavior stay in sync. Applications layer user files and command-line overrides
//! on top of those defaults via [`Loader`] before deserializing into [`FnlangConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::path::Path;

use crate::fnlang::parsing::Rule;

const DEFAULT_TOML: &str = include_str!("../../defaults/fnlang.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FnlangConfig {
    pub limits: LimitsConfig,
    pub output: OutputConfig,
}

/// Bounds on input shape, checked before parsing so that adversarial input fails cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LimitsConfig {
    pub max_nesting_depth: usize,
    pub max_operator_chain: usize,
}

static DEFAULT_LIMITS: Lazy<LimitsConfig> = Lazy::new(|| {
    load_defaults()
        .map(|config| config.limits)
        .expect("embedded defaults deserialize")
});

impl Default for LimitsConfig {
    /// The `[limits]` table of the embedded defaults file
    fn default() -> Self {
        DEFAULT_LIMITS.clone()
    }
}

/// How the CLI prints results.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub default_rule: Rule,
    pub format: OutputFormat,
    pub pretty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// The JSON projection
    Json,
    /// The compact `Display` rendering
    Tree,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (used for command-line flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<FnlangConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<FnlangConfig, ConfigError> {
    Loader::new().build()
}
