//! Layered configuration for the CLI.
//!
//! `defaults/webmark.default.toml` is embedded into the binary. A user file
//! and command-line overrides are layered on top via [`Loader`].

use std::path::Path;
use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use webmark_package::PackageOptions;

const DEFAULT_TOML: &str = include_str!("../defaults/webmark.default.toml");

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct WebmarkConfig {
    pub fetch: FetchConfig,
    pub export: ExportConfig,
}

/// Image download settings.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct FetchConfig {
    pub timeout_secs: u64,
    pub concurrency: usize,
    pub user_agent: String,
}

impl FetchConfig {
    pub fn package_options(&self) -> PackageOptions {
        PackageOptions {
            timeout: Duration::from_secs(self.timeout_secs),
            concurrency: self.concurrency.max(1),
            user_agent: self.user_agent.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ExportConfig {
    pub default_name: String,
}

/// Layers user settings over the built-in defaults.
#[derive(Debug, Clone)]
pub(crate) struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start from the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files are an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<WebmarkConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
