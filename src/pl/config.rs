//! Configuration loading
//!
//! `defaults/pl.default.toml` is embedded into the crate so the documented defaults and the
//! runtime behavior stay in sync. Callers layer their own files and overrides on top through
//! [`Loader`] before deserializing into [`PlConfig`].

use crate::pl::parsing::ParseOptions;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/pl.default.toml");

/// Top-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PlConfig {
    pub parsing: ParsingConfig,
    pub output: OutputConfig,
}

/// Knobs of the parsing engine
#[derive(Debug, Clone, Deserialize)]
pub struct ParsingConfig {
    pub check_mandatory_keys: bool,
    pub mandatory_keys: Vec<String>,
    pub max_inheritance_depth: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: String,
}

impl From<&ParsingConfig> for ParseOptions {
    fn from(config: &ParsingConfig) -> Self {
        ParseOptions {
            check_mandatory_keys: config.check_mandatory_keys,
            mandatory_keys: config.mandatory_keys.clone(),
            max_inheritance_depth: config.max_inheritance_depth,
            ..ParseOptions::default()
        }
    }
}

/// Layers user overrides over the built-in defaults.
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

    /// Layer an optional configuration file, ignored if absent.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (CLI flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<PlConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration with nothing layered over the defaults
pub fn load_defaults() -> Result<PlConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert!(config.parsing.check_mandatory_keys);
        assert_eq!(
            config.parsing.mandatory_keys,
            vec!["title", "author", "version", "statement"]
        );
        assert_eq!(config.parsing.max_inheritance_depth, 32);
        assert_eq!(config.output.format, "json");
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("output.format", "yaml")
            .expect("override to apply")
            .set_override("parsing.check_mandatory_keys", false)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, "yaml");

        let options = ParseOptions::from(&config.parsing);
        assert!(!options.check_mandatory_keys);
        assert!(options.components.has("Form"));
    }

    #[test]
    fn layers_user_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[parsing]\nmax_inheritance_depth = 4").unwrap();

        let config = Loader::new().with_file(file.path()).build().unwrap();
        assert_eq!(config.parsing.max_inheritance_depth, 4);
        assert!(config.parsing.check_mandatory_keys);
    }

    #[test]
    fn optional_file_may_be_absent() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/pl.toml")
            .build()
            .unwrap();
        assert_eq!(config.output.format, "json");
    }
}
