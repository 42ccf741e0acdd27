//! Output formats for parsed documents
//!
//! - json: pretty-printed JSON of the whole document
//! - yaml: the same structure as YAML

use crate::pl::document::Document;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// No output format has this name
    UnknownFormat(String),
    Serialization(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::UnknownFormat(name) => write!(
                f,
                "Unknown format '{name}'. Available: {}",
                OutputFormat::names().join(", ")
            ),
            FormatError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}

/// A serialization of [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 2] = [OutputFormat::Json, OutputFormat::Yaml];

    pub fn from_name(name: &str) -> Result<Self, FormatError> {
        Self::ALL
            .into_iter()
            .find(|format| format.name() == name)
            .ok_or_else(|| FormatError::UnknownFormat(name.to_string()))
    }

    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            OutputFormat::Json => "Document as pretty-printed JSON",
            OutputFormat::Yaml => "Document as YAML",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|format| format.name()).collect()
    }

    pub fn serialize(self, doc: &Document) -> Result<String, FormatError> {
        match self {
            OutputFormat::Json => serde_json::to_string_pretty(doc)
                .map_err(|err| FormatError::Serialization(err.to_string())),
            OutputFormat::Yaml => serde_yaml::to_string(doc)
                .map_err(|err| FormatError::Serialization(err.to_string())),
        }
    }
}
