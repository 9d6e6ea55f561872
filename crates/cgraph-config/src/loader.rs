//! Loading consumer configuration from JSON, YAML, or TOML.

use crate::schema::GraphInput;
use cgraph_common::{GraphError, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Text formats accepted by [`ConfigLoader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON text.
    Json,
    /// YAML text.
    Yaml,
    /// TOML text.
    Toml,
}

impl ConfigFormat {
    /// Infers the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// Loads graph input (or any other configuration document) from text or files.
pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    /// Creates a new configuration loader for a file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads graph input from the file, picking the format by extension.
    pub fn load(&self) -> Result<GraphInput> {
        self.load_as()
    }

    /// Loads any deserializable document from the file.
    pub fn load_as<T: DeserializeOwned>(&self) -> Result<T> {
        let format = ConfigFormat::from_path(&self.path).ok_or_else(|| {
            GraphError::parse(format!(
                "unsupported configuration format: {}",
                self.path.display()
            ))
        })?;
        let text = std::fs::read_to_string(&self.path).map_err(GraphError::parse)?;
        tracing::debug!(path = %self.path.display(), ?format, "loading configuration");
        Self::parse(&text, format)
    }

    /// Parses text in the given format.
    pub fn parse<T: DeserializeOwned>(text: &str, format: ConfigFormat) -> Result<T> {
        match format {
            ConfigFormat::Json => serde_json::from_str(text).map_err(GraphError::parse),
            ConfigFormat::Yaml => serde_yaml::from_str(text).map_err(GraphError::parse),
            ConfigFormat::Toml => toml::from_str(text).map_err(GraphError::parse),
        }
    }

    /// Parses graph input from JSON text.
    pub fn from_json_str(text: &str) -> Result<GraphInput> {
        Self::parse(text, ConfigFormat::Json)
    }

    /// Parses graph input from YAML text.
    pub fn from_yaml_str(text: &str) -> Result<GraphInput> {
        Self::parse(text, ConfigFormat::Yaml)
    }

    /// Parses graph input from TOML text.
    pub fn from_toml_str(text: &str) -> Result<GraphInput> {
        Self::parse(text, ConfigFormat::Toml)
    }
}
