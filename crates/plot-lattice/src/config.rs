//! Figure configuration.
//!
//! [`FigureConfig`] holds the options that shape how a figure is
//! materialized. It can be built in code or loaded from a JSON or TOML file:
//!
//! ```toml
//! # figure.toml
//! strict = false
//! tight_layout = true
//! ```
//!
//! ```ignore
//! use plot_lattice::{Figure, FigureConfig};
//!
//! let config = FigureConfig::load("figure.toml")?;
//! let mut fig = Figure::with_config(config);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FigureError, FigureResult};
use crate::logging::targets;

/// The format of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON format.
    Json,
    /// TOML format.
    Toml,
}

impl ConfigFormat {
    /// Guess the format from a file extension (`.json`, `.toml`).
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(ConfigFormat::Json),
            "toml" => Some(ConfigFormat::Toml),
            _ => None,
        }
    }
}

/// Options controlling materialization of a figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    /// Whether validator findings are errors (`true`) or warnings (`false`).
    pub strict: bool,
    /// Whether `show`/`save` finalize the layout before presenting.
    pub tight_layout: bool,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            strict: true,
            tight_layout: true,
        }
    }
}

impl FigureConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> FigureResult<Self> {
        toml::from_str(text).map_err(|e| FigureError::Config(e.to_string()))
    }

    /// Parse a configuration from JSON text.
    pub fn from_json_str(text: &str) -> FigureResult<Self> {
        serde_json::from_str(text).map_err(|e| FigureError::Config(e.to_string()))
    }

    /// Load a configuration file, choosing the format by extension.
    pub fn load(path: impl AsRef<Path>) -> FigureResult<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path).ok_or_else(|| {
            FigureError::Config(format!(
                "{}: unsupported configuration format (expected .json or .toml)",
                path.display()
            ))
        })?;
        Self::load_as(path, format)
    }

    /// Load a configuration file in an explicit format.
    pub fn load_as(path: impl AsRef<Path>, format: ConfigFormat) -> FigureResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| FigureError::Config(format!("{}: {e}", path.display())))?;
        let config = match format {
            ConfigFormat::Json => Self::from_json_str(&text)?,
            ConfigFormat::Toml => Self::from_toml_str(&text)?,
        };
        tracing::debug!(
            target: targets::CONFIG,
            path = %path.display(),
            strict = config.strict,
            tight_layout = config.tight_layout,
            "loaded figure configuration"
        );
        Ok(config)
    }

    /// Set whether validator findings are errors.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set whether layout is finalized before presenting.
    pub fn with_tight_layout(mut self, tight_layout: bool) -> Self {
        self.tight_layout = tight_layout;
        self
    }
}
