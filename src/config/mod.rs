//! Preview configuration management for `gltf-preview.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── engine     # [engine]
//! │   ├── environment# [environment]
//! │   ├── scan       # [scan]
//! │   └── surface    # [surface]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError
//! │   └── handle     # Reloadable handle
//! └── mod.rs         # PreviewConfig (this file)
//! ```
//!
//! A missing config file is not an error: every section has defaults.

pub mod section;
pub mod types;

pub use section::{
    Engine, EngineConfig, EnvironmentConfig, ReflectionEngine, ScanConfig, SurfaceConfig,
};
pub use types::{ConfigError, ConfigHandle};

use crate::log;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config file name looked up in the working directory.
pub const CONFIG_FILE: &str = "gltf-preview.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing gltf-preview.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Directory containing the config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Preferred engine per content type
    #[serde(default)]
    pub engine: EngineConfig,

    /// Default environment maps
    #[serde(default)]
    pub environment: EnvironmentConfig,

    /// Reference scanning
    #[serde(default)]
    pub scan: ScanConfig,

    /// Extension install directory
    #[serde(default)]
    pub surface: SurfaceConfig,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            root: PathBuf::new(),
            engine: EngineConfig::default(),
            environment: EnvironmentConfig::default(),
            scan: ScanConfig::default(),
            surface: SurfaceConfig::default(),
        }
    }
}

impl PreviewConfig {
    /// Load configuration from `path`, falling back to defaults if the file
    /// does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = crate::utils::path::normalize_path(path);

        if !config_path.exists() {
            crate::debug!("config"; "{} not found, using defaults", config_path.display());
            let mut config = Self::default();
            config.finalize(config_path);
            return Ok(config);
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|err| ConfigError::Io(config_path.clone(), err))?;
        Self::from_content(&content, &config_path)
    }

    /// Parse, validate and finalize config file content.
    pub fn from_content(content: &str, config_path: &Path) -> Result<Self> {
        let (mut config, ignored) = Self::parse_with_ignored(content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, config_path);
        }

        config.validate()?;
        config.finalize(config_path.to_path_buf());
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {} (ignored): {}", display_path, fields.join(", "));
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.scan.reference_keys.is_empty() {
            return Err(ConfigError::Validation(
                "[scan] reference_keys must name at least one key".to_string(),
            ));
        }
        if let Some(key) = self.scan.reference_keys.iter().find(|k| k.is_empty()) {
            return Err(ConfigError::Validation(format!(
                "[scan] reference_keys contains an empty key: {key:?}"
            )));
        }
        Ok(())
    }

    /// Resolve paths relative to the config file's directory.
    fn finalize(&mut self, config_path: PathBuf) {
        self.root = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        self.config_path = config_path;
        self.surface.root = crate::utils::path::expand_path(&self.surface.root, &self.root);
    }

    /// Extension install directory (absolute).
    pub fn surface_root(&self) -> &Path {
        &self.surface.root
    }
}

#[cfg(test)]
pub fn test_parse_config(content: &str) -> PreviewConfig {
    let (parsed, ignored) = PreviewConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
