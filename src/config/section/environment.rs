//! `[environment]` section configuration.
//!
//! Default ambient-reflection (environment map) resources, one per engine
//! that supports image based lighting.
//!
//! # Example
//!
//! ```toml
//! [environment]
//! babylon = "~/hdr/studio.env"
//! three = "environments/three/footprint_court.hdr"
//! ```
//!
//! Relative paths resolve against the extension root. A path that does not
//! exist resolves to "no default" instead of an error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::utils::path::expand_path;

/// Engines that take a default environment map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReflectionEngine {
    Babylon,
    Three,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub babylon: Option<PathBuf>,
    pub three: Option<PathBuf>,
}

impl EnvironmentConfig {
    /// Resolve the configured resource for `engine` to an existing file.
    pub fn resolve(&self, engine: ReflectionEngine, root: &Path) -> Option<PathBuf> {
        let configured = match engine {
            ReflectionEngine::Babylon => self.babylon.as_deref(),
            ReflectionEngine::Three => self.three.as_deref(),
        }?;

        if configured.as_os_str().is_empty() {
            return None;
        }

        let path = expand_path(configured, root);
        if path.is_file() {
            Some(path)
        } else {
            crate::debug!("config"; "environment map not found: {}", path.display());
            None
        }
    }
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            babylon: Some(PathBuf::from("environments/babylon/environment.env")),
            three: Some(PathBuf::from("environments/three/environment.hdr")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_resolve_existing_relative_to_root() {
        let temp = tempfile::TempDir::new().unwrap();
        let root = temp.path().canonicalize().unwrap();
        std::fs::create_dir_all(root.join("environments/babylon")).unwrap();
        std::fs::write(root.join("environments/babylon/environment.env"), b"env").unwrap();

        let env = EnvironmentConfig::default();
        assert_eq!(
            env.resolve(ReflectionEngine::Babylon, &root),
            Some(root.join("environments/babylon/environment.env"))
        );
        assert_eq!(env.resolve(ReflectionEngine::Three, &root), None);
    }

    #[test]
    fn test_resolve_empty_or_unset() {
        let config = test_parse_config("[environment]\nbabylon = \"\"");
        let root = std::env::temp_dir();
        assert_eq!(config.environment.resolve(ReflectionEngine::Babylon, &root), None);

        let env = EnvironmentConfig {
            babylon: None,
            three: None,
        };
        assert_eq!(env.resolve(ReflectionEngine::Three, &root), None);
    }
}
