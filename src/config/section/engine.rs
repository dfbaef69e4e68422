//! `[engine]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [engine]
//! v1 = "Cesium"        # engine for glTF 1.x documents
//! v2 = "Babylon.js"    # engine for glTF 2.x documents
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::document::ContentType;

/// A rendering engine bundled with the preview surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Engine {
    #[serde(rename = "Babylon.js", alias = "babylon")]
    Babylon,
    #[serde(rename = "Cesium", alias = "cesium")]
    Cesium,
    #[serde(rename = "Three.js", alias = "three")]
    Three,
}

impl Engine {
    /// Name the surface scripts switch on.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Babylon => "Babylon.js",
            Self::Cesium => "Cesium",
            Self::Three => "Three.js",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Preferred engine per content type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub v1: Engine,
    pub v2: Engine,
}

impl EngineConfig {
    pub fn for_content(&self, content_type: ContentType) -> Engine {
        match content_type {
            ContentType::V1 => self.v1,
            ContentType::V2 => self.v2,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            v1: Engine::Cesium,
            v2: Engine::Babylon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_engine_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.engine.v1, Engine::Cesium);
        assert_eq!(config.engine.v2, Engine::Babylon);
    }

    #[test]
    fn test_engine_names_and_aliases() {
        let config = test_parse_config("[engine]\nv1 = \"three\"\nv2 = \"Three.js\"");
        assert_eq!(config.engine.v1, Engine::Three);
        assert_eq!(config.engine.v2, Engine::Three);
    }

    #[test]
    fn test_engine_for_content() {
        let engines = EngineConfig::default();
        assert_eq!(engines.for_content(ContentType::V1), Engine::Cesium);
        assert_eq!(engines.for_content(ContentType::V2), Engine::Babylon);
        assert_eq!(Engine::Babylon.to_string(), "Babylon.js");
    }
}
