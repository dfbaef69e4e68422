//! `[surface]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [surface]
//! root = "."    # directory holding engines/, pages/ and environments/
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Rendering surface settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Extension install directory, relative to the config file.
    pub root: PathBuf,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
        }
    }
}
