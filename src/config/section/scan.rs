//! `[scan]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [scan]
//! reference_keys = ["uri"]
//! ```

use serde::{Deserialize, Serialize};

/// Keys whose string values locate external resources.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub reference_keys: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            reference_keys: vec!["uri".to_string()],
        }
    }
}
