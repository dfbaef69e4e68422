//! Reloadable config with atomic swap.
//!
//! Uses `arc-swap` for lock-free reads and atomic config replacement, so a
//! `reloadConfig` request swaps the configuration between two events while
//! snapshots already handed out stay valid.

use std::fs;
use std::sync::Arc;

use anyhow::Result;
use arc_swap::ArcSwap;

use crate::config::PreviewConfig;

/// Owned configuration handle held by the preview coordinator.
pub struct ConfigHandle {
    current: ArcSwap<PreviewConfig>,
    /// Hash of the config file content the current value was loaded from.
    content_hash: u64,
}

impl ConfigHandle {
    pub fn new(config: PreviewConfig) -> Self {
        let content_hash = fs::read_to_string(&config.config_path)
            .map(|content| crate::utils::hash::compute(content.as_bytes()))
            .unwrap_or(0);

        Self {
            current: ArcSwap::from_pointee(config),
            content_hash,
        }
    }

    /// Snapshot of the current configuration.
    #[inline]
    pub fn load(&self) -> Arc<PreviewConfig> {
        self.current.load_full()
    }

    /// Reload config from disk if content changed.
    ///
    /// Returns `Ok(true)` if config was updated, `Ok(false)` if unchanged.
    pub fn reload(&mut self) -> Result<bool> {
        let path = self.load().config_path.clone();
        let content = fs::read_to_string(&path)?;
        let new_hash = crate::utils::hash::compute(content.as_bytes());

        if new_hash == self.content_hash {
            return Ok(false);
        }

        let config = PreviewConfig::from_content(&content, &path)?;
        self.current.store(Arc::new(config));
        self.content_hash = new_hash;

        Ok(true)
    }
}
