//! CLI entry: wires the stdio host, the notify backend and the previewer.
//!
//! ```text
//! stdin ──> read_stdin ──┐
//! ctrlc ─────────────────┼──> Event queue ──> Previewer ──> StdioHost ──> stdout
//! config watch ──────────┘
//! ```

pub mod args;
pub mod host;
pub mod input;

pub use args::Cli;
pub use host::{HostOutput, StdioHost};
pub use input::{HostInput, SharedFocus};

use std::fs;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use parking_lot::Mutex;

use crate::config::{ConfigHandle, PreviewConfig};
use crate::event::{self, Event};
use crate::preview::Previewer;
use crate::watch::{NotifyBackend, WatchBackend};

/// Run the preview host until stdin closes or Ctrl+C.
pub fn run(cli: &Cli) -> Result<()> {
    let config = PreviewConfig::load(&cli.config)?;
    let out_dir = cli
        .out_dir
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("gltf-preview"));
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("cannot create output directory {}", out_dir.display()))?;

    let (tx, rx) = event::channel();
    let focus: SharedFocus = Arc::new(Mutex::new(None));

    // Config edits re-render open panels.
    let config_tx = tx.clone();
    let _config_watch = match NotifyBackend.watch(
        &config.config_path,
        Box::new(move || {
            let _ = config_tx.send(Event::ReloadConfig);
        }),
    ) {
        Ok(handle) => Some(handle),
        Err(e) => {
            crate::debug!("config"; "not watching config: {}", e);
            None
        }
    };

    let shutdown_tx = tx.clone();
    ctrlc::set_handler(move || {
        let _ = shutdown_tx.send(Event::Shutdown);
    })
    .context("failed to set Ctrl+C handler")?;

    for file in &cli.files {
        tx.send(Event::Open {
            document: file.clone(),
        })
        .map_err(|_| anyhow!("event queue closed"))?;
    }

    let host = StdioHost::new(out_dir, Arc::clone(&focus), tx.clone());
    let previewer = Previewer::new(
        ConfigHandle::new(config),
        host,
        NotifyBackend,
        (tx.clone(), rx),
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;

    runtime.block_on(async move {
        tokio::spawn(input::read_stdin(tx, focus));
        previewer.run().await;
    });
    // The stdin reader may still be parked in a blocking read.
    runtime.shutdown_background();

    Ok(())
}
