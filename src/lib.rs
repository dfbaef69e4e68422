//! gltf-preview - live glTF preview panels.
//!
//! Keeps a rendering surface in sync with a glTF document being edited:
//! re-parses and re-renders on every edit, watches referenced files, and
//! routes messages between the surface and the editor.
//!
//! # Module Structure
//!
//! ```text
//! document/   text → tree | failure, position map, content type
//! reference   tree → external file dependencies
//! watch/      per-panel file watches (notify backend)
//! payload/    render payload and preview page
//! protocol    surface message types
//! router      surface message dispatch
//! panel/      panels, registry, active panel
//! preview/    event loop coordinator
//! cli/        stdio host bridge
//! ```

pub mod cli;
pub mod config;
pub mod document;
pub mod event;
pub mod host;
pub mod logger;
pub mod panel;
pub mod payload;
pub mod preview;
pub mod protocol;
pub mod reference;
pub mod router;
pub mod utils;
pub mod watch;

#[cfg(test)]
pub(crate) mod testing;

pub use host::Host;
pub use panel::{DocumentId, PanelRegistry};
pub use preview::{PreviewError, Previewer};
