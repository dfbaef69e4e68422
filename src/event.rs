//! Event Queue
//!
//! Every input to the preview core arrives as an [`Event`] on one unbounded
//! queue and is handled to completion before the next one is taken:
//!
//! ```text
//! editor (open/edit/focus/close) ─┐
//! surface messages ───────────────┼──> Event queue ──> Previewer::handle
//! file watches (notify thread) ───┘
//! ```

use std::path::PathBuf;

use tokio::sync::mpsc;

use crate::panel::DocumentId;

pub type EventSender = mpsc::UnboundedSender<Event>;
pub type EventReceiver = mpsc::UnboundedReceiver<Event>;

/// Create the event queue.
pub fn channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

/// Which kind of watch fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WatchKind {
    /// The previewed document itself: full refresh
    Document,
    /// An external resource it references: surface reload only
    Dependency,
}

impl WatchKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Dependency => "dependency",
        }
    }
}

/// Inputs to the preview core.
#[derive(Debug)]
pub enum Event {
    /// Preview requested for a document (text read from the host)
    Open { document: PathBuf },
    /// Editor buffer changed (full text, no diff)
    Edit { document: PathBuf, text: String },
    /// A watch fired; `generation` is the watch set generation it was created under
    WatchFired {
        document: DocumentId,
        generation: u64,
        kind: WatchKind,
    },
    /// Raw message posted by a panel's rendering surface
    PanelMessage {
        document: DocumentId,
        message: serde_json::Value,
    },
    /// Host focus moved (the host knows which panel, if any, is focused)
    FocusChanged,
    /// User closed a panel
    PanelClosed { document: DocumentId },
    /// Re-read the configuration file
    ReloadConfig,
    /// Stop the event loop
    Shutdown,
}
