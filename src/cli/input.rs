//! Host input: JSON lines on stdin.
//!
//! ```text
//! {"type":"open","document":"/models/scene.gltf"}
//! {"type":"edit","document":"/models/scene.gltf","text":"{…}"}
//! {"type":"focus","document":"/models/scene.gltf"}        (or null)
//! {"type":"close","document":"/models/scene.gltf"}
//! {"type":"message","document":"/models/scene.gltf","message":{"command":"onReady"}}
//! {"type":"reloadConfig"}
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::event::{Event, EventSender};
use crate::panel::DocumentId;

/// Panel focus as last reported by the host.
pub type SharedFocus = Arc<Mutex<Option<DocumentId>>>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostInput {
    Open { document: PathBuf },
    Edit { document: PathBuf, text: String },
    Focus { document: Option<PathBuf> },
    Close { document: PathBuf },
    Message { document: PathBuf, message: Value },
    ReloadConfig,
}

impl HostInput {
    /// Convert to a queue event, updating shared focus on the way.
    pub fn into_event(self, focus: &Mutex<Option<DocumentId>>) -> Event {
        match self {
            Self::Open { document } => Event::Open { document },
            Self::Edit { document, text } => Event::Edit { document, text },
            Self::Focus { document } => {
                *focus.lock() = document.as_deref().map(DocumentId::new);
                Event::FocusChanged
            }
            Self::Close { document } => {
                let document = DocumentId::new(&document);
                let mut focused = focus.lock();
                if focused.as_ref() == Some(&document) {
                    *focused = None;
                }
                Event::PanelClosed { document }
            }
            Self::Message { document, message } => Event::PanelMessage {
                document: DocumentId::new(&document),
                message,
            },
            Self::ReloadConfig => Event::ReloadConfig,
        }
    }
}

/// Forward stdin lines to the event queue until EOF, then request shutdown.
pub async fn read_stdin(events: EventSender, focus: SharedFocus) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match serde_json::from_str::<HostInput>(line) {
                    Ok(input) => {
                        if events.send(input.into_event(&focus)).is_err() {
                            return;
                        }
                    }
                    Err(e) => crate::log!("protocol"; "invalid host input: {}", e),
                }
            }
            Ok(None) => {
                crate::debug!("protocol"; "stdin closed");
                break;
            }
            Err(e) => {
                crate::log!("error"; "reading stdin: {}", e);
                break;
            }
        }
    }

    let _ = events.send(Event::Shutdown);
}
