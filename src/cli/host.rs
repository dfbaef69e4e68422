//! Host output: JSON lines on stdout.
//!
//! ```text
//! {"type":"reveal","document":"/models/scene.gltf","title":"glTF Preview [scene.gltf]"}
//! {"type":"html","document":"/models/scene.gltf","path":"/tmp/gltf-preview/scene-1a2b3c4d.preview.html"}
//! {"type":"post","document":"/models/scene.gltf","message":{"command":"refresh"}}
//! {"type":"select","document":"/models/scene.gltf","range":{"start":{…},"end":{…}}}
//! {"type":"context","name":"gltfDebugActive","value":false}
//! {"type":"error","message":"…"}
//! {"type":"warning","message":"…"}
//! ```
//!
//! Rendered pages are written to files; the host loads them by path.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use url::Url;

use super::input::SharedFocus;
use crate::document::TextRange;
use crate::event::{Event, EventSender};
use crate::host::Host;
use crate::panel::DocumentId;
use crate::protocol::OutboundMessage;

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostOutput<'a> {
    Reveal { document: &'a Path, title: &'a str },
    Html { document: &'a Path, path: &'a Path },
    Post { document: &'a Path, message: &'a OutboundMessage },
    Select { document: &'a Path, range: TextRange },
    Context { name: &'a str, value: &'a Value },
    Error { message: &'a str },
    Warning { message: &'a str },
}

pub struct StdioHost {
    out_dir: PathBuf,
    focus: SharedFocus,
    events: EventSender,
}

impl StdioHost {
    pub fn new(out_dir: PathBuf, focus: SharedFocus, events: EventSender) -> Self {
        Self {
            out_dir,
            focus,
            events,
        }
    }

    fn emit(&self, output: &HostOutput<'_>) {
        let line = match serde_json::to_string(output) {
            Ok(line) => line,
            Err(e) => {
                crate::log!("error"; "cannot encode host output: {}", e);
                return;
            }
        };

        let mut stdout = std::io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{line}").and_then(|()| stdout.flush()) {
            crate::log!("error"; "writing stdout: {}", e);
        }
    }

    /// Page file for a document. The path hash keeps same-named documents apart.
    pub fn page_path(&self, document: &DocumentId) -> PathBuf {
        let stem = document
            .path()
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        let hash = crate::utils::hash::compute(document.path().as_os_str().as_encoded_bytes());
        self.out_dir
            .join(format!("{stem}-{:08x}.preview.html", hash as u32))
    }
}

impl Host for StdioHost {
    fn reveal(&mut self, document: &DocumentId, title: &str) {
        *self.focus.lock() = Some(document.clone());
        self.emit(&HostOutput::Reveal {
            document: document.path(),
            title,
        });
        // Revealing moves focus; the coordinator picks it up as its next event.
        let _ = self.events.send(Event::FocusChanged);
    }

    fn set_html(&mut self, document: &DocumentId, html: &str) {
        let path = self.page_path(document);
        if let Err(e) = fs::write(&path, html) {
            crate::log!("error"; "cannot write {}: {}", path.display(), e);
            return;
        }
        self.emit(&HostOutput::Html {
            document: document.path(),
            path: &path,
        });
    }

    fn post_message(&mut self, document: &DocumentId, message: &OutboundMessage) {
        self.emit(&HostOutput::Post {
            document: document.path(),
            message,
        });
    }

    fn is_focused(&self, document: &DocumentId) -> bool {
        self.focus.lock().as_ref() == Some(document)
    }

    fn webview_uri(&self, path: &Path) -> String {
        Url::from_file_path(path).map_or_else(|()| path.display().to_string(), String::from)
    }

    fn csp_source(&self) -> String {
        "file:".to_string()
    }

    fn select_range(&mut self, document: &DocumentId, range: TextRange) {
        self.emit(&HostOutput::Select {
            document: document.path(),
            range,
        });
    }

    fn set_context(&mut self, name: &str, value: &Value) {
        self.emit(&HostOutput::Context { name, value });
    }

    fn show_error(&mut self, message: &str) {
        self.emit(&HostOutput::Error { message });
    }

    fn show_warning(&mut self, message: &str) {
        self.emit(&HostOutput::Warning { message });
    }
}
