//! Test doubles: a recording [`Host`] and a [`WatchBackend`] whose watches
//! fire on demand.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use serde_json::Value;

use crate::document::TextRange;
use crate::host::Host;
use crate::panel::DocumentId;
use crate::protocol::OutboundMessage;
use crate::utils::path::normalize_path;
use crate::watch::{ChangeCallback, WatchBackend, WatchError, WatchHandle};

// =============================================================================
// FakeBackend
// =============================================================================

struct FakeEntry {
    path: PathBuf,
    open: Arc<AtomicBool>,
    on_change: ChangeCallback,
}

#[derive(Default)]
struct FakeState {
    entries: Vec<FakeEntry>,
    failing: Vec<PathBuf>,
}

/// In-memory watch backend. Clones share state.
#[derive(Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<FakeState>>,
}

struct FakeWatch {
    path: PathBuf,
    open: Arc<AtomicBool>,
}

impl WatchHandle for FakeWatch {
    fn close(&mut self) {
        self.open.store(false, Ordering::SeqCst);
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every future watch on `path` fail.
    pub fn fail_on(&self, path: &Path) {
        self.state.lock().failing.push(normalize_path(path));
    }

    /// Let watches on `path` succeed again.
    pub fn stop_failing(&self, path: &Path) {
        let path = normalize_path(path);
        self.state.lock().failing.retain(|p| *p != path);
    }

    /// Number of watches not yet closed.
    pub fn open_count(&self) -> usize {
        self.state
            .lock()
            .entries
            .iter()
            .filter(|e| e.open.load(Ordering::SeqCst))
            .count()
    }

    pub fn is_open(&self, path: &Path) -> bool {
        let path = normalize_path(path);
        self.state
            .lock()
            .entries
            .iter()
            .any(|e| e.path == path && e.open.load(Ordering::SeqCst))
    }

    /// Paths of open watches, in creation order.
    pub fn open_paths(&self) -> Vec<PathBuf> {
        self.state
            .lock()
            .entries
            .iter()
            .filter(|e| e.open.load(Ordering::SeqCst))
            .map(|e| e.path.clone())
            .collect()
    }

    /// Simulate a change to `path`. Returns how many callbacks ran.
    pub fn fire(&self, path: &Path) -> usize {
        let path = normalize_path(path);
        let state = self.state.lock();
        let mut fired = 0;
        for entry in state.entries.iter().filter(|e| e.path == path) {
            if entry.open.load(Ordering::SeqCst) {
                (entry.on_change)();
                fired += 1;
            }
        }
        fired
    }
}

impl WatchBackend for FakeBackend {
    fn watch(
        &self,
        path: &Path,
        on_change: ChangeCallback,
    ) -> Result<Box<dyn WatchHandle>, WatchError> {
        let path = normalize_path(path);
        let mut state = self.state.lock();
        if state.failing.contains(&path) {
            return Err(WatchError::Missing(path));
        }

        let open = Arc::new(AtomicBool::new(true));
        state.entries.push(FakeEntry {
            path: path.clone(),
            open: Arc::clone(&open),
            on_change,
        });
        Ok(Box::new(FakeWatch { path, open }))
    }
}

// =============================================================================
// RecordingHost
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Reveal { document: DocumentId, title: String },
    Html { document: DocumentId, html: String },
    Post { document: DocumentId, message: OutboundMessage },
    Select { document: DocumentId, range: TextRange },
    Context { name: String, value: Value },
    Error(String),
    Warning(String),
}

/// Host that records every call. Focus follows `reveal`, like an editor.
#[derive(Debug, Default)]
pub struct RecordingHost {
    calls: Vec<HostCall>,
    focused: Option<DocumentId>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn focus(&mut self, document: Option<DocumentId>) {
        self.focused = document;
    }

    pub fn last_html(&self, document: &DocumentId) -> Option<&str> {
        self.calls.iter().rev().find_map(|call| match call {
            HostCall::Html { document: d, html } if d == document => Some(html.as_str()),
            _ => None,
        })
    }

    pub fn posts(&self, document: &DocumentId) -> Vec<OutboundMessage> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::Post { document: d, message } if d == document => Some(*message),
                _ => None,
            })
            .collect()
    }

    pub fn selections(&self) -> Vec<TextRange> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::Select { range, .. } => Some(*range),
                _ => None,
            })
            .collect()
    }
}

impl Host for RecordingHost {
    fn reveal(&mut self, document: &DocumentId, title: &str) {
        self.focused = Some(document.clone());
        self.calls.push(HostCall::Reveal {
            document: document.clone(),
            title: title.to_string(),
        });
    }

    fn set_html(&mut self, document: &DocumentId, html: &str) {
        self.calls.push(HostCall::Html {
            document: document.clone(),
            html: html.to_string(),
        });
    }

    fn post_message(&mut self, document: &DocumentId, message: &OutboundMessage) {
        self.calls.push(HostCall::Post {
            document: document.clone(),
            message: *message,
        });
    }

    fn is_focused(&self, document: &DocumentId) -> bool {
        self.focused.as_ref() == Some(document)
    }

    fn webview_uri(&self, path: &Path) -> String {
        format!("sandbox:{}", path.display())
    }

    fn csp_source(&self) -> String {
        "sandbox:".to_string()
    }

    fn select_range(&mut self, document: &DocumentId, range: TextRange) {
        self.calls.push(HostCall::Select {
            document: document.clone(),
            range,
        });
    }

    fn set_context(&mut self, name: &str, value: &Value) {
        self.calls.push(HostCall::Context {
            name: name.to_string(),
            value: value.clone(),
        });
    }

    fn show_error(&mut self, message: &str) {
        self.calls.push(HostCall::Error(message.to_string()));
    }

    fn show_warning(&mut self, message: &str) {
        self.calls.push(HostCall::Warning(message.to_string()));
    }
}
