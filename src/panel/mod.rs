//! Preview panels.
//!
//! A [`Panel`] is the live preview surface bound to one open document:
//!
//! ```text
//! Panel
//! ├── text + ParsedDocument   (tree | failure, position map, content type)
//! ├── ready                   (surface finished bootstrapping)
//! ├── WatchSet                (document + referenced files)
//! └── DefaultResources        (environment map URIs, fixed at creation)
//! ```
//!
//! Panels live in the [`PanelRegistry`], keyed by [`DocumentId`].

mod active;
mod notification;
mod registry;

pub use active::{ActivePanel, DEBUG_ACTIVE_CONTEXT};
pub use notification::{Notifier, PanelNotification};
pub use registry::{Opened, PanelRegistry};

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::{PreviewConfig, ReflectionEngine};
use crate::document::{LineIndex, ParsedDocument, TextRange};
use crate::event::EventSender;
use crate::host::Host;
use crate::payload::{PayloadInput, RenderPayload, Sandbox};
use crate::reference::ReferenceScanner;
use crate::utils::path::normalize_path;
use crate::watch::{WatchBackend, WatchSet};

// =============================================================================
// DocumentId
// =============================================================================

/// Absolute, normalized document path. At most one panel per identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(PathBuf);

impl DocumentId {
    pub fn new(path: &Path) -> Self {
        Self(normalize_path(path))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Directory relative references resolve against.
    pub fn directory(&self) -> &Path {
        self.0.parent().unwrap_or(Path::new("/"))
    }

    pub fn file_name(&self) -> String {
        self.0
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

// =============================================================================
// PanelContext
// =============================================================================

/// Collaborators a panel needs while refreshing.
pub struct PanelContext<'a> {
    pub host: &'a mut dyn Host,
    pub config: &'a PreviewConfig,
    pub backend: &'a dyn WatchBackend,
    pub events: &'a EventSender,
    pub notifier: &'a Notifier,
}

// =============================================================================
// Panel
// =============================================================================

/// Default environment map URIs, resolved once when the panel is created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefaultResources {
    pub babylon: Option<String>,
    pub three: Option<String>,
}

impl DefaultResources {
    fn resolve(document: &DocumentId, config: &PreviewConfig, host: &dyn Host) -> Self {
        let root = config.surface_root();
        let sandbox = Sandbox::new(host, root, document.directory());
        let uri = |engine| {
            let path = config.environment.resolve(engine, root)?;
            let uri = sandbox.uri(&path);
            if uri.is_none() {
                crate::log!("preview"; "environment map outside sandbox: {}", path.display());
            }
            uri
        };

        Self {
            babylon: uri(ReflectionEngine::Babylon),
            three: uri(ReflectionEngine::Three),
        }
    }
}

pub struct Panel {
    document: DocumentId,
    text: String,
    parsed: ParsedDocument,
    ready: bool,
    watches: WatchSet,
    defaults: DefaultResources,
}

impl Panel {
    fn new(document: DocumentId, ctx: &PanelContext<'_>) -> Self {
        let defaults = DefaultResources::resolve(&document, ctx.config, &*ctx.host);
        Self {
            document,
            text: String::new(),
            parsed: ParsedDocument::empty(),
            ready: false,
            watches: WatchSet::new(),
            defaults,
        }
    }

    pub fn document(&self) -> &DocumentId {
        &self.document
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn parsed(&self) -> &ParsedDocument {
        &self.parsed
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn watches(&self) -> &WatchSet {
        &self.watches
    }

    pub fn defaults(&self) -> &DefaultResources {
        &self.defaults
    }

    /// Editor range of the value at `pointer` in the current text.
    pub fn resolve_pointer(&self, pointer: &str) -> Option<TextRange> {
        let span = self.parsed.positions().get(pointer)?;
        Some(LineIndex::new(&self.text).range(span))
    }

    /// Set readiness and notify. Fires even when the value is unchanged.
    pub(crate) fn set_ready(&mut self, ready: bool, notifier: &Notifier) {
        self.ready = ready;
        notifier.send(PanelNotification::ReadyChanged {
            document: self.document.clone(),
            ready,
        });
    }

    /// Full refresh: re-parse, re-render, re-watch.
    pub(crate) fn refresh(&mut self, text: String, ctx: &mut PanelContext<'_>) {
        self.parsed = ParsedDocument::parse(&text);
        self.text = text;

        if let Some(failure) = self.parsed.failure() {
            crate::logger::status_error(
                &format!("{} is not valid JSON", self.document.file_name()),
                &failure.to_string(),
            );
        }

        let input = PayloadInput {
            document: &self.document,
            text: &self.text,
            content_type: self.parsed.content_type(),
            defaults: &self.defaults,
            config: ctx.config,
        };
        let html = {
            let sandbox = Sandbox::new(
                &*ctx.host,
                ctx.config.surface_root(),
                self.document.directory(),
            );
            RenderPayload::build(&input, &sandbox).to_html(&ctx.host.csp_source())
        };

        // The surface re-bootstraps on new content.
        if self.ready {
            self.set_ready(false, ctx.notifier);
        }
        ctx.host.set_html(&self.document, &html);

        let watched = self.rewatch(ctx);
        if self.parsed.failure().is_none() {
            crate::logger::status_success(&format!(
                "{} ({}, {} watched)",
                self.document.file_name(),
                self.parsed.content_type(),
                watched
            ));
        }
    }

    /// Rebuild the watch set from the current tree.
    fn rewatch(&mut self, ctx: &PanelContext<'_>) -> usize {
        let dependencies = self
            .parsed
            .tree()
            .map(|tree| {
                ReferenceScanner::new(&ctx.config.scan.reference_keys)
                    .scan(tree, self.document.directory())
            })
            .unwrap_or_default();

        self.watches
            .rebuild(&self.document, &dependencies, ctx.backend, ctx.events)
    }

    pub(crate) fn watches_mut(&mut self) -> &mut WatchSet {
        &mut self.watches
    }
}
