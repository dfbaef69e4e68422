//! Previewer - the preview coordinator
//!
//! # Responsibility
//!
//! Owns every panel and handles one [`Event`] at a time, to completion:
//!
//! ```text
//! Event queue ──> Previewer::handle ──> PanelRegistry ──> Panel (parse, render, watch)
//!                        │                                   │
//!                        └── router (surface messages)       └── Host (surface, editor)
//! ```
//!
//! Nothing that goes wrong while handling one event ends the loop: errors
//! are logged and the next event is taken.

use std::path::Path;

use thiserror::Error;
use tokio::sync::broadcast;

use crate::config::ConfigHandle;
use crate::event::{Event, EventReceiver, EventSender, WatchKind};
use crate::host::Host;
use crate::panel::{DocumentId, Notifier, PanelContext, PanelNotification, PanelRegistry};
use crate::protocol::{InboundMessage, OutboundMessage, ProtocolError};
use crate::router::{self, Routed};
use crate::watch::WatchBackend;

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("no preview panel for {0}")]
    UnknownPanel(DocumentId),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Config(#[from] anyhow::Error),
}

/// Whether the loop keeps going after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

pub struct Previewer<H: Host, B: WatchBackend> {
    registry: PanelRegistry,
    config: ConfigHandle,
    host: H,
    backend: B,
    events_tx: EventSender,
    events_rx: EventReceiver,
    notifier: Notifier,
}

impl<H: Host, B: WatchBackend> Previewer<H, B> {
    pub fn new(
        config: ConfigHandle,
        host: H,
        backend: B,
        events: (EventSender, EventReceiver),
    ) -> Self {
        let (events_tx, events_rx) = events;
        Self {
            registry: PanelRegistry::new(),
            config,
            host,
            backend,
            events_tx,
            events_rx,
            notifier: Notifier::new(),
        }
    }

    /// Sender for posting events onto this coordinator's queue.
    pub fn sender(&self) -> EventSender {
        self.events_tx.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PanelNotification> {
        self.notifier.subscribe()
    }

    pub fn registry(&self) -> &PanelRegistry {
        &self.registry
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Handle one event to completion.
    pub fn handle(&mut self, event: Event) -> Result<Flow, PreviewError> {
        match event {
            Event::Open { document } => self.open(&document),
            Event::Edit { document, text } => self.edit(&document, text),
            Event::WatchFired {
                document,
                generation,
                kind,
            } => self.watch_fired(&document, generation, kind),
            Event::PanelMessage { document, message } => {
                self.panel_message(&document, message).map(|_| ())
            }
            Event::FocusChanged => {
                self.with_panels(|registry, ctx| registry.recompute_active(ctx));
                Ok(())
            }
            Event::PanelClosed { document } => {
                self.with_panels(|registry, ctx| registry.dispose_panel(&document, ctx));
                Ok(())
            }
            Event::ReloadConfig => self.reload_config(),
            Event::Shutdown => {
                self.shutdown();
                return Ok(Flow::Stop);
            }
        }
        .map(|()| Flow::Continue)
    }

    /// Handle every event already queued. Returns the number handled.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            handled += 1;
            if self.dispatch(event) == Flow::Stop {
                break;
            }
        }
        handled
    }

    /// Run until a shutdown event arrives.
    pub async fn run(mut self) {
        crate::debug!("preview"; "event loop started");
        while let Some(event) = self.events_rx.recv().await {
            if self.dispatch(event) == Flow::Stop {
                break;
            }
        }
        crate::debug!("preview"; "event loop stopped");
    }

    fn dispatch(&mut self, event: Event) -> Flow {
        match self.handle(event) {
            Ok(flow) => flow,
            Err(e) => {
                report(&e);
                Flow::Continue
            }
        }
    }

    /// Close every panel and its watches.
    pub fn shutdown(&mut self) {
        let count = self.registry.len();
        self.with_panels(|registry, ctx| registry.dispose_all(ctx));
        crate::debug!("preview"; "shut down {} panel(s)", count);
    }

    /// Run `f` with the registry and a context borrowing the other fields.
    fn with_panels<R>(
        &mut self,
        f: impl FnOnce(&mut PanelRegistry, &mut PanelContext<'_>) -> R,
    ) -> R {
        let config = self.config.load();
        let mut ctx = PanelContext {
            host: &mut self.host,
            config: &config,
            backend: &self.backend,
            events: &self.events_tx,
            notifier: &self.notifier,
        };
        f(&mut self.registry, &mut ctx)
    }

    fn open(&mut self, path: &Path) -> Result<(), PreviewError> {
        let document = DocumentId::new(path);
        let text = self.host.document_text(document.path()).unwrap_or_else(|| {
            crate::log!("warning"; "cannot read {}, previewing empty content", document);
            String::new()
        });

        self.with_panels(|registry, ctx| registry.open_panel(document, text, ctx));
        Ok(())
    }

    fn edit(&mut self, path: &Path, text: String) -> Result<(), PreviewError> {
        let document = DocumentId::new(path);
        if !self.with_panels(|registry, ctx| registry.refresh_panel(&document, text, ctx)) {
            crate::debug!("preview"; "edit for {} ignored, no panel", document);
        }
        Ok(())
    }

    fn watch_fired(
        &mut self,
        document: &DocumentId,
        generation: u64,
        kind: WatchKind,
    ) -> Result<(), PreviewError> {
        let Some(panel) = self.registry.get_panel(document) else {
            crate::debug!("watch"; "{} change for closed panel {}", kind.label(), document);
            return Ok(());
        };
        if !panel.watches().is_current(generation) {
            crate::debug!("watch"; "stale {} change for {}", kind.label(), document);
            return Ok(());
        }

        match kind {
            WatchKind::Dependency => {
                crate::debug!("watch"; "dependency of {} changed", document);
                self.host.post_message(document, &OutboundMessage::Refresh);
            }
            WatchKind::Document => {
                let Some(text) = self.host.document_text(document.path()) else {
                    crate::logger::status_warning(&format!(
                        "{} is gone, keeping last content",
                        document
                    ));
                    return Ok(());
                };
                self.with_panels(|registry, ctx| registry.refresh_panel(document, text, ctx));
            }
        }
        Ok(())
    }

    fn panel_message(
        &mut self,
        document: &DocumentId,
        raw: serde_json::Value,
    ) -> Result<Routed, PreviewError> {
        let Some(panel) = self.registry.get_panel_mut(document) else {
            return Err(PreviewError::UnknownPanel(document.clone()));
        };
        let message = InboundMessage::decode(raw)?;
        crate::debug!("protocol"; "{} from {}", message.command(), document);

        Ok(router::route(panel, message, &mut self.host, &self.notifier))
    }

    fn reload_config(&mut self) -> Result<(), PreviewError> {
        if !self.config.reload()? {
            crate::debug!("config"; "unchanged");
            return Ok(());
        }

        crate::log!("config"; "reloaded, re-rendering {} panel(s)", self.registry.len());
        self.with_panels(|registry, ctx| registry.refresh_all(ctx));
        Ok(())
    }
}

fn report(error: &PreviewError) {
    match error {
        PreviewError::Protocol(e) => crate::log!("protocol"; "{}", e),
        PreviewError::UnknownPanel(_) => crate::log!("warning"; "{}", error),
        PreviewError::Config(e) => {
            crate::logger::status_error("config reload failed", &format!("{e:#}"))
        }
    }
}
