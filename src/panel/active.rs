//! Active Panel Tracking
//!
//! At most one panel is active: the one whose surface has view focus.

use serde_json::Value;

use super::{DocumentId, Notifier, PanelNotification};
use crate::host::Host;
use crate::protocol::OutboundMessage;

/// Host context flag cleared when no panel is active.
pub const DEBUG_ACTIVE_CONTEXT: &str = "gltfDebugActive";

#[derive(Debug, Default)]
pub struct ActivePanel {
    current: Option<DocumentId>,
}

impl ActivePanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<&DocumentId> {
        self.current.as_ref()
    }

    /// Switch the active panel. Returns `false` (and does nothing) if unchanged.
    pub fn set(
        &mut self,
        next: Option<DocumentId>,
        host: &mut dyn Host,
        notifier: &Notifier,
    ) -> bool {
        if self.current == next {
            return false;
        }

        let label = next
            .as_ref()
            .map_or_else(|| "none".to_string(), ToString::to_string);
        crate::debug!("preview"; "active panel: {}", label);
        self.current = next.clone();
        notifier.send(PanelNotification::ActiveChanged {
            document: next.clone(),
        });

        match &next {
            Some(document) => host.post_message(document, &OutboundMessage::UpdateDebugMode),
            None => host.set_context(DEBUG_ACTIVE_CONTEXT, &Value::Bool(false)),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{HostCall, RecordingHost};
    use std::path::Path;

    #[test]
    fn test_set_active_notifies_once() {
        let mut host = RecordingHost::new();
        let notifier = Notifier::new();
        let mut rx = notifier.subscribe();
        let doc = DocumentId::new(Path::new("/models/scene.gltf"));

        let mut active = ActivePanel::new();
        assert!(active.set(Some(doc.clone()), &mut host, &notifier));
        assert!(!active.set(Some(doc.clone()), &mut host, &notifier));

        assert_eq!(active.get(), Some(&doc));
        assert_eq!(
            rx.try_recv().unwrap(),
            PanelNotification::ActiveChanged {
                document: Some(doc.clone())
            }
        );
        assert!(rx.try_recv().is_err());
        assert_eq!(
            host.calls(),
            &[HostCall::Post {
                document: doc,
                message: OutboundMessage::UpdateDebugMode
            }]
        );
    }

    #[test]
    fn test_clearing_active_resets_debug_context() {
        let mut host = RecordingHost::new();
        let notifier = Notifier::new();
        let doc = DocumentId::new(Path::new("/models/scene.gltf"));

        let mut active = ActivePanel::new();
        active.set(Some(doc), &mut host, &notifier);
        host.clear_calls();

        assert!(active.set(None, &mut host, &notifier));
        assert_eq!(active.get(), None);
        assert_eq!(
            host.calls(),
            &[HostCall::Context {
                name: DEBUG_ACTIVE_CONTEXT.to_string(),
                value: Value::Bool(false)
            }]
        );

        // Already none
        assert!(!active.set(None, &mut host, &notifier));
    }
}
