//! Message Router
//!
//! Dispatches decoded surface messages for one panel:
//!
//! | Command              | Effect                                          |
//! |----------------------|-------------------------------------------------|
//! | `select`             | pointer → current position map → editor range   |
//! | `setContext`         | forwarded to the host verbatim                  |
//! | `showErrorMessage`   | forwarded to the host verbatim                  |
//! | `showWarningMessage` | forwarded to the host verbatim                  |
//! | `onReady`            | readiness = true, notification every time       |
//!
//! Decoding (and rejecting unknown commands) happens in [`crate::protocol`].

use crate::document::TextRange;
use crate::host::Host;
use crate::panel::{Notifier, Panel};
use crate::protocol::InboundMessage;

/// What routing a message did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Routed {
    /// Editor asked to select this range
    Selected(TextRange),
    /// Pointer not in the current position map; nothing navigated
    Unresolved,
    /// Passed through to the host
    Forwarded,
    Ready,
}

pub fn route(
    panel: &mut Panel,
    message: InboundMessage,
    host: &mut dyn Host,
    notifier: &Notifier,
) -> Routed {
    match message {
        InboundMessage::Select { json_pointer } => match panel.resolve_pointer(&json_pointer) {
            Some(range) => {
                host.select_range(panel.document(), range);
                Routed::Selected(range)
            }
            None => {
                crate::debug!(
                    "preview";
                    "pointer {} not found in {} ({} known)",
                    json_pointer,
                    panel.document(),
                    panel.parsed().positions().len()
                );
                Routed::Unresolved
            }
        },
        InboundMessage::SetContext { name, value } => {
            host.set_context(&name, &value);
            Routed::Forwarded
        }
        InboundMessage::ShowErrorMessage { message } => {
            host.show_error(&message);
            Routed::Forwarded
        }
        InboundMessage::ShowWarningMessage { message } => {
            host.show_warning(&message);
            Routed::Forwarded
        }
        InboundMessage::OnReady => {
            panel.set_ready(true, notifier);
            Routed::Ready
        }
    }
}
