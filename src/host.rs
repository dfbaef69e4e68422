//! Host interface.
//!
//! Everything the preview core asks of its environment: the editor, the
//! window that shows rendering surfaces, and the surfaces' message channel.
//! The binary implements it over stdio; tests record the calls.

use std::path::Path;

use serde_json::Value;

use crate::document::TextRange;
use crate::panel::DocumentId;
use crate::protocol::OutboundMessage;

pub trait Host {
    // ------------------------------------------------------------------
    // rendering surface
    // ------------------------------------------------------------------

    /// Show (creating if needed) and focus the surface for `document`.
    fn reveal(&mut self, document: &DocumentId, title: &str);

    /// Replace the surface content.
    fn set_html(&mut self, document: &DocumentId, html: &str);

    /// Post a message to the surface.
    fn post_message(&mut self, document: &DocumentId, message: &OutboundMessage);

    /// Whether the surface for `document` currently has view focus.
    fn is_focused(&self, document: &DocumentId) -> bool;

    /// Rewrite a local path into a URI the surface sandbox may load.
    fn webview_uri(&self, path: &Path) -> String;

    /// Source expression substituted into the content security policy.
    fn csp_source(&self) -> String;

    // ------------------------------------------------------------------
    // editor
    // ------------------------------------------------------------------

    /// Current text of a document.
    fn document_text(&self, document: &Path) -> Option<String> {
        std::fs::read_to_string(document).ok()
    }

    /// Select and reveal `range` in the editor showing `document`.
    fn select_range(&mut self, document: &DocumentId, range: TextRange);

    /// Set a named host context value.
    fn set_context(&mut self, name: &str, value: &Value);

    fn show_error(&mut self, message: &str);

    fn show_warning(&mut self, message: &str);
}
