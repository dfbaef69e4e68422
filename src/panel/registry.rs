//! Panel Registry
//!
//! Owned map from [`DocumentId`] to [`Panel`], plus the active-panel slot.
//! Enforces one panel per document.

use rustc_hash::FxHashMap;

use super::{ActivePanel, DocumentId, Panel, PanelContext};
use crate::payload;

/// Outcome of [`PanelRegistry::open_panel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opened {
    Created,
    Reused,
}

#[derive(Default)]
pub struct PanelRegistry {
    panels: FxHashMap<DocumentId, Panel>,
    active: ActivePanel,
}

impl PanelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a preview for `document`, creating its panel if absent.
    ///
    /// Either way the content is refreshed from `text` and the panel is
    /// revealed.
    pub fn open_panel(
        &mut self,
        document: DocumentId,
        text: String,
        ctx: &mut PanelContext<'_>,
    ) -> Opened {
        let opened = if self.panels.contains_key(&document) {
            Opened::Reused
        } else {
            crate::log!("preview"; "opening {}", document);
            Opened::Created
        };

        let panel = self
            .panels
            .entry(document.clone())
            .or_insert_with(|| Panel::new(document.clone(), ctx));
        panel.refresh(text, ctx);

        ctx.host.reveal(&document, &payload::title(&document));
        opened
    }

    /// Panel for `document`, if any. No side effects.
    pub fn get_panel(&self, document: &DocumentId) -> Option<&Panel> {
        self.panels.get(document)
    }

    pub fn get_panel_mut(&mut self, document: &DocumentId) -> Option<&mut Panel> {
        self.panels.get_mut(document)
    }

    /// Re-parse and re-render an existing panel. Returns `false` if there is none.
    pub fn refresh_panel(
        &mut self,
        document: &DocumentId,
        text: String,
        ctx: &mut PanelContext<'_>,
    ) -> bool {
        match self.panels.get_mut(document) {
            Some(panel) => {
                panel.refresh(text, ctx);
                true
            }
            None => false,
        }
    }

    /// Re-render every panel from its current text.
    pub fn refresh_all(&mut self, ctx: &mut PanelContext<'_>) {
        for panel in self.panels.values_mut() {
            let text = panel.text().to_owned();
            panel.refresh(text, ctx);
        }
    }

    /// Tear down and remove a panel, then recompute the active panel.
    pub fn dispose_panel(&mut self, document: &DocumentId, ctx: &mut PanelContext<'_>) -> bool {
        let Some(mut panel) = self.panels.remove(document) else {
            return false;
        };
        panel.watches_mut().teardown();
        crate::log!("preview"; "closed {}", document);

        self.recompute_active(ctx);
        true
    }

    /// Tear down every panel.
    pub fn dispose_all(&mut self, ctx: &mut PanelContext<'_>) {
        for (_, mut panel) in self.panels.drain() {
            panel.watches_mut().teardown();
        }
        self.active.set(None, &mut *ctx.host, ctx.notifier);
    }

    /// Make the focused panel (if any) the active one.
    pub fn recompute_active(&mut self, ctx: &mut PanelContext<'_>) {
        let focused = self
            .panels
            .keys()
            .find(|document| ctx.host.is_focused(document))
            .cloned();
        self.active.set(focused, &mut *ctx.host, ctx.notifier);
    }

    pub fn active(&self) -> Option<&DocumentId> {
        self.active.get()
    }

    pub fn documents(&self) -> impl Iterator<Item = &DocumentId> {
        self.panels.keys()
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }
}
