//! Resource Watch Set
//!
//! Each panel owns one [`WatchSet`]: a watch on the document itself plus one
//! per external file the document references.
//!
//! ```text
//! rebuild ──> teardown (close all, generation += 1)
//!         ──> watch document          (fires WatchKind::Document)
//!         ──> watch each dependency   (fires WatchKind::Dependency)
//! ```
//!
//! Every notification carries the generation it was created under. Closing a
//! watch stops new notifications, but one may already sit in the event queue;
//! the generation lets the coordinator drop it.

mod backend;

pub use backend::{ChangeCallback, NotifyBackend, WatchBackend, WatchError, WatchHandle};

use std::path::{Path, PathBuf};

use crate::event::{Event, EventSender, WatchKind};
use crate::panel::DocumentId;

struct ActiveWatch {
    kind: WatchKind,
    handle: Box<dyn WatchHandle>,
}

/// Active watches owned by one panel.
#[derive(Default)]
pub struct WatchSet {
    generation: u64,
    watches: Vec<ActiveWatch>,
}

impl WatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every watch with the document watch plus one per dependency.
    ///
    /// Targets that cannot be watched are skipped. Returns the number of
    /// watches established.
    pub fn rebuild(
        &mut self,
        document: &DocumentId,
        dependencies: &[PathBuf],
        backend: &dyn WatchBackend,
        events: &EventSender,
    ) -> usize {
        self.teardown();

        self.establish(document, WatchKind::Document, document.path(), backend, events);
        for dependency in dependencies {
            if dependency == document.path() {
                continue;
            }
            self.establish(document, WatchKind::Dependency, dependency, backend, events);
        }

        self.watches.len()
    }

    fn establish(
        &mut self,
        document: &DocumentId,
        kind: WatchKind,
        path: &Path,
        backend: &dyn WatchBackend,
        events: &EventSender,
    ) {
        let tx = events.clone();
        let owner = document.clone();
        let generation = self.generation;
        let on_change: ChangeCallback = Box::new(move || {
            // Receiver gone means the loop is shutting down.
            let _ = tx.send(Event::WatchFired {
                document: owner.clone(),
                generation,
                kind,
            });
        });

        match backend.watch(path, on_change) {
            Ok(handle) => self.watches.push(ActiveWatch { kind, handle }),
            Err(e) => {
                crate::log!("watch"; "not watching {} {}: {}", kind.label(), path.display(), e)
            }
        }
    }

    /// Close every watch. Safe to call any number of times.
    pub fn teardown(&mut self) {
        for watch in &mut self.watches {
            watch.handle.close();
        }
        self.watches.clear();
        self.generation += 1;
    }

    /// Whether a notification created under `generation` is still live.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.watches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.watches.is_empty()
    }

    /// Watched paths in establishment order.
    pub fn targets(&self) -> impl Iterator<Item = (WatchKind, &Path)> {
        self.watches.iter().map(|w| (w.kind, w.handle.path()))
    }
}

impl Drop for WatchSet {
    fn drop(&mut self) {
        for watch in &mut self.watches {
            watch.handle.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeBackend;

    fn fixture() -> (tempfile::TempDir, DocumentId, FakeBackend) {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("scene.gltf");
        std::fs::write(&path, "{}").unwrap();
        (temp, DocumentId::new(&path), FakeBackend::new())
    }

    #[test]
    fn test_rebuild_watches_document_and_dependencies() {
        let (_temp, doc, backend) = fixture();
        let (tx, _rx) = crate::event::channel();
        let dir = doc.directory().to_path_buf();

        let mut set = WatchSet::new();
        let count = set.rebuild(&doc, &[dir.join("a.png"), dir.join("b.bin")], &backend, &tx);

        assert_eq!(count, 3);
        let targets: Vec<_> = set.targets().map(|(k, p)| (k, p.to_path_buf())).collect();
        assert_eq!(targets[0], (WatchKind::Document, doc.path().to_path_buf()));
        assert_eq!(targets[1], (WatchKind::Dependency, dir.join("a.png")));
        assert_eq!(backend.open_count(), 3);
    }

    #[test]
    fn test_rebuild_twice_leaves_only_latest() {
        let (_temp, doc, backend) = fixture();
        let (tx, _rx) = crate::event::channel();
        let dir = doc.directory().to_path_buf();

        let mut set = WatchSet::new();
        set.rebuild(&doc, &[dir.join("a.png"), dir.join("b.png")], &backend, &tx);
        set.rebuild(&doc, &[dir.join("c.png")], &backend, &tx);
        set.rebuild(&doc, &[dir.join("c.png")], &backend, &tx);

        assert_eq!(set.len(), 2);
        assert_eq!(backend.open_count(), 2);
        assert!(!backend.is_open(&dir.join("a.png")));
        assert!(backend.is_open(&dir.join("c.png")));
    }

    #[test]
    fn test_failed_watch_is_skipped() {
        let (_temp, doc, backend) = fixture();
        let (tx, _rx) = crate::event::channel();
        let dir = doc.directory().to_path_buf();
        backend.fail_on(&dir.join("missing.png"));

        let mut set = WatchSet::new();
        let targets = [dir.join("missing.png"), dir.join("ok.png")];
        let count = set.rebuild(&doc, &targets, &backend, &tx);
        assert_eq!(count, 2);
        assert!(set.targets().all(|(_, p)| p != dir.join("missing.png").as_path()));
    }

    #[test]
    fn test_document_not_watched_twice() {
        let (_temp, doc, backend) = fixture();
        let (tx, _rx) = crate::event::channel();

        let mut set = WatchSet::new();
        set.rebuild(&doc, &[doc.path().to_path_buf()], &backend, &tx);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_teardown_idempotent() {
        let (_temp, doc, backend) = fixture();
        let (tx, _rx) = crate::event::channel();

        let mut set = WatchSet::new();
        set.rebuild(&doc, &[], &backend, &tx);
        set.teardown();
        set.teardown();
        assert!(set.is_empty());
        assert_eq!(backend.open_count(), 0);
    }

    #[test]
    fn test_notifications_carry_generation() {
        let (_temp, doc, backend) = fixture();
        let (tx, mut rx) = crate::event::channel();

        let mut set = WatchSet::new();
        set.rebuild(&doc, &[], &backend, &tx);
        let live = set.generation();
        backend.fire(doc.path());

        match rx.try_recv().unwrap() {
            Event::WatchFired {
                generation, kind, ..
            } => {
                assert_eq!(kind, WatchKind::Document);
                assert!(set.is_current(generation));
                assert_eq!(generation, live);
            }
            other => panic!("unexpected event {other:?}"),
        }

        set.rebuild(&doc, &[], &backend, &tx);
        assert!(!set.is_current(live));
    }

    #[test]
    fn test_drop_closes_watches() {
        let (_temp, doc, backend) = fixture();
        let (tx, _rx) = crate::event::channel();
        {
            let mut set = WatchSet::new();
            set.rebuild(&doc, &[], &backend, &tx);
            assert_eq!(backend.open_count(), 1);
        }
        assert_eq!(backend.open_count(), 0);
    }
}
