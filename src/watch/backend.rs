//! Watch backends.
//!
//! A backend turns "tell me when this file changes" into an owned handle.
//! Closing (or dropping) the handle cancels all future notifications.
//!
//! [`NotifyBackend`] watches the file's parent directory non-recursively and
//! filters by path. Editors that save through a temp file + rename replace
//! the inode, which would silently detach a watch placed on the file itself.

use std::path::{Path, PathBuf};

use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use thiserror::Error;

use crate::utils::path::normalize_path;

/// Invoked (from the backend's thread) when the watched file changes.
pub type ChangeCallback = Box<dyn Fn() + Send + 'static>;

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("`{0}` does not exist")]
    Missing(PathBuf),

    #[error("watcher failed")]
    Notify(#[from] notify::Error),
}

/// An established watch.
pub trait WatchHandle {
    /// Stop delivering notifications. Calling it twice is harmless.
    fn close(&mut self);

    fn path(&self) -> &Path;
}

/// Creates watches.
pub trait WatchBackend {
    fn watch(
        &self,
        path: &Path,
        on_change: ChangeCallback,
    ) -> Result<Box<dyn WatchHandle>, WatchError>;
}

// =============================================================================
// notify
// =============================================================================

/// File watches on top of `notify`'s recommended watcher.
#[derive(Debug, Default, Clone, Copy)]
pub struct NotifyBackend;

struct NotifyWatch {
    /// Dropping the watcher detaches it
    watcher: Option<RecommendedWatcher>,
    path: PathBuf,
}

impl WatchHandle for NotifyWatch {
    fn close(&mut self) {
        if self.watcher.take().is_some() {
            crate::debug!("watch"; "closed {}", self.path.display());
        }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl WatchBackend for NotifyBackend {
    fn watch(
        &self,
        path: &Path,
        on_change: ChangeCallback,
    ) -> Result<Box<dyn WatchHandle>, WatchError> {
        if !path.is_file() {
            return Err(WatchError::Missing(path.to_path_buf()));
        }

        let target = normalize_path(path);
        let Some(parent) = target.parent().map(Path::to_path_buf) else {
            return Err(WatchError::Missing(target));
        };

        let filter = target.clone();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
            match res {
                Ok(event) => {
                    if is_content_change(event.kind)
                        && event.paths.iter().any(|p| is_target(p, &filter))
                    {
                        on_change();
                    }
                }
                Err(e) => crate::log!("watch"; "notify error: {}", e),
            }
        })?;
        watcher.watch(&parent, RecursiveMode::NonRecursive)?;

        crate::debug!("watch"; "watching {}", target.display());
        Ok(Box::new(NotifyWatch {
            watcher: Some(watcher),
            path: target,
        }))
    }
}

/// Ignore metadata-only changes (mtime/atime/chmod noise) and access events.
fn is_content_change(kind: EventKind) -> bool {
    match kind {
        EventKind::Create(_) | EventKind::Remove(_) => true,
        EventKind::Modify(modify) => !matches!(modify, notify::event::ModifyKind::Metadata(_)),
        _ => false,
    }
}

fn is_target(path: &Path, target: &Path) -> bool {
    path == target || (path.file_name() == target.file_name() && normalize_path(path) == target)
}
