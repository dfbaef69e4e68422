//! Sandbox-approved URIs.
//!
//! A rendering surface may only load from two roots: the extension install
//! directory and the previewed document's directory. Anything outside both
//! has no URI.

use std::path::{Path, PathBuf};

use crate::host::Host;
use crate::utils::path::normalize_path;

pub struct Sandbox<'a> {
    host: &'a dyn Host,
    roots: [PathBuf; 2],
}

impl<'a> Sandbox<'a> {
    pub fn new(host: &'a dyn Host, extension_root: &Path, document_dir: &Path) -> Self {
        Self {
            host,
            roots: [normalize_path(extension_root), normalize_path(document_dir)],
        }
    }

    /// Whether a normalized path lies under one of the roots.
    fn allows(&self, path: &Path) -> bool {
        self.roots.iter().any(|root| path.starts_with(root))
    }

    /// URI for a file under one of the roots.
    pub fn uri(&self, path: &Path) -> Option<String> {
        let path = normalize_path(path);
        self.allows(&path).then(|| self.host.webview_uri(&path))
    }

    /// URI for a directory, always ending in `/` so relative URLs resolve inside it.
    pub fn dir_uri(&self, dir: &Path) -> Option<String> {
        let mut uri = self.uri(dir)?;
        if !uri.ends_with('/') {
            uri.push('/');
        }
        Some(uri)
    }
}
