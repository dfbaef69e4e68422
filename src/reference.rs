//! External reference discovery.
//!
//! Walks a parsed glTF tree and collects every resource locator that points at
//! another file: buffers, images, shaders and whatever else carries one of the
//! configured locator keys (`uri` by default). Embedded `data:` payloads and
//! remote URLs are not files and never become watch targets.

use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;
use rustc_hash::FxHashSet;
use serde_json::Value;
use url::Url;

use crate::utils::path::normalize_path;

/// What a locator string refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// Payload inlined in the locator itself (`data:` URI)
    Embedded,
    /// Non-file URL, nothing local to watch
    Remote(String),
    /// Local file, resolved against the document directory
    File(PathBuf),
}

impl Locator {
    /// Classify a locator string found in a document living in `base_dir`.
    pub fn classify(raw: &str, base_dir: &Path) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        match Url::parse(raw) {
            Ok(url) if url.scheme() == "data" => Some(Self::Embedded),
            Ok(url) if url.scheme() == "file" => url.to_file_path().ok().map(Self::File),
            // A one-letter scheme is a Windows drive (`C:\models\a.bin`).
            Ok(url) if url.scheme().len() > 1 => Some(Self::Remote(url.into())),
            _ => {
                let decoded = percent_decode_str(raw).decode_utf8_lossy();
                Some(Self::File(normalize_path(&base_dir.join(decoded.as_ref()))))
            }
        }
    }
}

/// Recursive visitor collecting file dependencies.
pub struct ReferenceScanner<'a> {
    keys: &'a [String],
}

impl<'a> ReferenceScanner<'a> {
    pub fn new(keys: &'a [String]) -> Self {
        Self { keys }
    }

    /// Files referenced by `tree`, in document order, without duplicates.
    pub fn scan(&self, tree: &Value, base_dir: &Path) -> Vec<PathBuf> {
        let mut walk = Walk {
            keys: self.keys,
            base_dir,
            visited: FxHashSet::default(),
            seen: FxHashSet::default(),
            found: Vec::new(),
        };
        walk.visit(tree);
        walk.found
    }
}

struct Walk<'a> {
    keys: &'a [String],
    base_dir: &'a Path,
    /// Composite nodes already visited in this traversal
    visited: FxHashSet<*const Value>,
    seen: FxHashSet<PathBuf>,
    found: Vec<PathBuf>,
}

impl Walk<'_> {
    fn visit(&mut self, value: &Value) {
        match value {
            Value::Object(map) => {
                if !self.visited.insert(std::ptr::from_ref(value)) {
                    return;
                }
                for (key, child) in map {
                    if let Value::String(raw) = child
                        && self.is_locator_key(key)
                    {
                        self.record(raw);
                    } else {
                        self.visit(child);
                    }
                }
            }
            Value::Array(items) => {
                if !self.visited.insert(std::ptr::from_ref(value)) {
                    return;
                }
                for item in items {
                    self.visit(item);
                }
            }
            _ => {}
        }
    }

    fn is_locator_key(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    fn record(&mut self, raw: &str) {
        match Locator::classify(raw, self.base_dir) {
            Some(Locator::File(path)) => {
                if self.seen.insert(path.clone()) {
                    self.found.push(path);
                }
            }
            Some(Locator::Remote(url)) => {
                crate::debug!("scan"; "skipping remote reference {}", url);
            }
            Some(Locator::Embedded) | None => {}
        }
    }
}
