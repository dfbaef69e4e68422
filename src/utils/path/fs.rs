//! Path normalization utilities.
//!
//! - `normalize_path` - file system paths (canonicalize + fallback)
//! - `expand_path` - tilde expansion, then resolution against a base directory

use std::path::{Component, Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to a lexical cleanup of the absolute form, so paths of
/// files that do not exist yet still compare equal to their canonical
/// siblings' spelling.
///
/// # Example
/// ```ignore
/// let abs = normalize_path(Path::new("./models/../scene.gltf"));
/// ```
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }

    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
    };

    // Canonicalize the longest existing ancestor, then re-append the rest.
    let absolute = clean(&absolute);
    for ancestor in absolute.ancestors().skip(1) {
        if let Ok(canonical) = ancestor.canonicalize()
            && let Ok(rest) = absolute.strip_prefix(ancestor)
        {
            return canonical.join(rest);
        }
    }

    absolute
}

/// Expand `~` and resolve relative paths against `base`.
pub fn expand_path(path: &Path, base: &Path) -> PathBuf {
    let expanded = shellexpand::tilde(path.to_str().unwrap_or_default()).into_owned();
    let path = PathBuf::from(expanded);
    let full_path = if path.is_relative() {
        base.join(&path)
    } else {
        path
    };
    normalize_path(&full_path)
}

/// Lexically remove `.` and `..` components.
fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_absolute() {
        let normalized = normalize_path(Path::new("/absolute/path/file.gltf"));
        assert!(normalized.is_absolute());
    }

    #[test]
    fn test_normalize_path_relative() {
        let normalized = normalize_path(Path::new("relative/path/file.gltf"));
        assert!(normalized.is_absolute());
    }

    #[test]
    fn test_normalize_missing_file_in_existing_dir() {
        let temp = tempfile::TempDir::new().unwrap();
        let dir = temp.path().canonicalize().unwrap();
        std::fs::create_dir(dir.join("sub")).unwrap();
        let missing = temp.path().join("sub").join("..").join("missing.png");
        assert_eq!(normalize_path(&missing), dir.join("missing.png"));
    }

    #[test]
    fn test_normalize_missing_nested_path() {
        let temp = tempfile::TempDir::new().unwrap();
        let dir = temp.path().canonicalize().unwrap();
        let missing = temp.path().join("engines/Draco/draco_decoder.js");
        assert_eq!(normalize_path(&missing), dir.join("engines/Draco/draco_decoder.js"));
    }

    #[test]
    fn test_clean_parent_components() {
        assert_eq!(
            clean(Path::new("/a/b/../c/./d.png")),
            PathBuf::from("/a/c/d.png")
        );
    }

    #[test]
    fn test_expand_path_relative_to_base() {
        let temp = tempfile::TempDir::new().unwrap();
        let base = temp.path().canonicalize().unwrap();
        std::fs::write(base.join("env.dds"), b"dds").unwrap();
        assert_eq!(expand_path(Path::new("env.dds"), &base), base.join("env.dds"));
    }
}
