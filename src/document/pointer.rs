//! JSON pointer reference tokens (RFC 6901).

use std::borrow::Cow;

/// Escape an object key for use as a pointer token: `~` → `~0`, `/` → `~1`.
pub fn escape_token(key: &str) -> Cow<'_, str> {
    if key.contains(['~', '/']) {
        Cow::Owned(key.replace('~', "~0").replace('/', "~1"))
    } else {
        Cow::Borrowed(key)
    }
}
