//! HTML utility functions.
//!
//! - `escape_attr()` - entity escaping for attribute values
//! - `raw_text()` - make a string safe to carry inside a raw-text `<script>`

use std::borrow::Cow;

/// Characters that require HTML escaping.
const ESCAPE_CHARS: [char; 5] = ['<', '>', '&', '"', '\''];

/// Get the HTML entity for a special character.
#[inline]
fn escape_char(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        _ => None,
    }
}

/// Escape HTML attribute values.
///
/// Uses `Cow` to avoid allocation when no escaping is needed.
///
/// # Example
/// ```ignore
/// assert_eq!(escape_attr("a\"b"), "a&quot;b");
/// assert_eq!(escape_attr("file:///x"), "file:///x"); // No allocation
/// ```
#[inline]
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    if !s.contains(ESCAPE_CHARS) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match escape_char(c) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Prepare text for a raw-text element such as `<script type="text/plain">`.
///
/// Entities are not decoded inside raw-text elements. Only `</script` can end
/// the container, and `<!--` can make the tokenizer skip the real end tag.
/// These become `<\/script` and `\u003C!--`, both equivalent escapes inside
/// JSON strings. Everything else is carried as-is.
pub fn raw_text(s: &str) -> Cow<'_, str> {
    // ASCII lowercasing keeps byte offsets.
    let lower = s.to_ascii_lowercase();
    if !lower.contains("</script") && !lower.contains("<!--") {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 16);
    let mut copied = 0;
    for (i, _) in lower.match_indices('<') {
        let rest = &lower[i..];
        if rest.starts_with("</script") {
            result.push_str(&s[copied..i]);
            result.push_str("<\\/");
            copied = i + 2;
        } else if rest.starts_with("<!--") {
            result.push_str(&s[copied..i]);
            result.push_str("\\u003C");
            copied = i + 1;
        }
    }
    result.push_str(&s[copied..]);
    Cow::Owned(result)
}
