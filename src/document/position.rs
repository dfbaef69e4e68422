//! Byte offset → editor coordinate conversion.
//!
//! Editors address text by line and character, with characters counted in
//! UTF-16 code units. Offsets past the end clamp to the end of the text;
//! offsets inside a multi-byte character snap back to its first byte.

use serde::Serialize;

use super::Span;

/// Zero-based line and UTF-16 character offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct TextPosition {
    pub line: usize,
    pub character: usize,
}

/// A selection in editor coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextRange {
    pub start: TextPosition,
    pub end: TextPosition,
}

/// Line-start table over one text snapshot.
pub struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { text, line_starts }
    }

    pub fn position(&self, offset: usize) -> TextPosition {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }

        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let line_start = self.line_starts[line];
        let character = self.text[line_start..offset].encode_utf16().count();

        TextPosition { line, character }
    }

    pub fn range(&self, span: Span) -> TextRange {
        TextRange {
            start: self.position(span.start),
            end: self.position(span.end),
        }
    }
}
