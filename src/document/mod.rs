//! Document parsing.
//!
//! Turns raw editor text into a [`ParsedDocument`]:
//!
//! - `tree` - the glTF JSON as a `serde_json::Value`, or a [`ParseFailure`]
//! - `positions` - JSON pointer → byte span index into the same text
//! - `content_type` - the detected glTF major version
//!
//! Parsing never fails outright. Invalid text yields `Content::Failed` with
//! an empty position map, so the panel stays usable while the user fixes it.

mod pointer;
mod position;
mod source_map;
mod version;

pub use pointer::escape_token;
pub use position::{LineIndex, TextPosition, TextRange};
pub use source_map::{PositionMap, Span};
pub use version::ContentType;

use serde_json::Value;

/// UTF-8 byte order mark some editors prepend.
const BOM: &str = "\u{feff}";

/// Why a document could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub message: String,
    /// 1-based line, as reported by the JSON parser
    pub line: usize,
    /// 1-based column, as reported by the JSON parser
    pub column: usize,
}

impl std::fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // serde_json messages already end with "at line L column C"
        f.write_str(&self.message)
    }
}

/// Parsed document content or the failure sentinel.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Tree(Value),
    Failed(ParseFailure),
}

/// Result of parsing one text snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    content: Content,
    positions: PositionMap,
    content_type: ContentType,
}

impl ParsedDocument {
    /// Parse a text snapshot. Identical text always yields an identical result.
    pub fn parse(text: &str) -> Self {
        let (offset, body) = match text.strip_prefix(BOM) {
            Some(rest) => (BOM.len(), rest),
            None => (0, text),
        };

        match serde_json::from_str::<Value>(body) {
            Ok(tree) => {
                let positions = PositionMap::build(body, offset);
                let content_type = ContentType::detect(&tree);
                Self {
                    content: Content::Tree(tree),
                    positions,
                    content_type,
                }
            }
            Err(err) => Self {
                content: Content::Failed(ParseFailure {
                    message: err.to_string(),
                    line: err.line(),
                    column: err.column(),
                }),
                positions: PositionMap::default(),
                content_type: ContentType::BASELINE,
            },
        }
    }

    /// Placeholder for a panel that has not parsed anything yet.
    pub fn empty() -> Self {
        Self {
            content: Content::Failed(ParseFailure {
                message: "document not loaded".to_string(),
                line: 0,
                column: 0,
            }),
            positions: PositionMap::default(),
            content_type: ContentType::BASELINE,
        }
    }

    pub fn tree(&self) -> Option<&Value> {
        match &self.content {
            Content::Tree(tree) => Some(tree),
            Content::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&ParseFailure> {
        match &self.content {
            Content::Tree(_) => None,
            Content::Failed(failure) => Some(failure),
        }
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn positions(&self) -> &PositionMap {
        &self.positions
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }
}
