//! JSON pointer → byte span index.
//!
//! Built by a second pass over text that `serde_json` already accepted, so
//! the scanner only has to follow the grammar, not validate it. Spans cover
//! the literal value text: quotes for strings, brackets for containers.

use rustc_hash::FxHashMap;
use serde::Serialize;

use super::pointer::escape_token;

/// Byte offsets `[start, end)` into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Pointer ↔ span index for one parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionMap {
    spans: FxHashMap<String, Span>,
}

impl PositionMap {
    /// Index every value in `text`, shifting spans by `offset` bytes.
    ///
    /// `text` must already be known-valid JSON. If the scanner still trips,
    /// the map is left empty rather than partially filled.
    pub fn build(text: &str, offset: usize) -> Self {
        let mut scanner = Scanner {
            bytes: text.as_bytes(),
            text,
            pos: 0,
            offset,
            spans: FxHashMap::default(),
        };

        let mut pointer = String::new();
        match scanner.value(&mut pointer) {
            Ok(()) => Self {
                spans: scanner.spans,
            },
            Err(Malformed(at)) => {
                crate::debug!("parse"; "position map scan stopped at byte {}", at + offset);
                Self::default()
            }
        }
    }

    /// Span of the value at `pointer` (`""` is the root).
    pub fn get(&self, pointer: &str) -> Option<Span> {
        self.spans.get(pointer).copied()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// Scanner ran off the expected grammar at this byte.
#[derive(Debug)]
struct Malformed(usize);

struct Scanner<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    offset: usize,
    spans: FxHashMap<String, Span>,
}

impl Scanner<'_> {
    fn value(&mut self, pointer: &mut String) -> Result<(), Malformed> {
        self.skip_ws();
        let start = self.pos;

        match self.peek()? {
            b'{' => self.object(pointer)?,
            b'[' => self.array(pointer)?,
            b'"' => self.string()?,
            b't' | b'n' => self.advance(4)?,
            b'f' => self.advance(5)?,
            b'-' | b'0'..=b'9' => self.number(),
            _ => return Err(Malformed(self.pos)),
        }

        let span = Span {
            start: start + self.offset,
            end: self.pos + self.offset,
        };
        self.spans.insert(pointer.clone(), span);
        Ok(())
    }

    fn object(&mut self, pointer: &mut String) -> Result<(), Malformed> {
        self.expect(b'{')?;
        self.skip_ws();
        if self.peek()? == b'}' {
            self.pos += 1;
            return Ok(());
        }

        loop {
            self.skip_ws();
            let key_start = self.pos;
            self.string()?;
            let key: String = serde_json::from_str(&self.text[key_start..self.pos])
                .map_err(|_| Malformed(key_start))?;

            self.skip_ws();
            self.expect(b':')?;

            let len = pointer.len();
            pointer.push('/');
            pointer.push_str(&escape_token(&key));
            self.value(pointer)?;
            pointer.truncate(len);

            self.skip_ws();
            match self.peek()? {
                b',' => self.pos += 1,
                b'}' => {
                    self.pos += 1;
                    return Ok(());
                }
                _ => return Err(Malformed(self.pos)),
            }
        }
    }

    fn array(&mut self, pointer: &mut String) -> Result<(), Malformed> {
        self.expect(b'[')?;
        self.skip_ws();
        if self.peek()? == b']' {
            self.pos += 1;
            return Ok(());
        }

        let mut index = 0usize;
        loop {
            let len = pointer.len();
            pointer.push('/');
            pointer.push_str(&index.to_string());
            self.value(pointer)?;
            pointer.truncate(len);
            index += 1;

            self.skip_ws();
            match self.peek()? {
                b',' => self.pos += 1,
                b']' => {
                    self.pos += 1;
                    return Ok(());
                }
                _ => return Err(Malformed(self.pos)),
            }
        }
    }

    fn string(&mut self) -> Result<(), Malformed> {
        self.expect(b'"')?;
        loop {
            match self.peek()? {
                b'\\' => self.advance(2)?,
                b'"' => {
                    self.pos += 1;
                    return Ok(());
                }
                _ => self.pos += 1,
            }
        }
    }

    fn number(&mut self) {
        while let Some(b) = self.bytes.get(self.pos)
            && matches!(b, b'0'..=b'9' | b'-' | b'+' | b'.' | b'e' | b'E')
        {
            self.pos += 1;
        }
    }

    fn skip_ws(&mut self) {
        while let Some(b) = self.bytes.get(self.pos)
            && matches!(b, b' ' | b'\t' | b'\n' | b'\r')
        {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Result<u8, Malformed> {
        self.bytes.get(self.pos).copied().ok_or(Malformed(self.pos))
    }

    fn expect(&mut self, byte: u8) -> Result<(), Malformed> {
        if self.peek()? != byte {
            return Err(Malformed(self.pos));
        }
        self.pos += 1;
        Ok(())
    }

    fn advance(&mut self, n: usize) -> Result<(), Malformed> {
        if self.pos + n > self.bytes.len() {
            return Err(Malformed(self.pos));
        }
        self.pos += n;
        Ok(())
    }
}
