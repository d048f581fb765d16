//! Running regular expressions over a rope without flattening it.
//!
//! The regex engines in `regex-cursor` pull their input one chunk of utf8 at a time. A rope's
//! leaves map onto those chunks directly: ASCII leaves are handed over as-is, and every other leaf
//! is encoded into a string once.

use std::borrow::Cow;
use std::ops::Range;
use std::sync::Arc;
use regex_cursor::engines::meta::Regex;
use regex_cursor::{Cursor, Input};
use crate::fast_str_tools::{byte_to_char_idx, char_to_byte_idx, count_chars};
use crate::node::Node;
use crate::{Rope, RopeError};

/// A [`Cursor`] over the utf8 contents of a rope.
#[derive(Clone)]
pub struct RopeCursor<'a> {
    chunks: Arc<[Cow<'a, str>]>,
    idx: usize,
    /// Byte offset of the start of the current chunk.
    offset: usize,
    total: usize,
}

impl<'a> RopeCursor<'a> {
    pub fn new(rope: &'a Rope) -> Self {
        let mut chunks: Vec<Cow<'a, str>> = rope.leaves().map(|leaf| {
            let ascii = match &*leaf.node {
                Node::Leaf(l) => l.ascii_str(0..l.len()),
                Node::Substring { leaf: l, offset, len } => l.ascii_str(*offset..offset + len),
                _ => None,
            };
            match ascii {
                Some(s) => Cow::Borrowed(s),
                None => Cow::Owned(leaf.to_string()),
            }
        }).collect();

        // The engines expect at least one chunk, even for an empty haystack.
        if chunks.is_empty() {
            chunks.push(Cow::Borrowed(""));
        }

        let total = chunks.iter().map(|c| c.len()).sum();
        RopeCursor { chunks: chunks.into(), idx: 0, offset: 0, total }
    }

    /// Convert a byte offset into the rope's utf8 text into a char index.
    pub fn char_index(&self, byte: usize) -> usize {
        let mut bytes = 0;
        let mut chars = 0;
        for chunk in self.chunks.iter() {
            if byte < bytes + chunk.len() {
                return chars + byte_to_char_idx(chunk, byte - bytes);
            }
            bytes += chunk.len();
            chars += count_chars(chunk);
        }
        chars
    }

    /// Convert a char index into a byte offset into the rope's utf8 text.
    pub fn byte_index(&self, char_idx: usize) -> usize {
        let mut bytes = 0;
        let mut chars = 0;
        for chunk in self.chunks.iter() {
            let n = count_chars(chunk);
            if char_idx < chars + n {
                return bytes + char_to_byte_idx(chunk, char_idx - chars);
            }
            bytes += chunk.len();
            chars += n;
        }
        bytes
    }
}

impl<'a> Cursor for RopeCursor<'a> {
    fn chunk(&self) -> &[u8] {
        self.chunks[self.idx].as_bytes()
    }

    fn advance(&mut self) -> bool {
        if self.idx + 1 < self.chunks.len() {
            self.offset += self.chunks[self.idx].len();
            self.idx += 1;
            true
        } else {
            false
        }
    }

    fn backtrack(&mut self) -> bool {
        if self.idx > 0 {
            self.idx -= 1;
            self.offset -= self.chunks[self.idx].len();
            true
        } else {
            false
        }
    }

    fn total_bytes(&self) -> Option<usize> {
        Some(self.total)
    }

    fn offset(&self) -> usize {
        self.offset
    }
}

/// A regex bound to a rope. Match positions are reported as char ranges.
pub struct RopeMatcher<'a> {
    rope: &'a Rope,
    regex: &'a Regex,
}

impl<'a> RopeMatcher<'a> {
    pub fn is_match(&self) -> bool {
        self.regex.is_match(Input::new(RopeCursor::new(self.rope)))
    }

    /// The first match in the rope.
    pub fn find(&self) -> Option<Range<usize>> {
        find_in(self.regex, self.rope)
    }

    /// The first match which starts at or after char `from`. The text before `from` is still
    /// visible to anchors and word boundaries, so `^` only matches at the start of the rope.
    pub fn find_from(&self, from: usize) -> Result<Option<Range<usize>>, RopeError> {
        let len = self.rope.len();
        if from > len {
            return Err(RopeError::IndexOutOfBounds { index: from, len });
        }

        let cursor = RopeCursor::new(self.rope);
        let start = cursor.byte_index(from);
        let m = self.regex.find(Input::new(cursor.clone()).range(start..));
        Ok(m.map(|m| cursor.char_index(m.start())..cursor.char_index(m.end())))
    }
}

fn find_in(regex: &Regex, rope: &Rope) -> Option<Range<usize>> {
    let cursor = RopeCursor::new(rope);
    let m = regex.find(Input::new(cursor.clone()))?;
    Some(cursor.char_index(m.start())..cursor.char_index(m.end()))
}

impl Rope {
    pub fn matcher<'a>(&'a self, regex: &'a Regex) -> RopeMatcher<'a> {
        RopeMatcher { rope: self, regex }
    }

    /// Does the whole rope match `pattern`?
    pub fn matches_pattern(&self, pattern: &str) -> Result<bool, RopeError> {
        let regex = Regex::new(&format!(r"\A(?:{})\z", pattern))
            .map_err(|e| RopeError::InvalidPattern(e.to_string()))?;
        Ok(self.matcher(&regex).is_match())
    }
}
