use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::io;
use std::ops::Range;
use std::sync::Arc;
use crate::concat::{self, concatenate, join};
use crate::fast_str_tools::{char_to_byte_idx, count_chars, is_trimmable};
use crate::iter::{Chars, Leaves, RevChars};
use crate::leaf::Leaf;
use crate::node::{Node, NodeKind};
use crate::search;
use crate::sequential::SequentialAccess;
use crate::{RopeError, MAX_DEPTH, MAX_LEN};

/// An immutable rope.
///
/// Cloning a rope is O(1): it bumps a reference count. Every editing method takes `&self` and
/// returns a new rope which shares structure with `self`. Lengths and indexes are counted in
/// chars (unicode scalar values), not bytes.
#[derive(Clone)]
pub struct Rope {
    pub(crate) node: Arc<Node>,
}

/// Buffer size used by [`Rope::write_io`] for leaves which aren't stored as utf8.
pub const WRITE_CHUNK: usize = 4096;

fn check_range(range: &Range<usize>, len: usize) -> Result<(), RopeError> {
    if range.start > range.end || range.end > len {
        Err(RopeError::InvalidRange { start: range.start, end: range.end, len })
    } else {
        Ok(())
    }
}

/// Leaves are built in one piece, so their length is checked up front.
fn check_len(len: usize) -> Result<(), RopeError> {
    if len > MAX_LEN {
        Err(RopeError::LengthOverflow { left: 0, right: len })
    } else {
        Ok(())
    }
}

// A string's byte length bounds its char count, so short strings skip counting.
fn check_str_len(s: &str) -> Result<(), RopeError> {
    if s.len() > MAX_LEN { check_len(count_chars(s)) } else { Ok(()) }
}

fn check_index(index: usize, len: usize) -> Result<(), RopeError> {
    if index > len {
        Err(RopeError::IndexOutOfBounds { index, len })
    } else {
        Ok(())
    }
}

impl Rope {
    /// Creates an empty rope.
    pub fn new() -> Self {
        Rope::from_leaf(Leaf::empty())
    }

    /// Creates a rope holding a private copy of `chars`.
    ///
    /// # Panics
    ///
    /// Panics if there are more than [`MAX_LEN`] chars. See [`Rope::try_from_chars`].
    pub fn from_chars(chars: &[char]) -> Self {
        Rope::try_from_chars(chars).unwrap_or_else(|e| panic!("{}", e))
    }

    pub fn try_from_chars(chars: &[char]) -> Result<Self, RopeError> {
        check_len(chars.len())?;
        Ok(Rope::from_leaf(Leaf::from_chars(chars)))
    }

    /// Creates a rope which shares `chars` rather than copying them. The buffer can't change
    /// underneath the rope: nothing can mutate the contents of an `Arc<[char]>`.
    ///
    /// # Panics
    ///
    /// Panics if there are more than [`MAX_LEN`] chars. See [`Rope::try_from_shared`].
    pub fn from_shared(chars: Arc<[char]>) -> Self {
        Rope::try_from_shared(chars).unwrap_or_else(|e| panic!("{}", e))
    }

    pub fn try_from_shared(chars: Arc<[char]>) -> Result<Self, RopeError> {
        check_len(chars.len())?;
        Ok(Rope::from_leaf(Leaf::Chars(chars)))
    }

    /// Creates a rope over a shared string. ASCII strings are used in place; anything else is
    /// decoded into chars once.
    ///
    /// # Panics
    ///
    /// Panics if the string is more than [`MAX_LEN`] chars long. See [`Rope::try_from_shared_str`].
    pub fn from_shared_str(s: Arc<str>) -> Self {
        Rope::try_from_shared_str(s).unwrap_or_else(|e| panic!("{}", e))
    }

    pub fn try_from_shared_str(s: Arc<str>) -> Result<Self, RopeError> {
        check_str_len(&s)?;
        if s.is_ascii() {
            Ok(Rope::from_leaf(Leaf::Ascii(s)))
        } else {
            Ok(Rope::from_leaf(Leaf::from_str(&s)))
        }
    }

    /// The fallible version of `Rope::from(&str)`.
    pub fn try_from_str(s: &str) -> Result<Self, RopeError> {
        check_str_len(s)?;
        Ok(Rope::from_leaf(Leaf::from_str(s)))
    }

    /// The fallible version of `Rope::from(String)`.
    pub fn try_from_string(s: String) -> Result<Self, RopeError> {
        check_str_len(&s)?;
        Ok(Rope::from_leaf(Leaf::from_string(s)))
    }

    /// A rope made of `ch` repeated `n` times. This doesn't allocate a buffer.
    pub fn repeat(ch: char, n: usize) -> Result<Self, RopeError> {
        if n > MAX_LEN {
            return Err(RopeError::LengthOverflow { left: 0, right: n });
        }
        Ok(Rope::from_leaf(Leaf::Repeat { ch, len: n }))
    }

    /// Length of the rope in chars.
    #[inline]
    pub fn len(&self) -> usize {
        self.node.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The depth of the tree. Leaves have depth 0.
    #[inline]
    pub fn depth(&self) -> usize {
        self.node.depth()
    }

    pub fn kind(&self) -> NodeKind {
        self.node.kind()
    }

    /// The two halves of a concatenation node. Returns `None` for every other kind of node.
    pub fn children(&self) -> Option<(&Rope, &Rope)> {
        match &*self.node {
            Node::Concat { left, right, .. } => Some((left, right)),
            _ => None,
        }
    }

    /// Returns true if both ropes are the same node in memory.
    #[inline]
    pub fn ptr_eq(a: &Rope, b: &Rope) -> bool {
        Arc::ptr_eq(&a.node, &b.node)
    }

    /// Returns the char at `index`. O(log n).
    pub fn char_at(&self, index: usize) -> Result<char, RopeError> {
        if index >= self.len() {
            return Err(RopeError::IndexOutOfBounds { index, len: self.len() });
        }
        Ok(self.node.char_at(index))
    }

    pub fn chars(&self) -> Chars<'_> {
        Chars::new(self, 0)
    }

    /// Iterate forwards from char `start`. `start` can be equal to the length of the rope.
    pub fn chars_at(&self, start: usize) -> Result<Chars<'_>, RopeError> {
        check_index(start, self.len())?;
        Ok(Chars::new(self, start))
    }

    pub fn chars_rev(&self) -> RevChars<'_> {
        RevChars::new(self, self.len())
    }

    /// Iterate backwards through the chars before `end`, starting at `end - 1`.
    pub fn chars_rev_from(&self, end: usize) -> Result<RevChars<'_>, RopeError> {
        check_index(end, self.len())?;
        Ok(RevChars::new(self, end))
    }

    /// Iterate over the leaf-level nodes (leaves, substrings and reversed views) of the rope.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves::new(self)
    }

    pub fn sequential(&self) -> SequentialAccess<'_> {
        SequentialAccess::new(self)
    }

    pub fn append(&self, other: &Rope) -> Result<Rope, RopeError> {
        concatenate(self, other)
    }

    pub fn append_str(&self, s: &str) -> Result<Rope, RopeError> {
        if s.is_empty() { return Ok(self.clone()); }
        concatenate(self, &Rope::try_from_str(s)?)
    }

    pub fn append_char(&self, ch: char) -> Result<Rope, RopeError> {
        concatenate(self, &Rope::from(ch))
    }

    /// Append the chars of `s` in the (char indexed) `range`.
    pub fn append_str_range(&self, s: &str, range: Range<usize>) -> Result<Rope, RopeError> {
        check_range(&range, count_chars(s))?;
        let start = char_to_byte_idx(s, range.start);
        let end = start + char_to_byte_idx(&s[start..], range.end - range.start);
        self.append_str(&s[start..end])
    }

    /// Insert `text` at char position `at`.
    pub fn insert(&self, at: usize, text: &Rope) -> Result<Rope, RopeError> {
        let len = self.len();
        check_index(at, len)?;

        if at == 0 { return concatenate(text, self); }
        if at == len { return concatenate(self, text); }

        let head = concatenate(&self.slice_unchecked(0, at), text)?;
        concatenate(&head, &self.slice_unchecked(at, len))
    }

    pub fn insert_str(&self, at: usize, text: &str) -> Result<Rope, RopeError> {
        self.insert(at, &Rope::try_from_str(text)?)
    }

    /// Remove the chars in `range`. Deleting an empty range returns the rope unchanged.
    pub fn delete(&self, range: Range<usize>) -> Result<Rope, RopeError> {
        let len = self.len();
        check_range(&range, len)?;
        if range.is_empty() { return Ok(self.clone()); }

        Ok(join(self.slice_unchecked(0, range.start), self.slice_unchecked(range.end, len)))
    }

    /// The chars in `range`, as a rope sharing storage with this one.
    pub fn slice(&self, range: Range<usize>) -> Result<Rope, RopeError> {
        check_range(&range, self.len())?;
        Ok(self.slice_unchecked(range.start, range.end))
    }

    pub fn trim_start(&self) -> Rope {
        let start = self.chars().position(|c| !is_trimmable(c)).unwrap_or(self.len());
        if start == 0 {
            self.clone()
        } else {
            self.slice_unchecked(start, self.len())
        }
    }

    pub fn trim_end(&self) -> Rope {
        let trailing = self.chars_rev().take_while(|c| is_trimmable(*c)).count();
        if trailing == 0 {
            self.clone()
        } else {
            self.slice_unchecked(0, self.len() - trailing)
        }
    }

    /// Remove whitespace and control characters from both ends of the rope.
    pub fn trim(&self) -> Rope {
        self.trim_start().trim_end()
    }

    fn padding(&self, target: usize, ch: char) -> Result<Option<Rope>, RopeError> {
        let len = self.len();
        if target <= len { return Ok(None); }
        if target > MAX_LEN {
            return Err(RopeError::LengthOverflow { left: len, right: target - len });
        }
        Ok(Some(Rope::from_leaf(Leaf::Repeat { ch, len: target - len })))
    }

    /// Pad the start of the rope with `ch` until it is `target` chars long.
    pub fn pad_start(&self, target: usize, ch: char) -> Result<Rope, RopeError> {
        match self.padding(target, ch)? {
            Some(pad) => concatenate(&pad, self),
            None => Ok(self.clone()),
        }
    }

    /// Pad the end of the rope with `ch` until it is `target` chars long.
    pub fn pad_end(&self, target: usize, ch: char) -> Result<Rope, RopeError> {
        match self.padding(target, ch)? {
            Some(pad) => concatenate(self, &pad),
            None => Ok(self.clone()),
        }
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        let mut chars = self.chars();
        prefix.chars().all(|c| chars.next() == Some(c))
    }

    /// Does `prefix` appear in the rope starting at char `offset`?
    pub fn starts_with_at(&self, prefix: &str, offset: usize) -> Result<bool, RopeError> {
        check_index(offset, self.len())?;
        let mut chars = Chars::new(self, offset);
        Ok(prefix.chars().all(|c| chars.next() == Some(c)))
    }

    pub fn ends_with(&self, suffix: &str) -> bool {
        let mut chars = self.chars_rev();
        suffix.chars().rev().all(|c| chars.next() == Some(c))
    }

    /// Does `suffix` appear in the rope ending `offset_from_end` chars before the end?
    pub fn ends_with_at(&self, suffix: &str, offset_from_end: usize) -> Result<bool, RopeError> {
        let len = self.len();
        check_index(offset_from_end, len)?;
        let mut chars = RevChars::new(self, len - offset_from_end);
        Ok(suffix.chars().rev().all(|c| chars.next() == Some(c)))
    }

    pub fn index_of_char(&self, ch: char) -> Option<usize> {
        search::index_of_char(self, ch, 0)
    }

    /// Find the first `ch` at or after `from`.
    pub fn index_of_char_from(&self, ch: char, from: usize) -> Result<Option<usize>, RopeError> {
        check_index(from, self.len())?;
        Ok(search::index_of_char(self, ch, from))
    }

    /// Find the first occurrence of `needle`. An empty needle is never found.
    pub fn index_of(&self, needle: &str) -> Option<usize> {
        let needle: Vec<char> = needle.chars().collect();
        search::index_of(self, &needle, 0)
    }

    /// Find the first occurrence of `needle` which starts at or after `from`.
    pub fn index_of_from(&self, needle: &str, from: usize) -> Result<Option<usize>, RopeError> {
        check_index(from, self.len())?;
        let needle: Vec<char> = needle.chars().collect();
        Ok(search::index_of(self, &needle, from))
    }

    /// Returns a balanced copy of this rope, sharing all of its leaves.
    pub fn rebalance(&self) -> Rope {
        match &*self.node {
            Node::Concat { .. } => concat::rebalance(self),
            _ => self.clone(),
        }
    }

    /// Write the whole rope to `out`.
    pub fn write_to<W: fmt::Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        self.node.write_range(out, 0, self.len())
    }

    /// Write `len` chars starting at `offset` to `out`.
    pub fn write_range<W: fmt::Write + ?Sized>(&self, out: &mut W, offset: usize, len: usize) -> Result<(), RopeError> {
        let end = offset.saturating_add(len);
        check_range(&(offset..end), self.len())?;
        self.node.write_range(out, offset, len)?;
        Ok(())
    }

    /// Write the rope as utf8 to an io sink. ASCII leaves are written in place. Everything else is
    /// encoded through a small buffer, so no single write is much over [`WRITE_CHUNK`] bytes.
    pub fn write_io<W: io::Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        let mut buf = String::with_capacity(WRITE_CHUNK + 4);
        for leaf in self.leaves() {
            let ascii = match &*leaf.node {
                Node::Leaf(l) => l.ascii_str(0..l.len()),
                Node::Substring { leaf: l, offset, len } => l.ascii_str(*offset..offset + len),
                _ => None,
            };

            if let Some(s) = ascii {
                out.write_all(s.as_bytes())?;
                continue;
            }

            for c in leaf.chars() {
                buf.push(c);
                if buf.len() >= WRITE_CHUNK {
                    out.write_all(buf.as_bytes())?;
                    buf.clear();
                }
            }
            if !buf.is_empty() {
                out.write_all(buf.as_bytes())?;
                buf.clear();
            }
        }
        Ok(())
    }

    /// Polynomial `31 * h + c` string hash. Ropes with 6 or more chars only hash their first 5 and
    /// last chars.
    fn fingerprint(&self) -> u32 {
        fn mix(h: u32, c: char) -> u32 {
            h.wrapping_mul(31).wrapping_add(c as u32)
        }

        let len = self.len();
        if len < 6 {
            self.chars().fold(0, mix)
        } else {
            let h = self.chars().take(5).fold(0, mix);
            mix(h, self.node.char_at(len - 1))
        }
    }

    /// Check the internal structure of the rope. Panics if anything is inconsistent.
    pub fn check(&self) {
        assert!(self.len() <= MAX_LEN);
        assert!(self.depth() <= MAX_DEPTH);

        let mut stack = vec![self];
        while let Some(rope) = stack.pop() {
            match &*rope.node {
                Node::Leaf(_) => {}
                Node::Substring { leaf, offset, len } => {
                    assert!(*len > 0);
                    assert!(offset + len <= leaf.len());
                }
                Node::Reverse(base) => {
                    assert!(matches!(base.kind(), NodeKind::Leaf | NodeKind::Substring));
                }
                Node::Concat { left, right, len, depth } => {
                    assert!(!left.is_empty());
                    assert!(!right.is_empty());
                    assert_eq!(*len, left.len() + right.len());
                    assert_eq!(*depth, 1 + left.depth().max(right.depth()));
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
    }
}

impl Default for Rope {
    fn default() -> Self {
        Self::new()
    }
}

/// Panics if `s` is more than [`MAX_LEN`] chars long. See [`Rope::try_from_str`].
impl<'a> From<&'a str> for Rope {
    fn from(s: &str) -> Self {
        Rope::try_from_str(s).unwrap_or_else(|e| panic!("{}", e))
    }
}

/// Panics if `s` is more than [`MAX_LEN`] chars long. See [`Rope::try_from_string`].
impl From<String> for Rope {
    fn from(s: String) -> Self {
        Rope::try_from_string(s).unwrap_or_else(|e| panic!("{}", e))
    }
}

impl From<char> for Rope {
    fn from(ch: char) -> Self {
        Rope::from_leaf(Leaf::Repeat { ch, len: 1 })
    }
}

/// Panics if the iterator yields more than [`MAX_LEN`] chars.
impl FromIterator<char> for Rope {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        let chars: Vec<char> = iter.into_iter().collect();
        if let Err(e) = check_len(chars.len()) {
            panic!("{}", e);
        }
        Rope::from_leaf(Leaf::from_char_vec(chars))
    }
}

impl fmt::Display for Rope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

impl fmt::Debug for Rope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Rope").field(&self.to_string()).finish()
    }
}

impl PartialEq for Rope {
    fn eq(&self, other: &Rope) -> bool {
        Rope::ptr_eq(self, other)
            || (self.len() == other.len() && self.chars().eq(other.chars()))
    }
}
impl Eq for Rope {}

impl PartialEq<str> for Rope {
    fn eq(&self, other: &str) -> bool {
        self.chars().eq(other.chars())
    }
}

impl<'a> PartialEq<&'a str> for Rope {
    fn eq(&self, other: &&'a str) -> bool {
        self.chars().eq(other.chars())
    }
}

impl PartialEq<Rope> for str {
    fn eq(&self, other: &Rope) -> bool {
        other == self
    }
}

impl<'a> PartialEq<Rope> for &'a str {
    fn eq(&self, other: &Rope) -> bool {
        other == *self
    }
}

impl Ord for Rope {
    fn cmp(&self, other: &Self) -> Ordering {
        if Rope::ptr_eq(self, other) { return Ordering::Equal; }
        self.chars().cmp(other.chars())
    }
}

impl PartialOrd for Rope {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialOrd<str> for Rope {
    fn partial_cmp(&self, other: &str) -> Option<Ordering> {
        Some(self.chars().cmp(other.chars()))
    }
}

impl Hash for Rope {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(self.fingerprint());
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;
    use super::*;

    fn hash_of(r: &Rope) -> u64 {
        let mut h = DefaultHasher::new();
        r.hash(&mut h);
        h.finish()
    }

    #[test]
    fn send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Rope>();
    }

    #[test]
    fn empty_rope() {
        let r = Rope::new();
        assert_eq!(r.len(), 0);
        assert!(r.is_empty());
        assert_eq!(r.to_string(), "");
        assert_eq!(r, Rope::default());
        assert_eq!(r.char_at(0), Err(RopeError::IndexOutOfBounds { index: 0, len: 0 }));
        r.check();
    }

    #[test]
    fn char_at_bounds() {
        let r = Rope::from("aツc");
        assert_eq!(r.len(), 3);
        assert_eq!(r.char_at(1), Ok('ツ'));
        assert_eq!(r.char_at(3), Err(RopeError::IndexOutOfBounds { index: 3, len: 3 }));
    }

    #[test]
    fn delete_then_slice() {
        let r = Rope::from("12345678902234567890");
        let r = r.delete(0..1).unwrap();
        assert_eq!(r, "2345678902234567890");
        assert_eq!(r.slice(7..10).unwrap(), "902");
    }

    #[test]
    fn delete_empty_range_is_identity() {
        let r = Rope::from("hello");
        assert!(Rope::ptr_eq(&r.delete(2..2).unwrap(), &r));
        assert_eq!(r.delete(3..2), Err(RopeError::InvalidRange { start: 3, end: 2, len: 5 }));
        assert_eq!(r.delete(0..6), Err(RopeError::InvalidRange { start: 0, end: 6, len: 5 }));
    }

    #[test]
    fn full_slice_is_identity() {
        let r = Rope::from("hello there everyone");
        assert!(Rope::ptr_eq(&r.slice(0..r.len()).unwrap(), &r));
        assert!(r.slice(4..4).unwrap().is_empty());
    }

    #[test]
    fn insert_positions() {
        let r = Rope::from("held");
        assert_eq!(r.insert_str(0, ">").unwrap(), ">held");
        assert_eq!(r.insert_str(4, "<").unwrap(), "held<");
        assert_eq!(r.insert_str(3, "lo worl").unwrap(), "hello world");
        assert_eq!(r.insert_str(5, "x"), Err(RopeError::IndexOutOfBounds { index: 5, len: 4 }));
        // The original is untouched.
        assert_eq!(r, "held");
    }

    #[test]
    fn padding() {
        let r = Rope::from("hello");
        assert_eq!(r.pad_start(7, '~').unwrap(), "~~hello");
        assert_eq!(r.pad_end(8, '.').unwrap(), "hello...");
        assert!(Rope::ptr_eq(&r.pad_start(5, '~').unwrap(), &r));
        assert!(Rope::ptr_eq(&r.pad_end(2, '~').unwrap(), &r));

        let long = r.pad_start(100, ' ').unwrap();
        assert_eq!(long.len(), 100);
        assert!(long.ends_with(" hello"));
        assert_eq!(long.trim(), "hello");

        assert!(matches!(r.pad_end(MAX_LEN + 1, ' '), Err(RopeError::LengthOverflow { .. })));
    }

    #[test]
    fn trimming() {
        let r = Rope::from(" \t hi there \n\u{3000}");
        assert_eq!(r.trim_start(), "hi there \n\u{3000}");
        assert_eq!(r.trim_end(), " \t hi there");
        assert_eq!(r.trim(), "hi there");

        let clean = Rope::from("clean");
        assert!(Rope::ptr_eq(&clean.trim(), &clean));
        assert!(Rope::from(" \n\t ").trim().is_empty());
    }

    #[test]
    fn prefixes_and_suffixes() {
        let r = Rope::from("hello world");
        assert!(r.starts_with("hello"));
        assert!(r.starts_with(""));
        assert!(!r.starts_with("world"));
        assert_eq!(r.starts_with_at("world", 6), Ok(true));
        assert_eq!(r.starts_with_at("world!", 6), Ok(false));
        assert_eq!(r.starts_with_at("", 11), Ok(true));
        assert_eq!(r.starts_with_at("x", 12), Err(RopeError::IndexOutOfBounds { index: 12, len: 11 }));

        assert!(r.ends_with("world"));
        assert!(!r.ends_with("hello"));
        assert_eq!(r.ends_with_at("hello", 6), Ok(true));
        assert_eq!(r.ends_with_at("hello", 7), Ok(false));
        assert_eq!(r.ends_with_at("big hello", 6), Ok(false));
        assert_eq!(r.ends_with_at("", 11), Ok(true));
        assert!(r.ends_with_at("x", 12).is_err());
    }

    #[test]
    fn index_of_char_bounds() {
        let r = Rope::from("abcabc");
        assert_eq!(r.index_of_char('c'), Some(2));
        assert_eq!(r.index_of_char_from('a', 1), Ok(Some(3)));
        assert_eq!(r.index_of_char_from('a', 6), Ok(None));
        assert_eq!(r.index_of_char_from('a', 7), Err(RopeError::IndexOutOfBounds { index: 7, len: 6 }));
    }

    #[test]
    fn index_of_substrings() {
        let r = Rope::from("CCCCCCPIFPCFFP");
        assert_eq!(r.index_of("IFPCFFP"), Some(7));
        assert_eq!(r.index_of(""), None);
        assert_eq!(r.index_of("P"), Some(6));
        assert_eq!(Rope::from("zbbzzz").index_of_from("ab", 1), Ok(None));
        assert!(r.index_of_from("P", 15).is_err());
    }

    #[test]
    fn append_variants() {
        let r = Rope::from("abc");
        assert_eq!(r.append_char('d').unwrap(), "abcd");
        assert_eq!(r.append(&Rope::from("def")).unwrap(), "abcdef");
        assert_eq!(r.append_str_range("xツyz", 1..3).unwrap(), "abcツy");
        assert_eq!(r.append_str_range("xyz", 0..0).unwrap(), "abc");
        assert_eq!(
            r.append_str_range("xyz", 2..4),
            Err(RopeError::InvalidRange { start: 2, end: 4, len: 3 })
        );
    }

    #[test]
    fn equality_ignores_shape() {
        let flat = Rope::from("alpha");
        let joined = Rope::from("al").append_str("pha").unwrap();
        assert_eq!(flat, joined);
        assert_eq!(hash_of(&flat), hash_of(&joined));

        let long = Rope::from("the quick brown fox jumps over");
        let pieces = Rope::from("the quick brown ")
            .append(&Rope::from("fox jumps over"))
            .unwrap();
        assert_eq!(pieces.kind(), NodeKind::Concat);
        assert_eq!(long, pieces);
        assert_eq!(hash_of(&long), hash_of(&pieces));

        assert_ne!(Rope::from("alpha"), Rope::from("alphb"));
        assert_ne!(Rope::from("alpha"), Rope::from("alph"));
    }

    #[test]
    fn fingerprint_only_reads_the_ends() {
        assert_eq!(Rope::from("abc").fingerprint(), 96354);
        // The well known 31-multiplier hash of "hello".
        assert_eq!(Rope::from("hello").fingerprint(), 99162322);
        assert_eq!(Rope::from("abcdeXXXXz").fingerprint(), Rope::from("abcdeYz").fingerprint());
    }

    #[test]
    fn ordering() {
        assert!(Rope::from("abc") < Rope::from("abd"));
        assert!(Rope::from("ab") < Rope::from("abc"));
        assert_eq!(Rope::from("abc").cmp(&Rope::from("abc")), Ordering::Equal);
        assert!(Rope::from("b") > Rope::from("abc"));
        assert_eq!(Rope::from("abc").partial_cmp("abd"), Some(Ordering::Less));
    }

    #[test]
    fn debug_and_display() {
        let r = Rope::from("hi \"there\"");
        assert_eq!(format!("{}", r), "hi \"there\"");
        assert_eq!(format!("{:?}", r), "Rope(\"hi \\\"there\\\"\")");
    }

    #[test]
    fn write_range_checks_bounds() {
        let r = Rope::from("0123456789abcdefghij").append_str("ABCDEFGHIJ").unwrap();
        let mut out = String::new();
        r.write_range(&mut out, 15, 10).unwrap();
        assert_eq!(out, "fghijABCDE");
        assert_eq!(
            r.write_range(&mut String::new(), 25, 10),
            Err(RopeError::InvalidRange { start: 25, end: 35, len: 30 })
        );
    }

    #[test]
    fn write_io_matches_display() {
        let r = Rope::from("plain ascii text, ")
            .append_str("then ツ some wide chars")
            .unwrap()
            .reverse();
        let mut out: Vec<u8> = Vec::new();
        r.write_io(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), r.to_string());
    }

    #[test]
    fn write_io_streams_long_leaves() {
        struct Sink {
            bytes: Vec<u8>,
            largest: usize,
        }
        impl io::Write for Sink {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.largest = self.largest.max(buf.len());
                self.bytes.extend_from_slice(buf);
                Ok(buf.len())
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let r = Rope::from("ツ").pad_start(100_000, '-').unwrap().pad_end(150_000, 'ツ').unwrap();
        let mut sink = Sink { bytes: Vec::new(), largest: 0 };
        r.write_io(&mut sink).unwrap();
        assert!(sink.largest <= WRITE_CHUNK + 3);
        assert_eq!(sink.bytes.len(), 99_999 + 50_001 * 3);
        assert_eq!(String::from_utf8(sink.bytes).unwrap(), r.to_string());
    }

    #[test]
    fn constructors() {
        let shared: Arc<[char]> = Arc::from(vec!['a', 'ツ']);
        assert_eq!(Rope::from_shared(shared), "aツ");
        assert_eq!(Rope::from_shared_str(Arc::from("shared")), "shared");
        assert_eq!(Rope::from_shared_str(Arc::from("ツツ")).len(), 2);
        assert_eq!(Rope::from_chars(&['x', 'y']), "xy");
        assert_eq!(Rope::from('z'), "z");
        assert_eq!(Rope::from(String::from("owned")), "owned");
        assert_eq!("ab".chars().chain("cd".chars()).collect::<Rope>(), "abcd");
        assert_eq!(Rope::repeat('-', 3).unwrap(), "---");
        assert!(Rope::repeat('-', MAX_LEN + 1).is_err());
    }

    #[test]
    fn fallible_constructors() {
        assert_eq!(Rope::try_from_str("aツ").unwrap(), "aツ");
        assert_eq!(Rope::try_from_string(String::from("owned")).unwrap(), "owned");
        assert_eq!(Rope::try_from_chars(&['x', 'ツ']).unwrap(), "xツ");
        assert_eq!(Rope::try_from_shared(Arc::from(vec!['a'; 20])).unwrap().len(), 20);
        assert_eq!(Rope::try_from_shared_str(Arc::from("shared")).unwrap(), "shared");

        assert_eq!(check_len(MAX_LEN), Ok(()));
        assert_eq!(check_len(MAX_LEN + 1), Err(RopeError::LengthOverflow { left: 0, right: MAX_LEN + 1 }));
        assert_eq!(check_str_len("short"), Ok(()));
    }

    #[test]
    fn rebalance_preserves_content() {
        let mut r = Rope::new();
        for i in 0..200 {
            r = r.append_str(&format!("line number {i}\n")).unwrap();
        }
        r.check();
        let balanced = r.rebalance();
        balanced.check();
        assert_eq!(balanced, r);
        assert!(balanced.depth() <= 8);
    }
}
