use std::fmt;
use std::ops::Range;
use std::sync::Arc;

/// Slices of a leaf shorter than this are copied into a fresh leaf instead of becoming a
/// substring view.
pub const SUBSTRING_COPY_THRESHOLD: usize = 16;

/// The character storage at the bottom of a rope.
///
/// Cloning a leaf is cheap: the storage itself is reference counted and shared.
#[derive(Clone)]
pub(crate) enum Leaf {
    /// Text made entirely of ASCII, so byte offsets and char offsets agree.
    Ascii(Arc<str>),
    /// Arbitrary chars, one `char` per slot.
    Chars(Arc<[char]>),
    /// The same char repeated `len` times. Used for padding; never allocates.
    Repeat { ch: char, len: usize },
}

impl Leaf {
    pub(crate) fn empty() -> Self {
        Leaf::Repeat { ch: ' ', len: 0 }
    }

    /// Build a leaf from a string, picking the most compact storage for it.
    pub(crate) fn from_str(s: &str) -> Self {
        if s.is_ascii() {
            Leaf::Ascii(Arc::from(s))
        } else {
            Leaf::Chars(s.chars().collect())
        }
    }

    pub(crate) fn from_string(s: String) -> Self {
        if s.is_ascii() {
            Leaf::Ascii(Arc::from(s))
        } else {
            Leaf::Chars(s.chars().collect())
        }
    }

    /// Build a leaf which owns a private copy of `chars`.
    pub(crate) fn from_chars(chars: &[char]) -> Self {
        if chars.iter().all(char::is_ascii) {
            Leaf::Ascii(Arc::from(chars.iter().collect::<String>()))
        } else {
            Leaf::Chars(Arc::from(chars))
        }
    }

    pub(crate) fn from_char_vec(chars: Vec<char>) -> Self {
        if chars.iter().all(char::is_ascii) {
            Leaf::Ascii(Arc::from(chars.into_iter().collect::<String>()))
        } else {
            Leaf::Chars(Arc::from(chars))
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        match self {
            Leaf::Ascii(s) => s.len(),
            Leaf::Chars(c) => c.len(),
            Leaf::Repeat { len, .. } => *len,
        }
    }

    /// Panics if `index` is out of range. Callers check bounds at the rope level.
    #[inline]
    pub(crate) fn char_at(&self, index: usize) -> char {
        match self {
            Leaf::Ascii(s) => s.as_bytes()[index] as char,
            Leaf::Chars(c) => c[index],
            Leaf::Repeat { ch, len } => {
                debug_assert!(index < *len);
                *ch
            }
        }
    }

    /// Copy `range` into a new leaf with its own storage.
    pub(crate) fn copy_range(&self, range: Range<usize>) -> Leaf {
        match self {
            Leaf::Ascii(s) => Leaf::Ascii(Arc::from(&s[range])),
            Leaf::Chars(c) => Leaf::from_chars(&c[range]),
            Leaf::Repeat { ch, .. } => Leaf::Repeat { ch: *ch, len: range.len() },
        }
    }

    /// The ASCII text in `range`, if this leaf stores ASCII.
    #[inline]
    pub(crate) fn ascii_str(&self, range: Range<usize>) -> Option<&str> {
        match self {
            Leaf::Ascii(s) => Some(&s[range]),
            _ => None,
        }
    }

    pub(crate) fn write_range<W: fmt::Write + ?Sized>(&self, out: &mut W, range: Range<usize>) -> fmt::Result {
        match self {
            Leaf::Ascii(s) => out.write_str(&s[range]),
            Leaf::Chars(c) => {
                for ch in &c[range] {
                    out.write_char(*ch)?;
                }
                Ok(())
            }
            Leaf::Repeat { ch, .. } => {
                for _ in range {
                    out.write_char(*ch)?;
                }
                Ok(())
            }
        }
    }

    pub(crate) fn position_from(&self, ch: char, range: Range<usize>) -> Option<usize> {
        let start = range.start;
        let found = match self {
            Leaf::Ascii(s) => {
                if !ch.is_ascii() { return None; }
                s.as_bytes()[range].iter().position(|b| *b == ch as u8)
            }
            Leaf::Chars(c) => c[range].iter().position(|c| *c == ch),
            Leaf::Repeat { ch: r, .. } => {
                if *r == ch && !range.is_empty() { Some(0) } else { None }
            }
        };
        found.map(|p| p + start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(leaf: &Leaf) -> String {
        let mut s = String::new();
        leaf.write_range(&mut s, 0..leaf.len()).unwrap();
        s
    }

    #[test]
    fn picks_ascii_storage_when_possible() {
        assert!(matches!(Leaf::from_str("hello"), Leaf::Ascii(_)));
        assert!(matches!(Leaf::from_str("héllo"), Leaf::Chars(_)));
        assert!(matches!(Leaf::from_chars(&['a', 'b']), Leaf::Ascii(_)));
        assert!(matches!(Leaf::from_char_vec(vec!['ツ']), Leaf::Chars(_)));
    }

    #[test]
    fn indexes_by_char() {
        let leaf = Leaf::from_str("aツb");
        assert_eq!(leaf.len(), 3);
        assert_eq!(leaf.char_at(1), 'ツ');
        assert_eq!(leaf.char_at(2), 'b');

        let pad = Leaf::Repeat { ch: '~', len: 4 };
        assert_eq!(pad.char_at(3), '~');
        assert_eq!(collect(&pad), "~~~~");
    }

    #[test]
    fn copy_range_is_independent() {
        let leaf = Leaf::from_str("0123456789");
        let copy = leaf.copy_range(2..5);
        assert_eq!(collect(&copy), "234");
        assert_eq!(collect(&Leaf::Repeat { ch: 'x', len: 10 }.copy_range(3..5)), "xx");
        assert_eq!(collect(&Leaf::from_str("aツbc").copy_range(1..3)), "ツb");
    }

    #[test]
    fn position_from() {
        let leaf = Leaf::from_str("abcabc");
        assert_eq!(leaf.position_from('b', 0..6), Some(1));
        assert_eq!(leaf.position_from('b', 2..6), Some(4));
        assert_eq!(leaf.position_from('ツ', 0..6), None);
        assert_eq!(Leaf::from_str("aツ").position_from('ツ', 0..2), Some(1));
        assert_eq!(Leaf::Repeat { ch: 'z', len: 3 }.position_from('z', 2..3), Some(2));
        assert_eq!(Leaf::Repeat { ch: 'z', len: 3 }.position_from('z', 3..3), None);
    }
}
