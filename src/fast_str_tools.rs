//! Utility functions for utf8 string slices.
//!
//! Ropes index by `char`, but text arrives (and regex engines report matches) in utf8 bytes. These
//! helpers convert between the two. They defer to str_indices, with naive fallbacks under miri.

/// Converts from char-index to byte-index in a string slice.
///
/// Any past-the-end index will return the one-past-the-end byte index.
///
/// Runs in O(N) time.
#[inline]
pub(crate) fn char_to_byte_idx(text: &str, char_idx: usize) -> usize {
    if cfg!(not(miri)) {
        str_indices::chars::to_byte_idx(text, char_idx)
    } else {
        text.char_indices().nth(char_idx).map_or(text.len(), |(i, _)| i)
    }
}

/// Converts from byte-index to char-index in a string slice.
///
/// If the byte is in the middle of a multi-byte char, returns the index of the char that the byte
/// belongs to. Any past-the-end index will return the one-past-the-end char index.
#[inline]
#[allow(unused)]
pub(crate) fn byte_to_char_idx(text: &str, byte_idx: usize) -> usize {
    if cfg!(not(miri)) {
        str_indices::chars::from_byte_idx(text, byte_idx)
    } else {
        let count = count_chars_naive(&text.as_bytes()[0..(byte_idx + 1).min(text.len())]);
        if byte_idx < text.len() { count - 1 } else { count }
    }
}

/// Counts the chars in a string slice, using SIMD where str_indices can.
#[inline]
pub(crate) fn count_chars(text: &str) -> usize {
    if text.len() <= 1 { text.len() }
    else if cfg!(not(miri)) {
        str_indices::chars::count(text)
    } else {
        count_chars_naive(text.as_bytes())
    }
}

/// Counts the bytes which aren't utf8 continuation bytes.
#[inline]
fn count_chars_naive(text: &[u8]) -> usize {
    text.iter().filter(|b| (**b & 0xC0) != 0x80).count()
}

/// Whitespace (or control characters) which trimming strips from the ends of a rope.
#[inline]
pub(crate) fn is_trimmable(c: char) -> bool {
    c <= '\u{20}' || c.is_whitespace()
}
