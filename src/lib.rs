//! # Catrope
//!
//! An immutable rope (fancy string) built out of concatenation trees, in the style described in
//! "Ropes: an Alternative to Strings" (Boehm, Atkinson & Plass).
//!
//! A [`Rope`] never changes once it has been built. Every edit (append, insert, delete, pad, trim)
//! returns a new rope which shares almost all of its structure with the rope it was derived from.
//! Only the handful of interior nodes along the edit path are allocated, so edits on very large
//! documents run in O(log n) time or better.
//!
//! Random access to a single character is O(log n). Sequential access through [`Rope::chars`] or a
//! [`SequentialAccess`] cursor is amortized O(1) per character.
//!
//! ```
//! use catrope::Rope;
//!
//! let rope = Rope::from("hello world");
//! let rope = rope.insert_str(5, ",").unwrap();
//! let rope = rope.delete(7..12).unwrap().append_str("there").unwrap();
//! assert_eq!(rope, "hello, there");
//! assert_eq!(rope.index_of("there"), Some(7));
//! ```
//!
//! Ropes are `Send + Sync`. Any number of threads can read (iterate, compare, search) the same rope
//! concurrently.

mod fast_str_tools;
mod leaf;
mod node;
mod concat;
mod iter;
mod sequential;
mod search;
mod rope;
pub mod debug;

#[cfg(feature = "regex")]
mod matcher;
#[cfg(feature = "serde")]
mod serialize;

pub use crate::concat::{COMBINE_THRESHOLD, MAX_DEPTH};
pub use crate::iter::{Chars, Leaves, RevChars};
pub use crate::leaf::SUBSTRING_COPY_THRESHOLD;
pub use crate::node::NodeKind;
pub use crate::rope::{Rope, WRITE_CHUNK};
pub use crate::sequential::SequentialAccess;

#[cfg(feature = "regex")]
pub use crate::matcher::{RopeCursor, RopeMatcher};

/// The longest rope which can be represented, in characters.
pub const MAX_LEN: usize = i32::MAX as usize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RopeError {
    #[error("index {index} is out of bounds for a rope of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("range {start}..{end} is invalid for a rope of length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },

    /// The combined length would exceed [`MAX_LEN`].
    #[error("concatenating ropes of length {left} and {right} would overflow the maximum rope length")]
    LengthOverflow { left: usize, right: usize },

    #[error("invalid pattern: {0}")]
    InvalidPattern(String),

    /// The sink passed to [`Rope::write_range`] returned an error.
    #[error("error writing rope contents")]
    Write(#[from] std::fmt::Error),
}
