//! The node variants a rope is built from, and the primitive operations every variant provides.
//! Everything else (editing, trimming, searching, comparing) is layered on top of these in
//! rope.rs.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use crate::concat::join;
use crate::leaf::{Leaf, SUBSTRING_COPY_THRESHOLD};
use crate::Rope;

/// The shape of a single rope node. See [`Rope::kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Characters stored directly.
    Leaf,
    /// A lazy window over part of a leaf.
    Substring,
    /// A lazy back-to-front view of a leaf or substring.
    Reverse,
    /// Two child ropes joined end to end.
    Concat,
}

// Nodes are never modified after they're built. All sharing happens through the Arc in Rope.
pub(crate) enum Node {
    Leaf(Leaf),

    /// The base is a leaf by construction. Slicing a composite rope decomposes it instead.
    Substring { leaf: Leaf, offset: usize, len: usize },

    /// Reversing a concatenation reverses its children instead, so the base here is always a leaf
    /// or a substring and indexing into it is O(1).
    Reverse(Rope),

    Concat { left: Rope, right: Rope, len: usize, depth: usize },
}

impl Node {
    #[inline]
    pub(crate) fn len(&self) -> usize {
        match self {
            Node::Leaf(leaf) => leaf.len(),
            Node::Substring { len, .. } => *len,
            Node::Reverse(base) => base.len(),
            Node::Concat { len, .. } => *len,
        }
    }

    #[inline]
    pub(crate) fn depth(&self) -> usize {
        match self {
            Node::Leaf(_) | Node::Substring { .. } => 0,
            Node::Reverse(base) => base.depth(),
            Node::Concat { depth, .. } => *depth,
        }
    }

    pub(crate) fn kind(&self) -> NodeKind {
        match self {
            Node::Leaf(_) => NodeKind::Leaf,
            Node::Substring { .. } => NodeKind::Substring,
            Node::Reverse(_) => NodeKind::Reverse,
            Node::Concat { .. } => NodeKind::Concat,
        }
    }

    /// Walks down to the character at `index`. O(1) for every variant except concatenations,
    /// which cost O(depth). The index must be in range.
    pub(crate) fn char_at(&self, mut index: usize) -> char {
        let mut node = self;
        loop {
            match node {
                Node::Leaf(leaf) => return leaf.char_at(index),
                Node::Substring { leaf, offset, .. } => return leaf.char_at(offset + index),
                Node::Reverse(base) => {
                    index = base.len() - 1 - index;
                    node = &base.node;
                }
                Node::Concat { left, right, .. } => {
                    let left_len = left.len();
                    if index < left_len {
                        node = &left.node;
                    } else {
                        index -= left_len;
                        node = &right.node;
                    }
                }
            }
        }
    }

    /// Write `len` chars starting at `offset`. Concatenations split the range at their boundary.
    pub(crate) fn write_range<W: fmt::Write + ?Sized>(&self, out: &mut W, offset: usize, len: usize) -> fmt::Result {
        if len == 0 { return Ok(()); }
        debug_assert!(offset + len <= self.len());

        match self {
            Node::Leaf(leaf) => leaf.write_range(out, offset..offset + len),
            Node::Substring { leaf, offset: base, .. } => {
                leaf.write_range(out, base + offset..base + offset + len)
            }
            Node::Reverse(base) => {
                let base_len = base.len();
                for i in offset..offset + len {
                    out.write_char(base.node.char_at(base_len - 1 - i))?;
                }
                Ok(())
            }
            Node::Concat { left, right, .. } => {
                let left_len = left.len();
                if offset + len <= left_len {
                    left.node.write_range(out, offset, len)
                } else if offset >= left_len {
                    right.node.write_range(out, offset - left_len, len)
                } else {
                    let write_left = left_len - offset;
                    left.node.write_range(out, offset, write_left)?;
                    right.node.write_range(out, 0, len - write_left)
                }
            }
        }
    }
}

impl Rope {
    pub(crate) fn from_leaf(leaf: Leaf) -> Rope {
        Rope { node: Arc::new(Node::Leaf(leaf)) }
    }

    /// Link two ropes under a new concatenation node without any of the smart constructor's
    /// flattening or rebalancing. Used directly only by rebalancing.
    pub(crate) fn concat_node(left: Rope, right: Rope) -> Rope {
        let len = left.len() + right.len();
        let depth = 1 + left.depth().max(right.depth());
        Rope { node: Arc::new(Node::Concat { left, right, len, depth }) }
    }

    /// The primitive slice operation. Bounds must already be checked.
    pub(crate) fn slice_unchecked(&self, start: usize, end: usize) -> Rope {
        debug_assert!(start <= end && end <= self.len());
        if start == 0 && end == self.len() { return self.clone(); }
        if start == end { return Rope::new(); }

        match &*self.node {
            Node::Leaf(leaf) => {
                if end - start < SUBSTRING_COPY_THRESHOLD || matches!(leaf, Leaf::Repeat { .. }) {
                    Rope::from_leaf(leaf.copy_range(start..end))
                } else {
                    Rope {
                        node: Arc::new(Node::Substring { leaf: leaf.clone(), offset: start, len: end - start })
                    }
                }
            }
            // Views never wrap other views. Compose the offsets over the same leaf.
            Node::Substring { leaf, offset, .. } => Rope {
                node: Arc::new(Node::Substring { leaf: leaf.clone(), offset: offset + start, len: end - start })
            },
            Node::Reverse(base) => {
                let len = base.len();
                base.slice_unchecked(len - end, len - start).reverse()
            }
            Node::Concat { left, right, .. } => {
                let left_len = left.len();
                if end <= left_len {
                    left.slice_unchecked(start, end)
                } else if start >= left_len {
                    right.slice_unchecked(start - left_len, end - left_len)
                } else {
                    join(left.slice_unchecked(start, left_len), right.slice_unchecked(0, end - left_len))
                }
            }
        }
    }

    /// Returns a rope with the characters of this rope in reverse order.
    ///
    /// Leaves and substrings are wrapped in a lazy reversed view. Reversing a reversed view hands
    /// back the original rope, and reversing a concatenation reverses (and swaps) its children.
    pub fn reverse(&self) -> Rope {
        self.reverse_shared(&mut HashMap::new())
    }

    /// Subtrees shared between several parents are only reversed once. `done` is keyed by node
    /// address, which stays valid because `self` borrows the whole tree for the duration.
    fn reverse_shared(&self, done: &mut HashMap<*const Node, Rope>) -> Rope {
        match &*self.node {
            Node::Reverse(base) => base.clone(),
            Node::Concat { left, right, .. } => {
                let key = Arc::as_ptr(&self.node);
                if let Some(r) = done.get(&key) {
                    return r.clone();
                }
                let r = join(right.reverse_shared(done), left.reverse_shared(done));
                done.insert(key, r.clone());
                r
            }
            Node::Leaf(Leaf::Repeat { .. }) => self.clone(),
            _ if self.len() <= 1 => self.clone(),
            _ => Rope { node: Arc::new(Node::Reverse(self.clone())) },
        }
    }
}
