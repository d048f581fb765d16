use std::iter::FusedIterator;
use crate::node::Node;
use crate::Rope;

/// An iterator over the leaf-level nodes of a rope, left to right.
///
/// Each item is a leaf, a substring view or a reversed view. Concatenation nodes are descended
/// into, never yielded. Empty leaves are skipped.
pub struct Leaves<'a> {
    stack: Vec<&'a Rope>,
}

impl<'a> Leaves<'a> {
    pub(crate) fn new(rope: &'a Rope) -> Self {
        let mut stack = Vec::with_capacity(rope.depth() + 1);
        stack.push(rope);
        Leaves { stack }
    }
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a Rope;

    fn next(&mut self) -> Option<&'a Rope> {
        while let Some(rope) = self.stack.pop() {
            match &*rope.node {
                Node::Concat { left, right, .. } => {
                    self.stack.push(right);
                    self.stack.push(left);
                }
                _ if rope.is_empty() => {}
                _ => return Some(rope),
            }
        }
        None
    }
}

impl<'a> FusedIterator for Leaves<'a> {}

/// A forward iterator over the characters of a rope. Created by [`Rope::chars`] and
/// [`Rope::chars_at`].
///
/// Stepping to the next character is O(1) amortized. The iterator keeps a stack of the right
/// siblings it skipped on the way down, so moving on to the next leaf never walks back up from the
/// root.
#[derive(Clone)]
pub struct Chars<'a> {
    pending: Vec<&'a Rope>,
    /// The leaf-level node holding the next char.
    current: &'a Rope,
    /// Offset of the next char within `current`.
    current_pos: usize,
    /// Offset of the next char within the whole rope.
    pos: usize,
    len: usize,
}

impl<'a> Chars<'a> {
    /// Start iterating at char `start`. Bounds are checked by the caller.
    pub(crate) fn new(rope: &'a Rope, start: usize) -> Self {
        let len = rope.len();
        debug_assert!(start <= len);

        let mut iter = Chars {
            pending: Vec::with_capacity(rope.depth()),
            current: rope,
            current_pos: 0,
            pos: start,
            len,
        };

        if start < len {
            iter.descend(rope, start);
        } else if len > 0 {
            // Park just past the last char, so the iterator can still move backwards.
            iter.descend(rope, len - 1);
            iter.current_pos += 1;
        }
        iter
    }

    fn descend(&mut self, mut rope: &'a Rope, mut offset: usize) {
        while let Node::Concat { left, right, .. } = &*rope.node {
            let left_len = left.len();
            if offset < left_len {
                self.pending.push(right);
                rope = left;
            } else {
                offset -= left_len;
                rope = right;
            }
        }
        self.current = rope;
        self.current_pos = offset;
    }

    /// The index of the char which the next call to `next()` will return.
    #[inline]
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Skip `n` chars without visiting them. Whole subtrees which lie before the target are
    /// skipped in one step. Returns false (leaving the iterator exhausted) if there aren't `n`
    /// chars left.
    pub(crate) fn skip_forward(&mut self, mut n: usize) -> bool {
        let remaining = self.len - self.pos;
        if n > remaining {
            self.skip_forward(remaining);
            return false;
        }

        self.pos += n;
        let avail = self.current.len() - self.current_pos;
        if n < avail || (n == avail && self.pending.is_empty()) {
            self.current_pos += n;
            return true;
        }

        n -= avail;
        while let Some(next) = self.pending.pop() {
            let next_len = next.len();
            if n < next_len {
                self.descend(next, n);
                return true;
            }
            if n == next_len && self.pending.is_empty() {
                // Landed on the very end. Park after the last char.
                self.descend(next, n - 1);
                self.current_pos += 1;
                return true;
            }
            n -= next_len;
        }

        debug_assert_eq!(n, 0);
        true
    }

    /// Can the iterator step back `n` chars without leaving the current leaf?
    #[inline]
    pub(crate) fn can_move_back(&self, n: usize) -> bool {
        n <= self.current_pos
    }

    pub(crate) fn move_back(&mut self, n: usize) {
        debug_assert!(self.can_move_back(n));
        self.current_pos -= n;
        self.pos -= n;
    }
}

impl<'a> Iterator for Chars<'a> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        loop {
            if self.current_pos < self.current.len() {
                let c = self.current.node.char_at(self.current_pos);
                self.current_pos += 1;
                self.pos += 1;
                return Some(c);
            }

            let next = self.pending.pop()?;
            self.descend(next, 0);
        }
    }

    fn nth(&mut self, n: usize) -> Option<char> {
        if self.skip_forward(n) { self.next() } else { None }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.pos;
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for Chars<'a> {}
impl<'a> FusedIterator for Chars<'a> {}

/// A backward iterator over the characters of a rope, last char first. Created by
/// [`Rope::chars_rev`] and [`Rope::chars_rev_from`].
#[derive(Clone)]
pub struct RevChars<'a> {
    pending: Vec<&'a Rope>,
    current: &'a Rope,
    /// Number of chars in `current` before the cursor.
    current_pos: usize,
    /// Number of chars in the rope before the cursor.
    pos: usize,
}

impl<'a> RevChars<'a> {
    /// Iterate backwards from just before char `end`. Bounds are checked by the caller.
    pub(crate) fn new(rope: &'a Rope, end: usize) -> Self {
        debug_assert!(end <= rope.len());
        let mut iter = RevChars {
            pending: Vec::with_capacity(rope.depth()),
            current: rope,
            current_pos: 0,
            pos: end,
        };
        if end > 0 {
            iter.descend(rope, end);
        }
        iter
    }

    /// `end` must be at least 1.
    fn descend(&mut self, mut rope: &'a Rope, mut end: usize) {
        while let Node::Concat { left, right, .. } = &*rope.node {
            let left_len = left.len();
            if end > left_len {
                self.pending.push(left);
                end -= left_len;
                rope = right;
            } else {
                rope = left;
            }
        }
        self.current = rope;
        self.current_pos = end;
    }

    /// The number of chars left to yield. The next char returned (if any) is at `offset() - 1`.
    #[inline]
    pub fn offset(&self) -> usize {
        self.pos
    }
}

impl<'a> Iterator for RevChars<'a> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        loop {
            if self.current_pos > 0 {
                self.current_pos -= 1;
                self.pos -= 1;
                return Some(self.current.node.char_at(self.current_pos));
            }

            let next = self.pending.pop()?;
            self.descend(next, next.len());
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.pos, Some(self.pos))
    }
}

impl<'a> ExactSizeIterator for RevChars<'a> {}
impl<'a> FusedIterator for RevChars<'a> {}
