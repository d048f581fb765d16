use crate::iter::Chars;
use crate::Rope;

/// A random access cursor over a rope, tuned for access patterns which mostly move forward or
/// stay close to the last position read.
///
/// Reading the char after the previous read is O(1). Jumping forward skips whole subtrees, and
/// stepping a short way back within the current leaf is also O(1). Anything else falls back to a
/// regular O(log n) lookup from the root.
///
/// Text search uses this internally. Create one with [`Rope::sequential`].
pub struct SequentialAccess<'a> {
    rope: &'a Rope,
    iter: Chars<'a>,
}

impl<'a> SequentialAccess<'a> {
    pub fn new(rope: &'a Rope) -> Self {
        SequentialAccess { rope, iter: Chars::new(rope, 0) }
    }

    pub fn len(&self) -> usize {
        self.rope.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.is_empty()
    }

    pub fn rope(&self) -> &'a Rope {
        self.rope
    }

    /// Returns the char at `index`, or `None` if the index is past the end of the rope.
    pub fn char_at(&mut self, index: usize) -> Option<char> {
        if index >= self.rope.len() { return None; }

        let next = self.iter.offset();
        if index >= next {
            if !self.iter.skip_forward(index - next) { return None; }
            self.iter.next()
        } else if self.iter.can_move_back(next - index) {
            self.iter.move_back(next - index);
            self.iter.next()
        } else {
            Some(self.rope.node.char_at(index))
        }
    }
}
