//! Finding characters and substrings inside a rope.

use crate::node::Node;
use crate::Rope;

/// Find the first occurrence of `ch` at or after `from`.
///
/// This descends straight to the leaf holding `from`, then scans leaf by leaf. Right siblings
/// passed on the way down are kept on a stack along with their offsets.
pub(crate) fn index_of_char(rope: &Rope, ch: char, from: usize) -> Option<usize> {
    if from >= rope.len() { return None; }

    let mut pending: Vec<(&Rope, usize)> = Vec::with_capacity(rope.depth() + 1);
    pending.push((rope, 0));
    let mut target = from;

    while let Some((mut node, mut offset)) = pending.pop() {
        while let Node::Concat { left, right, .. } = &*node.node {
            let mid = offset + left.len();
            if target < mid {
                pending.push((right, mid));
                node = left;
            } else {
                offset = mid;
                node = right;
            }
        }

        if let Some(pos) = scan_leaf(node, ch, target - offset) {
            return Some(offset + pos);
        }
        target = offset + node.len();
    }
    None
}

/// Search one leaf-level node for `ch`, starting at `start`.
fn scan_leaf(node: &Rope, ch: char, start: usize) -> Option<usize> {
    let len = node.len();
    match &*node.node {
        Node::Leaf(leaf) => leaf.position_from(ch, start..len),
        Node::Substring { leaf, offset: base, .. } => {
            leaf.position_from(ch, base + start..base + len).map(|p| p - base)
        }
        _ => (start..len).find(|&i| node.node.char_at(i) == ch),
    }
}

/// Find the first occurrence of `needle` starting at or after `from`, using Boyer-Moore-Horspool.
///
/// Characters are bucketed into the 256 entry bad-character table by their low 8 bits. Chars
/// which collide only make the skips more conservative. An empty needle never matches.
pub(crate) fn index_of(rope: &Rope, needle: &[char], from: usize) -> Option<usize> {
    let n = needle.len();
    match n {
        0 => return None,
        1 => return index_of_char(rope, needle[0], from),
        _ => {}
    }

    let len = rope.len();
    if from > len || len - from < n { return None; }

    let mut shifts = [n; 256];
    for (j, &c) in needle[..n - 1].iter().enumerate() {
        let slot = bucket(c);
        shifts[slot] = shifts[slot].min(n - 1 - j);
    }

    let mut seq = rope.sequential();
    let mut j = from + n - 1;
    while j < len {
        let mut x = j;
        let mut k = n - 1;
        while seq.char_at(x)? == needle[k] {
            if k == 0 { return Some(x); }
            k -= 1;
            x -= 1;
        }
        j += shifts[bucket(seq.char_at(j)?)];
    }
    None
}

#[inline]
fn bucket(c: char) -> usize {
    (c as u32 & 0xFF) as usize
}
