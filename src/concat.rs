//! Joining ropes, and keeping the trees that result from joining shallow.

use tracing::{debug, trace};
use crate::leaf::Leaf;
use crate::node::Node;
use crate::{Rope, RopeError, MAX_LEN};

/// Concatenations shorter than this are flattened into a single leaf rather than linked.
pub const COMBINE_THRESHOLD: usize = 17;

/// Trees deeper than this are rebalanced as soon as a concatenation produces one.
pub const MAX_DEPTH: usize = 96;

/// The smart concatenation constructor. Every rope-building operation funnels through here.
pub(crate) fn concatenate(left: &Rope, right: &Rope) -> Result<Rope, RopeError> {
    if left.is_empty() { return Ok(right.clone()); }
    if right.is_empty() { return Ok(left.clone()); }

    let (left_len, right_len) = (left.len(), right.len());
    if left_len > MAX_LEN - right_len {
        debug!(left_len, right_len, "rejecting concatenation past the maximum rope length");
        return Err(RopeError::LengthOverflow { left: left_len, right: right_len });
    }

    Ok(join(left.clone(), right.clone()))
}

/// Same as [`concatenate`], for callers which already know the result fits in [`MAX_LEN`]
/// (because it's made of pieces of a single existing rope).
pub(crate) fn join(left: Rope, right: Rope) -> Rope {
    if left.is_empty() { return right; }
    if right.is_empty() { return left; }
    debug_assert!(left.len() + right.len() <= MAX_LEN);

    if left.len() + right.len() < COMBINE_THRESHOLD {
        return flatten(&left, &right);
    }

    // When only one side is a concatenation, try to fold the other side into the child it touches.
    // This keeps long runs of small appends (or prepends) from growing a chain of tiny leaves.
    match (&*left.node, &*right.node) {
        (Node::Concat { .. }, Node::Concat { .. }) => {}
        (_, Node::Concat { left: near, right: far, .. }) if left.len() + near.len() < COMBINE_THRESHOLD => {
            return maybe_rebalance(Rope::concat_node(flatten(&left, near), far.clone()));
        }
        (Node::Concat { left: far, right: near, .. }, _) if near.len() + right.len() < COMBINE_THRESHOLD => {
            return maybe_rebalance(Rope::concat_node(far.clone(), flatten(near, &right)));
        }
        _ => {}
    }

    maybe_rebalance(Rope::concat_node(left, right))
}

/// Copy two short ropes into one new leaf.
fn flatten(left: &Rope, right: &Rope) -> Rope {
    let mut buf = Vec::with_capacity(left.len() + right.len());
    buf.extend(left.chars());
    buf.extend(right.chars());
    Rope::from_leaf(Leaf::from_char_vec(buf))
}

fn maybe_rebalance(rope: Rope) -> Rope {
    if rope.depth() > MAX_DEPTH {
        rebalance(&rope)
    } else {
        rope
    }
}

/// Rebuild a tree as a balanced binary tree over the same leaves, in the same order.
///
/// Leaves (and other non-concatenation nodes) are shared with the original tree, not copied. This
/// walks the tree with an explicit stack, so very deep inputs can't overflow the call stack.
pub(crate) fn rebalance(root: &Rope) -> Rope {
    let mut leaves: Vec<Rope> = Vec::new();
    let mut stack: Vec<&Rope> = vec![root];

    while let Some(rope) = stack.pop() {
        match &*rope.node {
            Node::Concat { left, right, .. } => {
                stack.push(right);
                stack.push(left);
            }
            _ => leaves.push(rope.clone()),
        }
    }

    trace!(depth = root.depth(), leaves = leaves.len(), "rebalancing rope");
    merge(&leaves)
}

fn merge(leaves: &[Rope]) -> Rope {
    match leaves {
        [] => Rope::new(),
        [only] => only.clone(),
        [left, right] => Rope::concat_node(left.clone(), right.clone()),
        _ => {
            let mid = leaves.len() / 2;
            Rope::concat_node(merge(&leaves[..mid]), merge(&leaves[mid..]))
        }
    }
}
