//! Tools for looking inside a rope's tree. Everything here only uses the public inspection methods
//! ([`Rope::kind`], [`Rope::children`], [`Rope::depth`]).

use std::fmt;
use crate::{NodeKind, Rope};

/// Node counts for a rope's tree. See [`stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RopeStats {
    pub len: usize,
    /// Leaves, substring views and reversed views.
    pub leaf_nodes: usize,
    pub concat_nodes: usize,
    pub depth: usize,
}

impl fmt::Display for RopeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rope(length={}, leaf nodes={}, non-leaf nodes={}, depth={})",
            self.len, self.leaf_nodes, self.concat_nodes, self.depth)
    }
}

pub fn stats(rope: &Rope) -> RopeStats {
    let mut leaf_nodes = 0;
    let mut concat_nodes = 0;

    let mut stack = vec![rope];
    while let Some(r) = stack.pop() {
        match r.children() {
            Some((left, right)) => {
                concat_nodes += 1;
                stack.push(right);
                stack.push(left);
            }
            None => leaf_nodes += 1,
        }
    }

    RopeStats { len: rope.len(), leaf_nodes, concat_nodes, depth: rope.depth() }
}

/// Print the tree structure of a rope, one node per line, indented by depth.
///
/// ```
/// let rope = catrope::Rope::from("0123456789").append_str("abcdefghij").unwrap();
/// let mut out = String::new();
/// catrope::debug::visualize(&rope, &mut out).unwrap();
/// assert_eq!(out, "concat[left]\n  \"0123456789\"\nconcat[right]\n  \"abcdefghij\"\n");
/// ```
pub fn visualize<W: fmt::Write + ?Sized>(rope: &Rope, out: &mut W) -> fmt::Result {
    visualize_at(rope, out, 0)
}

fn visualize_at<W: fmt::Write + ?Sized>(rope: &Rope, out: &mut W, indent: usize) -> fmt::Result {
    if let Some((left, right)) = rope.children() {
        writeln!(out, "{:indent$}concat[left]", "")?;
        visualize_at(left, out, indent + 2)?;
        writeln!(out, "{:indent$}concat[right]", "")?;
        return visualize_at(right, out, indent + 2);
    }

    write!(out, "{:indent$}", "")?;
    match rope.kind() {
        NodeKind::Substring => write!(out, "substring {} ", rope.len())?,
        NodeKind::Reverse => write!(out, "reverse {} ", rope.len())?,
        _ => {}
    }
    writeln!(out, "{:?}", rope.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_of_a_small_tree() {
        let r = Rope::from("0123456789")
            .append_str("abcdefghij").unwrap()
            .append_str("ABCDEFGHIJ").unwrap();
        let s = stats(&r);
        assert_eq!(s, RopeStats { len: 30, leaf_nodes: 3, concat_nodes: 2, depth: 2 });
        assert_eq!(s.to_string(), "rope(length=30, leaf nodes=3, non-leaf nodes=2, depth=2)");
    }

    #[test]
    fn stats_of_a_leaf() {
        let s = stats(&Rope::from("hi"));
        assert_eq!(s.leaf_nodes, 1);
        assert_eq!(s.concat_nodes, 0);
        assert_eq!(s.depth, 0);
    }

    #[test]
    fn visualize_views() {
        let base = Rope::from("0123456789abcdefghij");
        let r = base.slice(1..19).unwrap()
            .append(&base.reverse()).unwrap();

        let mut out = String::new();
        visualize(&r, &mut out).unwrap();
        assert_eq!(out, "concat[left]\n  substring 18 \"123456789abcdefghi\"\n\
            concat[right]\n  reverse 20 \"jihgfedcba9876543210\"\n");
    }
}
