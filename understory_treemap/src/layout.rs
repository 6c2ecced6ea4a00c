// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slice-and-dice layout and the draw list derived from it.
//!
//! Each folder's rectangle is cut along its longer side into one slice per child,
//! proportional to the child's size. Slices are floored to whole pixels and the
//! last child takes whatever remains, so siblings always tile their parent exactly.
//! The cut direction alternates naturally as slices get thinner; there is no
//! aspect-ratio optimization.

use alloc::vec::Vec;

use crate::source::Source;
use crate::tree::TreeGeneric;
use crate::types::{NodeFlags, NodeId, Rgb, Tile, TileRect};

impl<S: Source> TreeGeneric<S> {
    /// Assign `rect` to `id` and recursively partition it among the descendants.
    ///
    /// If `rect` is wider than it is tall, children are laid out left to right
    /// (slicing the width); otherwise top to bottom (slicing the height). Every node
    /// in the subtree receives a rectangle, expanded or not.
    ///
    /// Stale ids are ignored.
    pub fn layout(&mut self, id: NodeId, rect: TileRect) {
        let Some(node) = self.node_opt_mut(id) else {
            return;
        };
        node.rect = rect;
        if node.is_leaf() {
            return;
        }
        let children = node.children.clone();
        let total = children
            .iter()
            .map(|&c| self.node(c).size)
            .fold(0_u64, u64::saturating_add);

        let horizontal = rect.width > rect.height;
        let (origin, extent) = if horizontal {
            (rect.x, rect.width)
        } else {
            (rect.y, rect.height)
        };

        let last = children.len() - 1;
        let mut cursor = origin;
        for (i, child) in children.into_iter().enumerate() {
            let slice = if i == last {
                origin + extent - cursor
            } else {
                proportional_slice(self.node(child).size, total, extent)
            };
            let sub = if horizontal {
                TileRect::new(cursor, rect.y, slice, rect.height)
            } else {
                TileRect::new(rect.x, cursor, rect.width, slice)
            };
            self.layout(child, sub);
            cursor += slice;
        }
    }

    /// Lay out the whole tree in `rect`. Does nothing for the empty tree.
    pub fn layout_root(&mut self, rect: TileRect) {
        if let Some(root) = self.root {
            self.layout(root, rect);
        }
    }

    /// The rectangles that should currently be drawn, with their colors.
    ///
    /// This is the visible frontier of the tree in pre-order: leaves, plus any
    /// collapsed folder (whose descendants are not listed). The empty tree yields a
    /// single zero-size black placeholder so there is always something to draw.
    pub fn rectangles(&self) -> Vec<Tile> {
        match self.root {
            Some(root) => self.rectangles_from(root),
            None => alloc::vec![Tile {
                node: None,
                rect: TileRect::ZERO,
                color: Rgb::BLACK,
            }],
        }
    }

    /// The visible frontier of the subtree at `id`. Empty for stale ids.
    pub fn rectangles_from(&self, id: NodeId) -> Vec<Tile> {
        let mut out = Vec::new();
        if !self.is_alive(id) {
            return out;
        }
        let mut stack = alloc::vec![id];
        while let Some(current) = stack.pop() {
            let node = self.node(current);
            if node.flags.contains(NodeFlags::EXPANDED) && !node.is_leaf() {
                stack.extend(node.children.iter().rev().copied());
            } else {
                out.push(Tile {
                    node: Some(current),
                    rect: node.rect,
                    color: node.color,
                });
            }
        }
        out
    }

    /// Re-aggregate sizes from the root, then re-run layout from `id`'s stored rectangle.
    pub(crate) fn relayout(&mut self, id: NodeId) {
        if let Some(root) = self.root {
            self.update_sizes(root);
        }
        if let Some(rect) = self.rect(id) {
            self.layout(id, rect);
        }
    }
}

/// `floor(size * extent / total)`, or 0 when there is nothing to share.
fn proportional_slice(size: u64, total: u64, extent: i32) -> i32 {
    if total == 0 || extent <= 0 {
        return 0;
    }
    let share = u128::from(size) * u128::from(extent.unsigned_abs()) / u128::from(total);
    i32::try_from(share).unwrap_or(extent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Rgb, Tree};

    fn tree_with_sizes(sizes: &[u64]) -> (Tree, NodeId, Vec<NodeId>) {
        let mut tree = Tree::with_palette(|| Rgb::new(0, 200, 0));
        let leaves: Vec<NodeId> = sizes
            .iter()
            .enumerate()
            .map(|(i, &s)| tree.leaf(alloc::format!("f{i}"), s))
            .collect();
        let root = tree.folder("root", leaves.iter().copied());
        tree.set_root(root);
        (tree, root, leaves)
    }

    #[test]
    fn wide_rect_slices_width() {
        let (mut tree, root, leaves) = tree_with_sizes(&[30, 70]);
        tree.layout(root, TileRect::new(0, 0, 100, 50));
        assert_eq!(tree.rect(leaves[0]), Some(TileRect::new(0, 0, 30, 50)));
        assert_eq!(tree.rect(leaves[1]), Some(TileRect::new(30, 0, 70, 50)));
    }

    #[test]
    fn square_rect_slices_height() {
        let (mut tree, root, leaves) = tree_with_sizes(&[1, 1]);
        tree.layout(root, TileRect::new(5, 5, 40, 40));
        assert_eq!(tree.rect(leaves[0]), Some(TileRect::new(5, 5, 40, 20)));
        assert_eq!(tree.rect(leaves[1]), Some(TileRect::new(5, 25, 40, 20)));
    }

    #[test]
    fn last_child_absorbs_flooring() {
        let (mut tree, root, leaves) = tree_with_sizes(&[1, 1, 1]);
        tree.layout(root, TileRect::new(0, 0, 100, 10));
        let widths: Vec<i32> = leaves
            .iter()
            .map(|&l| tree.rect(l).unwrap().width)
            .collect();
        assert_eq!(widths, [33, 33, 34]);
        assert_eq!(tree.rect(leaves[2]).unwrap().x, 66);
    }

    #[test]
    fn zero_size_child_gets_no_space() {
        let (mut tree, root, leaves) = tree_with_sizes(&[0, 5, 5]);
        tree.layout(root, TileRect::new(0, 0, 10, 100));
        assert_eq!(tree.rect(leaves[0]), Some(TileRect::new(0, 0, 10, 0)));
        assert_eq!(tree.rect(leaves[1]), Some(TileRect::new(0, 0, 10, 50)));
        assert_eq!(tree.rect(leaves[2]), Some(TileRect::new(0, 50, 10, 50)));
    }

    #[test]
    fn all_zero_children_leave_the_extent_to_the_last() {
        let (mut tree, root, leaves) = tree_with_sizes(&[0, 0]);
        tree.layout(root, TileRect::new(0, 0, 8, 4));
        assert_eq!(tree.rect(leaves[0]), Some(TileRect::new(0, 0, 0, 4)));
        assert_eq!(tree.rect(leaves[1]), Some(TileRect::new(0, 0, 8, 4)));
    }

    #[test]
    fn nested_folders_get_rectangles_even_when_collapsed() {
        let mut tree = Tree::with_palette(|| Rgb::new(0, 0, 200));
        let a = tree.leaf("a", 2);
        let b = tree.leaf("b", 2);
        let inner = tree.folder("inner", [a, b]);
        let c = tree.leaf("c", 4);
        let root = tree.folder("root", [inner, c]);
        tree.set_root(root);
        tree.layout_root(TileRect::new(0, 0, 80, 20));

        assert_eq!(tree.rect(inner), Some(TileRect::new(0, 0, 40, 20)));
        assert_eq!(tree.rect(c), Some(TileRect::new(40, 0, 40, 20)));
        // 40x20 is wider than tall, so `inner` slices its width too.
        assert_eq!(tree.rect(a), Some(TileRect::new(0, 0, 20, 20)));
        assert_eq!(tree.rect(b), Some(TileRect::new(20, 0, 20, 20)));
    }

    #[test]
    fn rectangles_stop_at_collapsed_folders() {
        let mut tree = Tree::with_palette(|| Rgb::new(0, 0, 200));
        let a = tree.leaf("a", 2);
        let b = tree.leaf("b", 2);
        let inner = tree.folder("inner", [a, b]);
        let c = tree.leaf("c", 4);
        let root = tree.folder("root", [inner, c]);
        tree.set_root(root);
        tree.layout_root(TileRect::new(0, 0, 80, 20));

        let collapsed: Vec<_> = tree.rectangles().iter().map(|t| t.node).collect();
        assert_eq!(collapsed, [Some(root)]);

        tree.expand(root);
        let shallow: Vec<_> = tree.rectangles().iter().map(|t| t.node).collect();
        assert_eq!(shallow, [Some(inner), Some(c)]);

        tree.expand(inner);
        let deep: Vec<_> = tree.rectangles().iter().map(|t| t.node).collect();
        assert_eq!(deep, [Some(a), Some(b), Some(c)]);
    }

    #[test]
    fn empty_tree_draws_a_placeholder() {
        let tree = Tree::with_palette(|| Rgb::new(1, 2, 3));
        assert_eq!(
            tree.rectangles(),
            [Tile {
                node: None,
                rect: TileRect::ZERO,
                color: Rgb::BLACK,
            }]
        );
    }
}
