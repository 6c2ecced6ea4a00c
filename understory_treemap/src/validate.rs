// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural invariant checks.

use crate::source::Source;
use crate::tree::TreeGeneric;
use crate::types::{NodeFlags, NodeId};

/// An invariant that does not hold for some attached node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    /// A folder's size is not the sum of its children's sizes.
    #[error("folder {node:?} has size {actual} but its children sum to {expected}")]
    SizeMismatch {
        /// The offending folder.
        node: NodeId,
        /// Sum of the children's sizes.
        expected: u64,
        /// Stored size.
        actual: u64,
    },
    /// A child does not point back at the folder listing it, is listed more than
    /// once, or is marked detached.
    #[error("node {node:?} is not linked consistently with its parent")]
    BrokenLink {
        /// The offending child.
        node: NodeId,
    },
    /// An expanded node sits below a collapsed one.
    #[error("node {node:?} is expanded under a collapsed parent")]
    ExpandedUnderCollapsed {
        /// The expanded node.
        node: NodeId,
    },
    /// A node without children carries the expanded flag.
    #[error("leaf {node:?} is marked expanded")]
    ExpandedLeaf {
        /// The offending leaf.
        node: NodeId,
    },
    /// A stored depth disagrees with the node's distance from the root.
    #[error("node {node:?} has depth {actual}, expected {expected}")]
    DepthMismatch {
        /// The offending node.
        node: NodeId,
        /// Distance from the root.
        expected: u32,
        /// Stored depth.
        actual: u32,
    },
    /// A folder's children do not exactly tile its rectangle.
    #[error("children of {node:?} do not tile its rectangle")]
    BrokenTiling {
        /// The folder whose rectangle is not partitioned.
        node: NodeId,
    },
}

impl<S: Source> TreeGeneric<S> {
    /// Check the structural invariants over every attached node.
    ///
    /// This covers size aggregation, parent/child links, expansion monotonicity,
    /// childless expansion, and depths. Geometry is checked separately by
    /// [`validate_layout`](Self::validate_layout).
    pub fn validate(&self) -> Result<(), Violation> {
        // Listed at most once across all child lists, indexed by slot.
        let mut listed = alloc::vec![false; self.slot_count()];
        for id in self.preorder() {
            let node = self.node(id);
            if node.is_leaf() && node.flags.contains(NodeFlags::EXPANDED) {
                return Err(Violation::ExpandedLeaf { node: id });
            }
            if Some(id) == self.root && node.depth != 0 {
                return Err(Violation::DepthMismatch {
                    node: id,
                    expected: 0,
                    actual: node.depth,
                });
            }
            let mut expected = 0_u64;
            for &c in &node.children {
                let child = self.node(c);
                if child.parent != Some(id)
                    || child.flags.contains(NodeFlags::DETACHED)
                    || core::mem::replace(&mut listed[c.idx()], true)
                {
                    return Err(Violation::BrokenLink { node: c });
                }
                if child.flags.contains(NodeFlags::EXPANDED)
                    && !node.flags.contains(NodeFlags::EXPANDED)
                {
                    return Err(Violation::ExpandedUnderCollapsed { node: c });
                }
                if child.depth != node.depth + 1 {
                    return Err(Violation::DepthMismatch {
                        node: c,
                        expected: node.depth + 1,
                        actual: child.depth,
                    });
                }
                expected = expected.saturating_add(child.size);
            }
            if !node.is_leaf() && node.size != expected {
                return Err(Violation::SizeMismatch {
                    node: id,
                    expected,
                    actual: node.size,
                });
            }
        }
        Ok(())
    }

    /// Check that every attached folder's children partition its rectangle.
    ///
    /// Children must follow each other without gaps along the folder's split axis,
    /// share its extent on the other axis, and end exactly at its far edge.
    pub fn validate_layout(&self) -> Result<(), Violation> {
        for id in self.preorder() {
            let node = self.node(id);
            if node.is_leaf() {
                continue;
            }
            let parent = node.rect;
            let horizontal = parent.width > parent.height;
            let mut cursor = if horizontal { parent.x } else { parent.y };
            for &c in &node.children {
                let r = self.node(c).rect;
                let ok = if horizontal {
                    r.x == cursor && r.y == parent.y && r.height == parent.height && r.width >= 0
                } else {
                    r.y == cursor && r.x == parent.x && r.width == parent.width && r.height >= 0
                };
                if !ok {
                    return Err(Violation::BrokenTiling { node: id });
                }
                cursor = if horizontal { r.right() } else { r.bottom() };
            }
            let end = if horizontal {
                parent.right()
            } else {
                parent.bottom()
            };
            if cursor != end {
                return Err(Violation::BrokenTiling { node: id });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Rgb, TileRect, Tree};

    fn sample() -> (Tree, NodeId, NodeId, NodeId) {
        let mut tree = Tree::with_palette(|| Rgb::new(10, 200, 10));
        let a = tree.leaf("a", 3);
        let b = tree.leaf("b", 5);
        let inner = tree.folder("inner", [b]);
        let root = tree.folder("root", [a, inner]);
        tree.set_root(root);
        tree.layout_root(TileRect::new(0, 0, 90, 40));
        (tree, root, a, inner)
    }

    #[test]
    fn fresh_tree_is_valid() {
        let (tree, ..) = sample();
        assert_eq!(tree.validate(), Ok(()));
        assert_eq!(tree.validate_layout(), Ok(()));
    }

    #[test]
    fn stale_folder_size_is_reported() {
        let (mut tree, root, a, _) = sample();
        tree.node_mut(a).size = 4;
        assert_eq!(
            tree.validate(),
            Err(Violation::SizeMismatch {
                node: root,
                expected: 9,
                actual: 8,
            })
        );
    }

    #[test]
    fn expansion_rules_are_checked() {
        let (mut tree, _, _, inner) = sample();
        tree.node_mut(inner).flags.insert(NodeFlags::EXPANDED);
        assert_eq!(
            tree.validate(),
            Err(Violation::ExpandedUnderCollapsed { node: inner })
        );

        let (mut tree, root, a, _) = sample();
        tree.node_mut(root).flags.insert(NodeFlags::EXPANDED);
        tree.node_mut(a).flags.insert(NodeFlags::EXPANDED);
        assert_eq!(tree.validate(), Err(Violation::ExpandedLeaf { node: a }));
    }

    #[test]
    fn moved_rectangle_breaks_tiling() {
        let (mut tree, root, a, _) = sample();
        tree.node_mut(a).rect.width -= 1;
        assert_eq!(
            tree.validate_layout(),
            Err(Violation::BrokenTiling { node: root })
        );
    }

    #[test]
    fn repeated_child_is_a_broken_link() {
        let (mut tree, root, a, _) = sample();
        tree.node_mut(root).children.push(a);
        assert_eq!(tree.validate(), Err(Violation::BrokenLink { node: a }));
    }

    #[test]
    fn wide_folders_validate_after_edits() {
        let mut tree = Tree::with_palette(|| Rgb::new(10, 200, 10));
        let leaves: alloc::vec::Vec<NodeId> = (0..20_000)
            .map(|i| tree.leaf(alloc::format!("f{i}"), 1 + i % 7))
            .collect();
        let root = tree.folder("root", leaves.iter().copied());
        tree.set_root(root);
        tree.layout_root(TileRect::new(0, 0, 1920, 1080));

        assert!(tree.change_size(leaves[0], 0.5));
        assert!(tree.delete(leaves[1]));
        assert_eq!(tree.validate(), Ok(()));
        assert_eq!(tree.validate_layout(), Ok(()));
        assert_eq!(tree.children_of(root).len(), 19_999);
    }

    #[test]
    fn violations_describe_themselves() {
        let (mut tree, _, a, _) = sample();
        tree.node_mut(a).depth = 7;
        let err = tree.validate().unwrap_err();
        assert!(alloc::format!("{err}").contains("depth 7, expected 1"));
    }
}
