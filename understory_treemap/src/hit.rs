// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit testing against the last layout.

use alloc::vec::Vec;
use kurbo::Point;

use crate::source::Source;
use crate::tree::TreeGeneric;
use crate::types::{NodeFlags, NodeId};

/// Results of a hit test.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hit {
    /// The matched node: a leaf or a collapsed folder.
    pub node: NodeId,
    /// Path from root to node (inclusive).
    pub path: Vec<NodeId>,
}

impl<S: Source> TreeGeneric<S> {
    /// Find the visible node under `pt` in the subtree at `id`.
    ///
    /// Returns `None` if `pt` is outside `id`'s rectangle or `id` is stale.
    /// Leaves and collapsed folders are opaque and return themselves; expanded
    /// folders defer to their children in order.
    ///
    /// Containment includes all four edges, so a point on an edge shared by two
    /// siblings resolves to the one that comes first in child order, which is the
    /// left or top one.
    pub fn locate(&self, id: NodeId, pt: Point) -> Option<NodeId> {
        let node = self.node_opt(id)?;
        if !node.rect.contains(pt) {
            return None;
        }
        if node.is_leaf() || !node.flags.contains(NodeFlags::EXPANDED) {
            return Some(id);
        }
        node.children.iter().find_map(|&c| self.locate(c, pt))
    }

    /// Hit test a point against the whole tree.
    ///
    /// Returns `None` for the empty tree or when `pt` is outside the root's rectangle.
    pub fn hit_test_point(&self, pt: Point) -> Option<Hit> {
        let node = self.locate(self.root?, pt)?;
        Some(Hit {
            node,
            path: self.path_to_root(node)?,
        })
    }
}
