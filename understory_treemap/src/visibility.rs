// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Expand/collapse state.
//!
//! A folder is either collapsed (drawn and hit as one opaque rectangle) or expanded
//! (its children are drawn instead). Two rules hold after every transition:
//!
//! - an expanded folder has only expanded ancestors, and
//! - a collapsed folder has only collapsed descendants.
//!
//! Leaves have no expansion state. Every transition ends with size aggregation and
//! a re-layout of the affected rectangle.

use alloc::vec::Vec;

use crate::source::Source;
use crate::tree::TreeGeneric;
use crate::types::{NodeFlags, NodeId};

impl<S: Source> TreeGeneric<S> {
    /// Expand the folder `id`, and every ancestor with it.
    ///
    /// Returns `false` (and changes nothing) for leaves and nodes that are not attached.
    pub fn expand(&mut self, id: NodeId) -> bool {
        if !self.is_attached(id) || self.is_leaf(id) {
            return false;
        }
        self.expand_upwards(id);
        #[cfg(feature = "tracing")]
        tracing::debug!(node = ?id, "expanded");
        self.finish_visibility(id);
        true
    }

    /// Expand the folder `id`, its ancestors, and every folder below it.
    ///
    /// Returns `false` (and changes nothing) for leaves and nodes that are not attached.
    pub fn expand_all(&mut self, id: NodeId) -> bool {
        if !self.is_attached(id) || self.is_leaf(id) {
            return false;
        }
        self.expand_upwards(id);
        let mut subtree = Vec::new();
        self.preorder_from(id, &mut subtree);
        for n in subtree {
            let node = self.node_mut(n);
            if !node.is_leaf() {
                node.flags.insert(NodeFlags::EXPANDED);
            }
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(node = ?id, "expanded subtree");
        self.finish_visibility(id);
        true
    }

    /// Collapse `id` together with its parent.
    ///
    /// The parent (or `id` itself, for the root) and everything below it end up
    /// collapsed, so `id` and its siblings are hidden behind the parent's rectangle.
    /// Called on a leaf, this collapses the folder containing it.
    ///
    /// Returns `false` for nodes that are not attached.
    pub fn collapse(&mut self, id: NodeId) -> bool {
        if !self.is_attached(id) {
            return false;
        }
        let target = self.parent_of(id).unwrap_or(id);
        self.collapse_subtree(target);
        #[cfg(feature = "tracing")]
        tracing::debug!(node = ?id, folder = ?target, "collapsed");
        self.finish_visibility(target);
        true
    }

    /// Collapse every node of the tree, whichever attached node it is called on.
    ///
    /// Returns `false` for nodes that are not attached.
    pub fn collapse_all(&mut self, id: NodeId) -> bool {
        if !self.is_attached(id) {
            return false;
        }
        let Some(root) = self.root else {
            return false;
        };
        self.collapse_subtree(root);
        #[cfg(feature = "tracing")]
        tracing::debug!("collapsed all");
        self.finish_visibility(root);
        true
    }

    /// Set `EXPANDED` on `id` and all of its ancestors.
    pub(crate) fn expand_upwards(&mut self, id: NodeId) {
        let mut current = Some(id);
        while let Some(n) = current {
            let node = self.node_mut(n);
            node.flags.insert(NodeFlags::EXPANDED);
            current = node.parent;
        }
    }

    pub(crate) fn collapse_subtree(&mut self, id: NodeId) {
        let mut subtree = Vec::new();
        self.preorder_from(id, &mut subtree);
        for n in subtree {
            self.node_mut(n).flags.remove(NodeFlags::EXPANDED);
        }
    }

    fn finish_visibility(&mut self, id: NodeId) {
        self.relayout(id);
        debug_assert!(
            self.validate().is_ok(),
            "visibility change broke an invariant: {:?}",
            self.validate()
        );
    }
}
