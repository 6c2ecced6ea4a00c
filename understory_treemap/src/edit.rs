// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural edits: resize, delete, move, duplicate, and copy.
//!
//! Every edit either applies completely or is a no-op reported through its return
//! value. A successful edit re-aggregates sizes, re-lays out the tree inside the
//! root's current rectangle, and re-derives depths and folder colors before it
//! returns, so callers never observe a half-updated tree.
//!
//! Removed nodes are not freed. They stay addressable, keep pointing at the parent
//! they were removed from, and can be released with
//! [`reclaim`](crate::TreeGeneric::reclaim).

use crate::source::Source;
use crate::tree::TreeGeneric;
use crate::types::{NodeFlags, NodeId};

impl<S: Source> TreeGeneric<S> {
    /// Grow or shrink the leaf `id` by `factor` of its current size.
    ///
    /// The change is rounded away from zero, so any non-zero factor moves a non-empty
    /// leaf by at least one unit, and the result never drops below 1.
    ///
    /// A node without children counts as a leaf here, including a folder created
    /// empty and a root whose children were all deleted. Such a node starts at size 0
    /// and resizing it gives it size 1.
    ///
    /// Returns `false` for folders, unattached nodes, and non-finite factors.
    pub fn change_size(&mut self, id: NodeId, factor: f64) -> bool {
        if !self.is_attached(id) || !self.is_leaf(id) || !factor.is_finite() {
            return false;
        }
        let old = self.node(id).size;
        let new = scaled_size(old, factor);
        self.node_mut(id).size = new;
        #[cfg(feature = "tracing")]
        tracing::debug!(node = ?id, old, new, "resized leaf");
        self.settle();
        true
    }

    /// Remove `id` from its parent.
    ///
    /// A folder left without children is removed from its own parent in turn, up to
    /// (but never including) the root. A root left without children becomes an
    /// empty collapsed folder of size 0.
    ///
    /// The removed node keeps its parent reference. Returns `false` for the root and
    /// for nodes that are not attached.
    pub fn delete(&mut self, id: NodeId) -> bool {
        if !self.is_attached(id) {
            return false;
        }
        let Some(parent) = self.parent_of(id) else {
            return false;
        };
        self.detach(id);
        self.prune_empty(parent);
        #[cfg(feature = "tracing")]
        tracing::debug!(node = ?id, parent = ?parent, "deleted");
        self.settle();
        true
    }

    /// Move the leaf `id` to the end of folder `dest`'s children.
    ///
    /// `dest` and its ancestors are expanded so the moved leaf is visible. A folder
    /// emptied by the move is pruned as in [`delete`](Self::delete).
    ///
    /// Returns `false` unless `id` is an attached leaf below the root and `dest` is an
    /// attached folder.
    pub fn move_into(&mut self, id: NodeId, dest: NodeId) -> bool {
        if !self.is_attached(id) || !self.is_leaf(id) || !self.accepts_leaves(dest) {
            return false;
        }
        let Some(old) = self.parent_of(id) else {
            return false;
        };
        self.node_mut(old).children.retain(|c| *c != id);
        self.link_parent(id, dest);
        self.expand_upwards(dest);
        self.prune_empty(old);
        #[cfg(feature = "tracing")]
        tracing::debug!(node = ?id, from = ?old, to = ?dest, "moved");
        self.settle();
        true
    }

    /// Append a copy of the leaf `id` to its own parent and return it.
    ///
    /// The copy has the same name and size and a fresh palette color. Returns `None`
    /// unless `id` is an attached leaf below the root.
    pub fn duplicate(&mut self, id: NodeId) -> Option<NodeId> {
        if !self.is_attached(id) || !self.is_leaf(id) {
            return None;
        }
        let parent = self.parent_of(id)?;
        let copy = self.copy_leaf(id, parent);
        #[cfg(feature = "tracing")]
        tracing::debug!(node = ?id, copy = ?copy, "duplicated");
        self.settle();
        Some(copy)
    }

    /// Append a copy of the leaf `id` to folder `dest` and return it.
    ///
    /// This is [`duplicate`](Self::duplicate) followed by [`move_into`](Self::move_into),
    /// without the intermediate step: the original is untouched and `dest` is
    /// expanded. Returns `None` unless `id` is an attached leaf and `dest` is an
    /// attached folder.
    pub fn copy_into(&mut self, id: NodeId, dest: NodeId) -> Option<NodeId> {
        if !self.is_attached(id) || !self.is_leaf(id) || !self.accepts_leaves(dest) {
            return None;
        }
        let copy = self.copy_leaf(id, dest);
        self.expand_upwards(dest);
        #[cfg(feature = "tracing")]
        tracing::debug!(node = ?id, copy = ?copy, to = ?dest, "copied");
        self.settle();
        Some(copy)
    }

    fn accepts_leaves(&self, dest: NodeId) -> bool {
        self.is_attached(dest) && !self.is_leaf(dest)
    }

    fn copy_leaf(&mut self, id: NodeId, parent: NodeId) -> NodeId {
        let (name, size) = self.leaf_payload(id);
        let copy = self.leaf(name, size);
        self.link_parent(copy, parent);
        copy
    }

    /// Detach `folder` and its ancestors for as long as they have no children left.
    fn prune_empty(&mut self, mut folder: NodeId) {
        while self.node(folder).is_leaf() {
            let is_root = Some(folder) == self.root;
            let node = self.node_mut(folder);
            node.size = 0;
            node.flags.remove(NodeFlags::EXPANDED);
            if is_root {
                return;
            }
            let up = node.parent;
            self.detach(folder);
            #[cfg(feature = "tracing")]
            tracing::trace!(node = ?folder, "pruned empty folder");
            match up {
                Some(p) => folder = p,
                None => return,
            }
        }
    }

    fn settle(&mut self) {
        if let Some(root) = self.root {
            self.update_sizes(root);
            let rect = self.node(root).rect;
            self.layout(root, rect);
        }
        self.update_depths_and_colors();
        debug_assert!(
            self.validate().is_ok(),
            "edit broke an invariant: {:?}",
            self.validate()
        );
    }
}

/// `size` plus `size * factor` rounded away from zero, clamped to at least 1.
fn scaled_size(size: u64, factor: f64) -> u64 {
    let delta = size as f64 * factor;
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Float to int casts saturate; the fraction is handled below."
    )]
    let truncated = delta as i128;
    let rounded = if delta > truncated as f64 {
        truncated.saturating_add(1)
    } else if delta < truncated as f64 {
        truncated.saturating_sub(1)
    } else {
        truncated
    };
    let new = i128::from(size)
        .saturating_add(rounded)
        .clamp(1, i128::from(u64::MAX));
    u64::try_from(new).unwrap_or(u64::MAX)
}
