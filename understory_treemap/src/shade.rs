// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Depth bookkeeping and folder shading.

use crate::source::Source;
use crate::tree::TreeGeneric;
use crate::types::Rgb;

impl<S: Source> TreeGeneric<S> {
    /// Recompute every attached node's depth: 0 at the root, parent + 1 below.
    pub fn update_depths(&mut self) {
        for id in self.preorder() {
            let depth = match self.node(id).parent {
                Some(p) if Some(id) != self.root => self.node(p).depth + 1,
                _ => 0,
            };
            self.node_mut(id).depth = depth;
        }
    }

    /// Deepest leaf depth in the tree. 0 for the empty tree and for a childless root.
    pub fn max_depth(&self) -> u32 {
        self.preorder()
            .into_iter()
            .map(|id| self.node(id))
            .filter(|n| n.is_leaf())
            .map(|n| n.depth)
            .max()
            .unwrap_or(0)
    }

    /// Recolor the folders from their depth.
    ///
    /// Each folder becomes the gray `step * depth`, where `step` is
    /// `folder_span / max_depth` (integer division, 0 when the tree is flat), so the
    /// root is always black. Leaves keep the color they were created with.
    pub fn update_colors(&mut self) {
        let max_depth = self.max_depth();
        let step = match max_depth {
            0 => 0,
            d => u32::from(self.shading.folder_span) / d,
        };
        for id in self.preorder() {
            let node = self.node_mut(id);
            if node.is_leaf() {
                continue;
            }
            let level = u8::try_from(step.saturating_mul(node.depth)).unwrap_or(u8::MAX);
            node.color = Rgb::gray(level);
        }
    }

    /// [`update_depths`](Self::update_depths) followed by [`update_colors`](Self::update_colors).
    pub fn update_depths_and_colors(&mut self) {
        self.update_depths();
        self.update_colors();
    }
}
