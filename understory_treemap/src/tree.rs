// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: node storage, construction, navigation, and size aggregation.
//!
//! Layout, hit testing, visibility, edits, and shading live in sibling modules as
//! further `impl` blocks on [`TreeGeneric`].

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use crate::palette::{Palette, RandomPalette, avoid_gray};
use crate::source::{Plain, Source};
use crate::types::{NodeFlags, NodeId, Rgb, Shading, TileRect};

/// A treemap tree built from in-memory data.
pub type Tree = TreeGeneric<Plain>;

impl Tree {
    /// Create an empty tree with a randomly seeded palette.
    pub fn new() -> Self {
        Self::with_source(Plain)
    }

    /// Create an empty tree whose leaf colors come from `palette`.
    pub fn with_palette(palette: impl Palette + 'static) -> Self {
        Self::with_source_and_palette(Plain, palette)
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

/// Editable treemap tree, parameterized by the [`Source`] it was built from.
///
/// Nodes live in an arena and are addressed by generational [`NodeId`]s. Children
/// are owned top-down through their parent's child list; the parent link is a plain
/// handle used for walking upwards.
///
/// A tree without a root is the *empty tree*.
pub struct TreeGeneric<S> {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    pub(crate) root: Option<NodeId>,
    source: S,
    palette: Box<dyn Palette>,
    pub(crate) shading: Shading,
}

impl<S: core::fmt::Debug> core::fmt::Debug for TreeGeneric<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("TreeGeneric")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("root", &self.root)
            .field("source", &self.source)
            .field("shading", &self.shading)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    generation: u32,
    pub(crate) name: String,
    pub(crate) size: u64,
    pub(crate) color: Rgb,
    pub(crate) rect: TileRect,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) flags: NodeFlags,
    pub(crate) depth: u32,
}

impl Node {
    fn new(generation: u32, name: String, size: u64, color: Rgb) -> Self {
        Self {
            generation,
            name,
            size,
            color,
            rect: TileRect::ZERO,
            parent: None,
            children: Vec::new(),
            flags: NodeFlags::empty(),
            depth: 0,
        }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

impl<S: Source> TreeGeneric<S> {
    /// Create an empty tree for `source` with a randomly seeded palette.
    pub fn with_source(source: S) -> Self {
        Self::with_source_and_palette(source, RandomPalette::default())
    }

    /// Create an empty tree for `source` whose leaf colors come from `palette`.
    pub fn with_source_and_palette(source: S, palette: impl Palette + 'static) -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: None,
            source,
            palette: Box::new(palette),
            shading: Shading::default(),
        }
    }

    /// The data source this tree was built from.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Current color derivation settings.
    pub fn shading(&self) -> Shading {
        self.shading
    }

    /// Replace the color derivation settings and recolor the folders.
    ///
    /// Leaf colors were fixed at creation and are not touched.
    pub fn set_shading(&mut self, shading: Shading) {
        self.shading = shading;
        self.update_colors();
    }

    // --- construction ---

    /// Create a leaf with an intrinsic `size`.
    ///
    /// The leaf is not part of the tree until it is adopted by [`folder`](Self::folder)
    /// or installed with [`set_root`](Self::set_root). Its color is drawn from the
    /// palette once and kept for its whole life.
    pub fn leaf(&mut self, name: impl Into<String>, size: u64) -> NodeId {
        let color = avoid_gray(self.palette.next_color(), &self.shading);
        self.alloc(name.into(), size, color)
    }

    /// Create a folder adopting `children`, in order.
    ///
    /// The folder's size is the sum of the children's sizes. A folder created without
    /// children is a zero-size leaf.
    ///
    /// # Panics
    ///
    /// Panics if a child is stale, already has a parent, or is the root.
    pub fn folder(
        &mut self,
        name: impl Into<String>,
        children: impl IntoIterator<Item = NodeId>,
    ) -> NodeId {
        let id = self.alloc(name.into(), 0, Rgb::BLACK);
        for child in children {
            assert!(self.is_alive(child), "folder child {child:?} is stale");
            assert!(
                self.node(child).parent.is_none() && self.root != Some(child),
                "folder child {child:?} already belongs to a tree"
            );
            self.link_parent(child, id);
        }
        self.update_sizes(id);
        id
    }

    /// Install `id` as the root, replacing any previous root, and derive depths and colors.
    ///
    /// A replaced root stays in the arena as an unattached node until reclaimed.
    ///
    /// # Panics
    ///
    /// Panics if `id` is stale or has a parent.
    pub fn set_root(&mut self, id: NodeId) {
        assert!(self.is_alive(id), "root {id:?} is stale");
        assert!(
            self.node(id).parent.is_none(),
            "root {id:?} must not have a parent"
        );
        self.node_mut(id).flags.remove(NodeFlags::DETACHED);
        self.root = Some(id);
        self.update_depths_and_colors();
    }

    // --- navigation ---

    /// The root node, or `None` for the empty tree.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Returns true if the tree has no root.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of live nodes in the arena, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some()
    }

    /// Returns true if `id` is reachable from the root through child lists.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let Some(root) = self.root else {
            return false;
        };
        let mut current = id;
        loop {
            let Some(node) = self.node_opt(current) else {
                return false;
            };
            if node.flags.contains(NodeFlags::DETACHED) {
                return false;
            }
            if current == root {
                return true;
            }
            match node.parent {
                Some(p) => current = p,
                None => return false,
            }
        }
    }

    /// Name of a live node.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.node_opt(id).map(|n| n.name.as_str())
    }

    /// Size of a live node: intrinsic for leaves, the children's sum for folders.
    pub fn size(&self, id: NodeId) -> Option<u64> {
        self.node_opt(id).map(|n| n.size)
    }

    /// Fill color of a live node.
    pub fn color(&self, id: NodeId) -> Option<Rgb> {
        self.node_opt(id).map(|n| n.color)
    }

    /// Rectangle assigned by the last layout pass that reached this node.
    pub fn rect(&self, id: NodeId) -> Option<TileRect> {
        self.node_opt(id).map(|n| n.rect)
    }

    /// Depth computed by the last depth pass (the root is 0).
    pub fn depth(&self, id: NodeId) -> Option<u32> {
        self.node_opt(id).map(|n| n.depth)
    }

    /// State flags of a live node.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.node_opt(id).map(|n| n.flags)
    }

    /// Parent of a live node.
    ///
    /// A deleted node still reports the parent it was removed from, so a viewer can
    /// navigate back to where it used to be. That handle is not kept alive: once the
    /// former parent is reclaimed the returned id is stale, so check it with
    /// [`is_alive`](Self::is_alive) before use.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Children of a live node, in layout order. Empty for leaves and stale ids.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Returns true if `id` is live and has no children.
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some_and(Node::is_leaf)
    }

    /// Returns true if `id` is live and expanded.
    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.node_opt(id)
            .is_some_and(|n| n.flags.contains(NodeFlags::EXPANDED))
    }

    /// Names from the root down to `id`, joined by the source's separator.
    ///
    /// Works for deleted nodes too, through their retained parent reference.
    pub fn path_string(&self, id: NodeId) -> Option<String> {
        let path = self.path_to_root(id)?;
        let separator = self.source.separator();
        let mut out = String::new();
        for (i, &n) in path.iter().enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            out.push_str(&self.node(n).name);
        }
        Some(out)
    }

    /// Every attached folder in pre-order, with its depth and color.
    pub fn folders(&self) -> Vec<(NodeId, u32, Rgb)> {
        self.preorder()
            .into_iter()
            .filter(|&id| !self.node(id).is_leaf())
            .map(|id| {
                let n = self.node(id);
                (id, n.depth, n.color)
            })
            .collect()
    }

    // --- sizes ---

    /// Recompute folder sizes in the subtree at `id` from its leaves and return its size.
    ///
    /// Leaves return their intrinsic size unchanged. Returns 0 for stale ids.
    pub fn update_sizes(&mut self, id: NodeId) -> u64 {
        let Some(node) = self.node_opt(id) else {
            return 0;
        };
        if node.is_leaf() {
            return node.size;
        }
        let children = node.children.clone();
        let total = children
            .into_iter()
            .map(|c| self.update_sizes(c))
            .fold(0_u64, u64::saturating_add);
        self.node_mut(id).size = total;
        total
    }

    // --- reclamation ---

    /// Free the subtree at `id` if it is not attached to the tree.
    ///
    /// Handles into the freed subtree become stale. Returns the number of freed
    /// nodes, or 0 if `id` is stale or still attached.
    pub fn reclaim(&mut self, id: NodeId) -> usize {
        if !self.is_alive(id) || self.is_attached(id) {
            return 0;
        }
        // A node inside a detached subtree is still listed by its parent.
        if let Some(parent) = self.node(id).parent {
            if let Some(p) = self.node_opt_mut(parent) {
                p.children.retain(|c| *c != id);
            }
        }
        let freed = self.free_subtree(id);
        #[cfg(feature = "tracing")]
        tracing::debug!(node = ?id, freed, "reclaimed detached subtree");
        freed
    }

    /// Free every live node that is not attached to the tree. Returns the count.
    pub fn reclaim_detached(&mut self) -> usize {
        let mut keep = alloc::vec![false; self.nodes.len()];
        for id in self.preorder() {
            keep[id.idx()] = true;
        }
        let mut freed = 0;
        for idx in 0..self.nodes.len() {
            if self.nodes[idx].is_some() && !keep[idx] {
                self.nodes[idx] = None;
                self.free_list.push(idx);
                freed += 1;
            }
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(freed, "reclaimed unattached nodes");
        freed
    }

    // --- internals ---

    /// Access a live node; panics if `id` is stale.
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        self.node_opt(id).expect("dangling NodeId")
    }

    /// Access a live node mutably; panics if `id` is stale.
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.node_opt_mut(id).expect("dangling NodeId")
    }

    /// Number of arena slots, live or free. Bounds every `NodeId::idx`.
    pub(crate) fn slot_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    pub(crate) fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn alloc(&mut self, name: String, size: u64, color: Rgb) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, name, size, color));
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, name, size, color)));
            self.generations.push(generation);
            (self.nodes.len() - 1, generation)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices by design."
        )]
        let idx = idx as u32;
        NodeId::new(idx, generation)
    }

    pub(crate) fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.push(id);
        let node = self.node_mut(id);
        node.parent = Some(parent);
        node.flags.remove(NodeFlags::DETACHED);
    }

    /// Remove `id` from its parent's child list, keeping the parent reference.
    pub(crate) fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.node(id).parent {
            self.node_mut(parent).children.retain(|c| *c != id);
        }
        self.node_mut(id).flags.insert(NodeFlags::DETACHED);
    }

    /// Clone of a node's `name` and intrinsic size, for duplication.
    pub(crate) fn leaf_payload(&self, id: NodeId) -> (String, u64) {
        let n = self.node(id);
        (n.name.clone(), n.size)
    }

    /// Root→`id` path (inclusive), following parent references.
    pub(crate) fn path_to_root(&self, mut id: NodeId) -> Option<Vec<NodeId>> {
        let mut out = Vec::new();
        loop {
            let node = self.node_opt(id)?;
            out.push(id);
            match node.parent {
                Some(p) => id = p,
                None => break,
            }
        }
        out.reverse();
        Some(out)
    }

    /// Attached nodes in pre-order (parents before children, children in order).
    pub(crate) fn preorder(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        if let Some(root) = self.root {
            self.preorder_from(root, &mut out);
        }
        out
    }

    pub(crate) fn preorder_from(&self, id: NodeId, out: &mut Vec<NodeId>) {
        let mut stack = alloc::vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.node(current).children.iter().rev().copied());
        }
    }

    fn free_subtree(&mut self, id: NodeId) -> usize {
        let mut doomed = Vec::new();
        self.preorder_from(id, &mut doomed);
        for &n in &doomed {
            self.nodes[n.idx()] = None;
            self.free_list.push(n.idx());
        }
        doomed.len()
    }
}
