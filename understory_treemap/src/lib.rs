// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Treemap: an editable, area-proportional tree model for treemap views.
//!
//! A treemap draws a hierarchy (typically a directory tree) as nested rectangles whose
//! areas are proportional to the sizes of the items they stand for. This crate owns the
//! model behind such a view:
//!
//! - Sizes aggregate up the tree: a folder is always as big as its children combined.
//! - A slice-and-dice layout partitions a rectangle among the children, exactly and
//!   without gaps.
//! - Folders can be expanded (children drawn) or collapsed (one opaque rectangle), and
//!   hit testing respects that.
//! - Edits (resize, delete, move, duplicate, copy) keep all of the above consistent.
//! - Folders are shaded gray by depth; leaves keep a random color picked at creation.
//!
//! Rendering is out of scope. [`TreeGeneric::rectangles`] returns the list of colored
//! rectangles to draw, and [`TileRect::to_kurbo`] converts them for a Kurbo-based renderer.
//!
//! ## API overview
//!
//! - [`Tree`]: tree of in-memory data; [`TreeGeneric`] for other [`Source`]s.
//! - [`NodeId`]: generational handle of a node. Handles survive moves and deletes.
//! - [`NodeFlags`]: expansion and detachment state.
//! - [`Tile`] / [`TileRect`] / [`Rgb`]: the draw list.
//! - [`Palette`]: injectable leaf color generator; [`RandomPalette`] is the default.
//! - [`Shading`]: folder gray ramp and leaf gray-avoidance settings.
//! - [`Violation`]: the invariant reported broken by [`TreeGeneric::validate`].
//!
//! Key operations:
//! - [`Tree::leaf`](TreeGeneric::leaf), [`Tree::folder`](TreeGeneric::folder),
//!   [`Tree::set_root`](TreeGeneric::set_root) build a tree bottom-up.
//! - [`Tree::layout_root`](TreeGeneric::layout_root) assigns rectangles.
//! - [`Tree::hit_test_point`](TreeGeneric::hit_test_point) and
//!   [`Tree::locate`](TreeGeneric::locate) map positions to visible nodes.
//! - [`Tree::expand`](TreeGeneric::expand), [`Tree::collapse`](TreeGeneric::collapse) and
//!   their `_all` variants drive visibility.
//! - [`Tree::change_size`](TreeGeneric::change_size), [`Tree::delete`](TreeGeneric::delete),
//!   [`Tree::move_into`](TreeGeneric::move_into), [`Tree::duplicate`](TreeGeneric::duplicate)
//!   and [`Tree::copy_into`](TreeGeneric::copy_into) edit the structure.
//!
//! With the `std` feature, the `fs` module builds a tree from a directory on disk.
//!
//! ## Example
//!
//! ```
//! use understory_treemap::{Rgb, TileRect, Tree};
//! use kurbo::Point;
//!
//! let mut tree = Tree::with_palette(|| Rgb::new(220, 40, 40));
//! let a = tree.leaf("a.txt", 30);
//! let b = tree.leaf("b.txt", 70);
//! let root = tree.folder("home", [a, b]);
//! tree.set_root(root);
//! tree.layout_root(TileRect::new(0, 0, 100, 50));
//!
//! // Wider than tall: the width is sliced.
//! assert_eq!(tree.rect(a), Some(TileRect::new(0, 0, 30, 50)));
//! assert_eq!(tree.rect(b), Some(TileRect::new(30, 0, 70, 50)));
//!
//! // Collapsed folders are opaque.
//! assert_eq!(tree.hit_test_point(Point::new(80.0, 10.0)).unwrap().node, root);
//! tree.expand(root);
//! assert_eq!(tree.hit_test_point(Point::new(80.0, 10.0)).unwrap().node, b);
//! ```
//!
//! ### Editing
//!
//! ```
//! use understory_treemap::{Rgb, TileRect, Tree};
//!
//! let mut tree = Tree::with_palette(|| Rgb::new(40, 40, 220));
//! let file = tree.leaf("notes.txt", 4);
//! let docs = tree.folder("docs", [file]);
//! let other = tree.leaf("todo.txt", 4);
//! let root = tree.folder("home", [docs, other]);
//! tree.set_root(root);
//! tree.layout_root(TileRect::new(0, 0, 64, 64));
//!
//! // Deleting the only file also removes the folder that held it.
//! assert!(tree.delete(file));
//! assert_eq!(tree.children_of(root), &[other]);
//! assert_eq!(tree.size(root), Some(4));
//!
//! // The deleted file still remembers where it was.
//! assert_eq!(tree.path_string(file).as_deref(), Some("home/docs/notes.txt"));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod edit;
#[cfg(feature = "std")]
pub mod fs;
mod hit;
mod layout;
pub mod palette;
mod shade;
mod source;
mod tree;
mod types;
mod validate;
mod visibility;

pub use hit::Hit;
pub use palette::{Palette, RandomPalette};
pub use source::{Plain, Source};
pub use tree::{Tree, TreeGeneric};
pub use types::{NodeFlags, NodeId, Rgb, Shading, Tile, TileRect};
pub use validate::Violation;
