// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the treemap: node identifiers, flags, colors, and integer geometry.

use kurbo::{Point, Rect};

/// Identifier for a node in the tree.
///
/// This is a small, copyable handle that stays stable across edits, including
/// moves between folders, but becomes invalid once its slot is reclaimed.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On creation, a fresh slot is allocated with generation `1`.
/// - Deleting a node only detaches it; the handle stays live so a viewer can still
///   walk back up through [`TreeGeneric::parent_of`](crate::TreeGeneric::parent_of).
/// - [`TreeGeneric::reclaim`](crate::TreeGeneric::reclaim) frees the slot; any
///   existing `NodeId` for it is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// Use [`TreeGeneric::is_alive`](crate::TreeGeneric::is_alive) to check whether a
/// `NodeId` still refers to a live node.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Per-node state flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Children are drawn individually instead of one collapsed rectangle.
        ///
        /// Only internal nodes carry this bit, and only when every ancestor carries it too.
        const EXPANDED = 0b0000_0001;
        /// The node was removed from its parent by a delete or a prune.
        ///
        /// It keeps its parent reference, but is no longer listed among that parent's children.
        const DETACHED = 0b0000_0010;
    }
}

/// An opaque 8-bit-per-channel RGB color.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Black, used for the root folder and the empty-tree placeholder.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// A shade of gray with all three channels set to `level`.
    pub const fn gray(level: u8) -> Self {
        Self::new(level, level, level)
    }

    /// Returns true if every channel is strictly within `tolerance` of the channel mean.
    ///
    /// The mean is the truncated integer mean of the three channels.
    pub fn is_grayish(self, tolerance: u8) -> bool {
        let channels = [self.r, self.g, self.b].map(i16::from);
        let mean = channels.iter().sum::<i16>() / 3;
        channels
            .iter()
            .all(|&c| (c - mean).abs() < i16::from(tolerance))
    }
}

/// Integer axis-aligned rectangle in pixel space: origin plus extent.
///
/// All treemap geometry is integral; slices are floored so that neighbours share
/// exact edges. Use [`TileRect::to_kurbo`] to hand a rectangle to a renderer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TileRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Horizontal extent.
    pub width: i32,
    /// Vertical extent.
    pub height: i32,
}

impl TileRect {
    /// The zero rectangle at the origin.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Create a rectangle from origin and size.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (`x + width`).
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Whether `pt` lies inside this rectangle, edges included on all four sides.
    pub fn contains(&self, pt: Point) -> bool {
        f64::from(self.x) <= pt.x
            && pt.x <= f64::from(self.right())
            && f64::from(self.y) <= pt.y
            && pt.y <= f64::from(self.bottom())
    }

    /// Convert to a Kurbo rectangle for drawing.
    pub fn to_kurbo(self) -> Rect {
        Rect::new(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.right()),
            f64::from(self.bottom()),
        )
    }
}

impl From<TileRect> for Rect {
    fn from(r: TileRect) -> Self {
        r.to_kurbo()
    }
}

/// Color derivation settings.
///
/// The defaults reproduce the classic treemap look: folders ramp from black at the
/// root towards light gray, and leaves are random colors kept clear of that ramp.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Shading {
    /// Gray level budget spread across folder depths (`step = folder_span / max_depth`).
    pub folder_span: u8,
    /// A leaf color whose channels all sit strictly within this distance of their
    /// mean counts as gray and gets its blue channel shifted.
    pub gray_tolerance: u8,
    /// Amount added (modulo 255) to the blue channel of a grayish leaf color.
    pub hue_shift: u8,
}

impl Default for Shading {
    fn default() -> Self {
        Self {
            folder_span: 200,
            gray_tolerance: 20,
            hue_shift: 150,
        }
    }
}

/// One entry of the draw list produced by [`TreeGeneric::rectangles`](crate::TreeGeneric::rectangles).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    /// The node drawn here, or `None` for the empty-tree placeholder.
    pub node: Option<NodeId>,
    /// Where to draw.
    pub rect: TileRect,
    /// Fill color.
    pub color: Rgb,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_inclusive_on_every_edge() {
        let r = TileRect::new(10, 20, 30, 40);
        assert!(r.contains(Point::new(10.0, 20.0)));
        assert!(r.contains(Point::new(40.0, 60.0)));
        assert!(r.contains(Point::new(40.0, 20.0)));
        assert!(!r.contains(Point::new(40.5, 30.0)));
        assert!(!r.contains(Point::new(9.0, 30.0)));
    }

    #[test]
    fn grayish_uses_strict_tolerance_around_truncated_mean() {
        assert!(Rgb::new(100, 110, 119).is_grayish(20));
        // Mean of (0, 0, 60) is 20; the blue channel sits exactly 40 away.
        assert!(!Rgb::new(0, 0, 60).is_grayish(20));
        // Mean of (10, 10, 40) is 20; every channel is within 20 but one is exactly 20 away.
        assert!(!Rgb::new(10, 10, 40).is_grayish(20));
        assert!(Rgb::gray(42).is_grayish(1));
    }

    #[test]
    fn kurbo_conversion_keeps_edges() {
        let r: Rect = TileRect::new(1, 2, 3, 4).into();
        assert_eq!(r, Rect::new(1.0, 2.0, 4.0, 6.0));
    }
}
