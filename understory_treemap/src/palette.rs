// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Leaf color generation.
//!
//! Every leaf is assigned a color once, when it is created, and keeps it for its
//! whole life. Folders are recolored from their depth instead (see
//! [`TreeGeneric::update_colors`](crate::TreeGeneric::update_colors)).
//!
//! The generator is injected through the [`Palette`] trait so tests can supply
//! fixed colors. Any `FnMut() -> Rgb` closure is a palette:
//!
//! ```
//! use understory_treemap::{Rgb, Tree};
//!
//! let mut tree = Tree::with_palette(|| Rgb::new(200, 10, 10));
//! let leaf = tree.leaf("a.txt", 3);
//! assert_eq!(tree.color(leaf), Some(Rgb::new(200, 10, 10)));
//! ```

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::types::{Rgb, Shading};

/// Source of raw leaf colors.
///
/// The tree runs each color through [`avoid_gray`] before storing it, so a palette
/// does not need to care about the folder grayscale ramp.
pub trait Palette {
    /// Produce the color for a newly created leaf.
    fn next_color(&mut self) -> Rgb;
}

impl<F: FnMut() -> Rgb> Palette for F {
    fn next_color(&mut self) -> Rgb {
        self()
    }
}

/// Uniformly random colors from a small, seedable generator.
#[derive(Clone, Debug)]
pub struct RandomPalette {
    rng: SmallRng,
}

impl RandomPalette {
    /// A reproducible palette: the same seed yields the same color sequence.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPalette {
    /// Seeded from the thread RNG with `std`, from a fixed seed without it.
    fn default() -> Self {
        #[cfg(feature = "std")]
        {
            Self {
                rng: SmallRng::from_rng(&mut rand::rng()),
            }
        }
        #[cfg(not(feature = "std"))]
        {
            Self::seeded(0x7EE_3A9)
        }
    }
}

impl Palette for RandomPalette {
    fn next_color(&mut self) -> Rgb {
        Rgb::new(
            self.rng.random::<u8>(),
            self.rng.random::<u8>(),
            self.rng.random::<u8>(),
        )
    }
}

/// Push a grayish color off the folder ramp.
///
/// If every channel is strictly within `shading.gray_tolerance` of the channel
/// mean, the blue channel becomes `(b + hue_shift) % 255`. Other colors pass
/// through unchanged.
pub fn avoid_gray(color: Rgb, shading: &Shading) -> Rgb {
    if !color.is_grayish(shading.gray_tolerance) {
        return color;
    }
    let shifted = (u16::from(color.b) + u16::from(shading.hue_shift)) % 255;
    #[allow(
        clippy::cast_possible_truncation,
        reason = "The value was reduced modulo 255."
    )]
    let blue = shifted as u8;
    Rgb::new(color.r, color.g, blue)
}
