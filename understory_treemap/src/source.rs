// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Data-source capability: how a tree's names combine into paths.

/// Describes the data source a tree was built from.
///
/// The tree itself only stores node names. Anything that depends on where the
/// data came from, such as how names join into a path, is answered here. Each
/// data-source variant (in-memory, filesystem, ...) supplies its own implementation.
pub trait Source {
    /// String placed between names by [`TreeGeneric::path_string`](crate::TreeGeneric::path_string).
    fn separator(&self) -> &str;
}

/// Source for trees assembled in memory. Paths use `/`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Plain;

impl Source for Plain {
    fn separator(&self) -> &str {
        "/"
    }
}
