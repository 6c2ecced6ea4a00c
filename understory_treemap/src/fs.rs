// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trees built from the filesystem.
//!
//! [`load`] walks a directory and turns regular files into leaves sized by their
//! length in bytes and directories into folders. Entries are visited in file-name
//! order so the same directory always produces the same layout. Symbolic links are
//! never followed; a link is a leaf sized by the link itself.
//!
//! ```no_run
//! use understory_treemap::TileRect;
//!
//! let mut tree = understory_treemap::fs::load(".")?;
//! tree.layout_root(TileRect::new(0, 0, 800, 600));
//! for tile in tree.rectangles() {
//!     if let Some(node) = tile.node {
//!         println!("{:?} {}", tile.rect, tree.full_path(node).unwrap().display());
//!     }
//! }
//! # Ok::<(), understory_treemap::fs::LoadError>(())
//! ```

use alloc::string::String;
use alloc::vec::Vec;
use std::io;
use std::path::{MAIN_SEPARATOR_STR, Path, PathBuf};

use crate::palette::{Palette, RandomPalette};
use crate::source::Source;
use crate::tree::TreeGeneric;
use crate::types::NodeId;

/// A tree loaded from the filesystem.
pub type FsTree = TreeGeneric<FsSource>;

/// [`Source`] for trees read from a directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    /// The path the tree was loaded from.
    pub fn root_path(&self) -> &Path {
        &self.root
    }
}

impl Source for FsSource {
    fn separator(&self) -> &str {
        MAIN_SEPARATOR_STR
    }
}

/// Failure to read part of the directory being loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// An I/O operation on `path` failed.
    #[error("failed to read `{}`", .path.display())]
    Io {
        /// The file or directory being read.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
}

impl LoadError {
    fn io(path: &Path) -> impl FnOnce(io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Load the directory at `path` with randomly colored leaves.
pub fn load(path: impl AsRef<Path>) -> Result<FsTree, LoadError> {
    load_with_palette(path, RandomPalette::default())
}

/// Load the directory at `path`, coloring leaves from `palette`.
///
/// The root folder is named after the last component of `path` (or the whole path
/// when it has none, such as `/`). Loading a regular file yields a single-leaf tree.
pub fn load_with_palette(
    path: impl AsRef<Path>,
    palette: impl Palette + 'static,
) -> Result<FsTree, LoadError> {
    let path = path.as_ref();
    let mut tree = FsTree::with_source_and_palette(
        FsSource {
            root: path.to_path_buf(),
        },
        palette,
    );
    let name = path.file_name().map_or_else(
        || path.to_string_lossy().into_owned(),
        |n| n.to_string_lossy().into_owned(),
    );
    let mut dirs = 0_usize;
    let root = read_node(&mut tree, path, name, &mut dirs)?;
    tree.set_root(root);
    #[cfg(feature = "tracing")]
    tracing::debug!(
        path = %path.display(),
        nodes = tree.len(),
        dirs,
        size = tree.size(root),
        "loaded directory tree"
    );
    Ok(tree)
}

fn read_node(
    tree: &mut FsTree,
    path: &Path,
    name: String,
    dirs: &mut usize,
) -> Result<NodeId, LoadError> {
    let meta = std::fs::symlink_metadata(path).map_err(LoadError::io(path))?;
    if !meta.is_dir() {
        return Ok(tree.leaf(name, meta.len()));
    }
    let mut entries = std::fs::read_dir(path)
        .map_err(LoadError::io(path))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(LoadError::io(path))?;
    entries.sort_by_key(std::fs::DirEntry::file_name);
    #[cfg(feature = "tracing")]
    tracing::trace!(dir = %path.display(), entries = entries.len(), "reading directory");

    let mut children = Vec::with_capacity(entries.len());
    for entry in entries {
        let child_name = entry.file_name().to_string_lossy().into_owned();
        children.push(read_node(tree, &entry.path(), child_name, dirs)?);
    }
    *dirs += 1;
    Ok(tree.folder(name, children))
}

impl TreeGeneric<FsSource> {
    /// Filesystem path of `id`: the loaded root path joined with the names below it.
    ///
    /// Deleted nodes resolve through the parent they were removed from. Returns `None`
    /// for stale ids.
    pub fn full_path(&self, id: NodeId) -> Option<PathBuf> {
        let path = self.path_to_root(id)?;
        let mut out = self.source().root.clone();
        for &n in path.iter().skip(1) {
            out.push(self.name(n)?);
        }
        Some(out)
    }
}
