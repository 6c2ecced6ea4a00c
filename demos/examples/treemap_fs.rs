// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Treemap of a directory.
//!
//! Load a directory (the current one by default), lay it out in an 80x24 grid,
//! and print the largest visible tiles.
//!
//! Run:
//! - `cargo run -p understory_treemap_demos --example treemap_fs -- path/to/dir`

use understory_treemap::TileRect;
use understory_treemap::fs;

fn main() {
    let path = std::env::args().nth(1).unwrap_or_else(|| ".".into());
    let mut tree = match fs::load(&path) {
        Ok(tree) => tree,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };
    let Some(root) = tree.root() else {
        return;
    };
    tree.layout_root(TileRect::new(0, 0, 80, 24));
    tree.expand(root);
    println!(
        "{}: {} bytes in {} nodes, max depth {}",
        path,
        tree.size(root).unwrap_or(0),
        tree.len(),
        tree.max_depth()
    );

    let mut tiles = tree.rectangles();
    tiles.sort_by_key(|t| std::cmp::Reverse(i64::from(t.rect.width) * i64::from(t.rect.height)));
    for tile in tiles.iter().take(20) {
        let Some(node) = tile.node else { continue };
        let kind = if tree.is_leaf(node) { "file" } else { "dir " };
        println!(
            "{kind} {:>3}x{:<3} at ({:>2},{:>2}) {}",
            tile.rect.width,
            tile.rect.height,
            tile.rect.x,
            tile.rect.y,
            tree.full_path(node)
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        );
    }
}
