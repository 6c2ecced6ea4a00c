// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Treemap basics.
//!
//! Build a small tree in memory, lay it out, hit-test, and edit it.
//!
//! Run:
//! - `cargo run -p understory_treemap_demos --example treemap_basics`

use kurbo::{Point, Rect};
use understory_treemap::{RandomPalette, TileRect, Tree};

fn print_tiles(tree: &Tree) {
    for tile in tree.rectangles() {
        let label = tile
            .node
            .and_then(|n| tree.path_string(n))
            .unwrap_or_else(|| "<empty>".into());
        let r: Rect = tile.rect.into();
        println!("  {label:<24} {r:?} {:?}", tile.color);
    }
}

fn main() {
    let mut tree = Tree::with_palette(RandomPalette::seeded(7));
    let readme = tree.leaf("README.md", 12);
    let main_rs = tree.leaf("main.rs", 40);
    let lib_rs = tree.leaf("lib.rs", 28);
    let src = tree.folder("src", [main_rs, lib_rs]);
    let logo = tree.leaf("logo.png", 120);
    let assets = tree.folder("assets", [logo]);
    let root = tree.folder("project", [readme, src, assets]);
    tree.set_root(root);
    tree.layout_root(TileRect::new(0, 0, 400, 200));

    println!("collapsed:");
    print_tiles(&tree);

    tree.expand_all(root);
    println!("expanded:");
    print_tiles(&tree);

    // Expanded folders defer to their children.
    let hit = tree.hit_test_point(Point::new(10.0, 100.0)).unwrap();
    println!("hit at (10, 100): {:?}", tree.path_string(hit.node));
    assert_eq!(hit.node, readme);

    // Edits keep sizes, layout, and shading in sync.
    tree.change_size(main_rs, 0.5);
    let copy = tree.copy_into(readme, assets).unwrap();
    tree.move_into(logo, src);
    println!(
        "after edits: root size {:?}, assets holds {:?}",
        tree.size(root),
        tree.children_of(assets)
    );
    assert_eq!(tree.children_of(assets), &[copy]);
    print_tiles(&tree);

    tree.collapse(lib_rs);
    println!("collapsed src:");
    print_tiles(&tree);

    assert!(tree.delete(copy));
    println!(
        "deleted copy; assets still attached: {}",
        tree.is_attached(assets)
    );
    print_tiles(&tree);

    for (folder, depth, color) in tree.folders() {
        println!("  {:?} depth {depth} {color:?}", tree.name(folder));
    }
    tree.validate().unwrap();
}
