// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use understory_treemap::{NodeId, RandomPalette, TileRect, Tree};

/// A complete tree with `fanout` children per folder, `levels` folder levels deep.
fn gen_tree(fanout: usize, levels: usize) -> (Tree, Vec<NodeId>) {
    fn build(tree: &mut Tree, fanout: usize, level: usize, leaves: &mut Vec<NodeId>) -> NodeId {
        if level == 0 {
            let n = leaves.len();
            let id = tree.leaf(format!("f{n}"), 1 + (n as u64 * 7919) % 1000);
            leaves.push(id);
            return id;
        }
        let children: Vec<NodeId> = (0..fanout)
            .map(|_| build(tree, fanout, level - 1, leaves))
            .collect();
        tree.folder(format!("d{level}"), children)
    }
    let mut tree = Tree::with_palette(RandomPalette::seeded(42));
    let mut leaves = Vec::new();
    let root = build(&mut tree, fanout, levels, &mut leaves);
    tree.set_root(root);
    tree.layout_root(TileRect::new(0, 0, 1920, 1080));
    (tree, leaves)
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    for &(fanout, levels) in &[(8_usize, 3_usize), (16, 3), (10, 4)] {
        let (mut tree, leaves) = gen_tree(fanout, levels);
        group.throughput(Throughput::Elements(leaves.len() as u64));
        group.bench_function(format!("layout_root_f{fanout}_l{levels}"), |b| {
            b.iter(|| {
                tree.layout_root(black_box(TileRect::new(0, 0, 1920, 1080)));
            });
        });
        let root = tree.root().unwrap();
        tree.expand_all(root);
        group.bench_function(format!("rectangles_f{fanout}_l{levels}"), |b| {
            b.iter(|| black_box(tree.rectangles().len()));
        });
    }
    group.finish();
}

fn bench_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit");
    let (mut tree, _) = gen_tree(16, 3);
    let root = tree.root().unwrap();
    tree.expand_all(root);
    let points: Vec<Point> = (0..256)
        .map(|i| Point::new(f64::from(i * 7 % 1920), f64::from(i * 13 % 1080)))
        .collect();
    group.throughput(Throughput::Elements(points.len() as u64));
    group.bench_function("hit_test_point_f16_l3", |b| {
        b.iter(|| {
            for &p in &points {
                black_box(tree.hit_test_point(p));
            }
        });
    });
    group.finish();
}

fn bench_edits(c: &mut Criterion) {
    let mut group = c.benchmark_group("edits");
    group.bench_function("duplicate_delete_f10_l3", |b| {
        b.iter_batched(
            || {
                let (t, l) = gen_tree(10, 3);
                (t, l[l.len() / 2])
            },
            |(mut t, leaf)| {
                let copy = t.duplicate(leaf).unwrap();
                t.delete(copy);
                black_box(t.size(leaf));
            },
            BatchSize::LargeInput,
        );
    });
    group.bench_function("change_size_f10_l3", |b| {
        b.iter_batched(
            || {
                let (t, l) = gen_tree(10, 3);
                (t, l[0])
            },
            |(mut t, leaf)| {
                t.change_size(leaf, 0.25);
                black_box(t.size(leaf));
            },
            BatchSize::LargeInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_layout, bench_hit, bench_edits);
criterion_main!(benches);
