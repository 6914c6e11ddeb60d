use criterion::{criterion_group, criterion_main, Bencher, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rb_sentinel_tree::{Order, RbTree};
use std::hint::black_box;
use std::ops::ControlFlow;

struct KeyGenerator {
    rng: StdRng,
    limit: u32,
}
impl KeyGenerator {
    fn new() -> Self {
        const LIMIT: u32 = 1_000_000;
        Self {
            rng: StdRng::from_seed([0; 32]),
            limit: LIMIT,
        }
    }

    fn next(&mut self) -> u32 {
        self.rng.gen_range(0..self.limit)
    }
}

fn keys(count: usize) -> Vec<u32> {
    let mut gen = KeyGenerator::new();
    std::iter::repeat_with(|| gen.next()).take(count).collect()
}

// insert helper fn
fn tree_insert(count: usize, bench: &mut Bencher) {
    let keys = keys(count);
    bench.iter(|| {
        let mut tree = RbTree::new();
        for &k in &keys {
            let _ignore = black_box(tree.insert(k));
        }
    });
}

// insert and delete helper fn
fn tree_insert_delete(count: usize, bench: &mut Bencher) {
    let keys = keys(count);
    bench.iter(|| {
        let mut tree = RbTree::new();
        let handles: Vec<_> = keys.iter().filter_map(|&k| tree.insert(k).ok()).collect();
        for h in handles {
            let _ignore = black_box(tree.delete(h));
        }
    });
}

fn bench_tree_insert(c: &mut Criterion) {
    c.bench_function("bench_tree_insert_100", |b| tree_insert(100, b));
    c.bench_function("bench_tree_insert_1000", |b| tree_insert(1000, b));
    c.bench_function("bench_tree_insert_10,000", |b| tree_insert(10_000, b));
    c.bench_function("bench_tree_insert_100,000", |b| tree_insert(100_000, b));
}

fn bench_tree_insert_delete(c: &mut Criterion) {
    c.bench_function("bench_tree_insert_delete_100", |b| {
        tree_insert_delete(100, b)
    });
    c.bench_function("bench_tree_insert_delete_1000", |b| {
        tree_insert_delete(1000, b)
    });
    c.bench_function("bench_tree_insert_delete_10,000", |b| {
        tree_insert_delete(10_000, b)
    });
    c.bench_function("bench_tree_insert_delete_100,000", |b| {
        tree_insert_delete(100_000, b)
    });
}

// find helper fn
fn tree_find(count: usize, bench: &mut Bencher) {
    let keys = keys(count);
    let mut tree = RbTree::new();
    for &k in &keys {
        let _ignore = tree.insert(k);
    }
    bench.iter(|| {
        for k in &keys {
            black_box(tree.find(k));
        }
    });
}

// in-order walk helper fn
fn tree_apply(count: usize, bench: &mut Bencher) {
    let mut tree = RbTree::new();
    for k in keys(count) {
        let _ignore = tree.insert(k);
    }
    bench.iter(|| {
        let mut sum = 0_u64;
        let _ignore = tree.apply(Order::InOrder, |k| {
            sum += u64::from(*k);
            ControlFlow::<()>::Continue(())
        });
        black_box(sum)
    });
}

fn bench_tree_find(c: &mut Criterion) {
    c.bench_function("bench_tree_find_1000", |b| tree_find(1000, b));
    c.bench_function("bench_tree_find_100,000", |b| tree_find(100_000, b));
}

fn bench_tree_apply(c: &mut Criterion) {
    c.bench_function("bench_tree_apply_1000", |b| tree_apply(1000, b));
    c.bench_function("bench_tree_apply_100,000", |b| tree_apply(100_000, b));
}

fn criterion_config() -> Criterion {
    Criterion::default().configure_from_args().without_plots()
}

criterion_group! {
    name = benches_basic_op;
    config = criterion_config();
    targets = bench_tree_insert, bench_tree_insert_delete,
}

criterion_group! {
    name = benches_lookup;
    config = criterion_config();
    targets = bench_tree_find, bench_tree_apply
}

criterion_main!(benches_basic_op, benches_lookup);
