//! Benchmarks for RefList vs Vec vs SmallVec
//!
//! Run with: `cargo bench --bench ref_list`

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use selene_collections::RefList;
use smallvec::SmallVec;

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("add");

    for size in [10, 100, 1_000, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::new("RefList", size), &size, |b, &size| {
            b.iter(|| {
                let mut list = RefList::new();
                for i in 0..size {
                    list.add(black_box(i));
                }
                black_box(list);
            });
        });

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &size| {
            b.iter(|| {
                let mut vec = Vec::new();
                for i in 0..size {
                    vec.push(black_box(i));
                }
                black_box(vec);
            });
        });

        group.bench_with_input(BenchmarkId::new("SmallVec<8>", size), &size, |b, &size| {
            b.iter(|| {
                let mut vec = SmallVec::<[i32; 8]>::new();
                for i in 0..size {
                    vec.push(black_box(i));
                }
                black_box(vec);
            });
        });
    }

    group.finish();
}

fn bench_insert_middle(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_middle");

    // Quadratic overall, so keep sizes modest.
    for size in [10, 100, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::new("RefList", size), &size, |b, &size| {
            b.iter(|| {
                let mut list = RefList::new();
                for i in 0..size {
                    list.insert(list.len() / 2, black_box(i));
                }
                black_box(list);
            });
        });

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &size| {
            b.iter(|| {
                let mut vec = Vec::new();
                for i in 0..size {
                    vec.insert(vec.len() / 2, black_box(i));
                }
                black_box(vec);
            });
        });
    }

    group.finish();
}

fn bench_remove_front(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_front");

    for size in [100, 1_000] {
        group.bench_with_input(BenchmarkId::new("RefList", size), &size, |b, &size| {
            b.iter(|| {
                let mut list: RefList<i32> = (0..size).collect();
                while !list.is_empty() {
                    black_box(list.remove_at(0));
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &size| {
            b.iter(|| {
                let mut vec: Vec<i32> = (0..size).collect();
                while !vec.is_empty() {
                    black_box(vec.remove(0));
                }
            });
        });
    }

    group.finish();
}

fn bench_index_of(c: &mut Criterion) {
    let list: RefList<i32> = (0..1_000).collect();
    let vec: Vec<i32> = (0..1_000).collect();

    c.bench_function("index_of_last_RefList", |b| {
        b.iter(|| black_box(list.index_of(black_box(&999))));
    });

    c.bench_function("position_last_Vec", |b| {
        b.iter(|| black_box(vec.iter().position(|x| *x == black_box(999))));
    });
}

criterion_group!(
    benches,
    bench_add,
    bench_insert_middle,
    bench_remove_front,
    bench_index_of
);
criterion_main!(benches);
