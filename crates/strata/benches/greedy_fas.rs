use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use strata::graphlib::{Graph, GraphOptions};
use strata::greedy_fas::greedy_fas;

/// Disjoint two-node cycles, so every node competes for the same bucket.
fn paired_cycles(n: usize) -> Graph<(), (), ()> {
    let mut g = Graph::new(GraphOptions::default());
    let half = n / 2;
    for i in 0..half {
        let (v, w) = (format!("n{i}"), format!("n{}", i + half));
        g.set_edge(v.clone(), w.clone());
        g.set_edge(w, v);
    }
    g
}

fn bench_greedy_fas(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy_fas");

    for n in [10_000usize, 20_000, 40_000] {
        let g = paired_cycles(n);
        group.bench_with_input(BenchmarkId::new("paired_cycles", n), &g, |b, g| {
            b.iter(|| black_box(greedy_fas(black_box(g)).len()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_greedy_fas);
criterion_main!(benches);
