use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;
use strata::graphlib::GraphOptions;
use strata::{EdgeLabel, LayoutGraph, NodeLabel, layout};

/// Clusters of chained nodes with cross links between neighbouring clusters, so ordering has
/// crossings to remove and subgraph borders to respect.
fn clustered(clusters: usize, size: usize) -> LayoutGraph {
    let mut g = LayoutGraph::new(GraphOptions {
        compound: true,
        ..Default::default()
    });
    for c in 0..clusters {
        let sg = format!("sg{c}");
        g.set_node(sg.clone(), NodeLabel::default());
        for i in 0..size {
            let v = format!("c{c}n{i}");
            g.set_node(v.clone(), NodeLabel::new(60.0, 30.0));
            let _ = g.set_parent(v.clone(), sg.clone());
            if i > 0 {
                g.set_edge(format!("c{c}n{}", i - 1), v);
            }
        }
        if c > 0 {
            for i in (0..size.saturating_sub(1)).step_by(2) {
                g.set_edge_with_label(
                    format!("c{}n{i}", c - 1),
                    format!("c{c}n{}", size - 1 - i),
                    EdgeLabel {
                        width: 20.0,
                        height: 10.0,
                        ..Default::default()
                    },
                );
            }
        }
    }
    g
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    group.measurement_time(Duration::from_secs(10));

    for (name, clusters, size) in [("3x6", 3usize, 6usize), ("6x10", 6, 10)] {
        let g = clustered(clusters, size);
        group.bench_with_input(BenchmarkId::new("layout", name), &g, |b, g| {
            b.iter_batched(
                || g.clone(),
                |mut g| {
                    let _ = layout(black_box(&mut g));
                    black_box(g.graph().width);
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_layout);
criterion_main!(benches);
