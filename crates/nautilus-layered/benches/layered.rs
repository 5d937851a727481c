use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use nautilus_layered::{LayerEdge, LayerGraph, LayoutSettings, RankDir, Side, layout};
use std::hint::black_box;
use std::time::Duration;

fn build_graph(name: &str, node_count: usize, fanout: usize) -> LayerGraph {
    let mut g = LayerGraph::new();
    for i in 0..node_count {
        g.set_node(format!("{name}_n{i}"), 120.0 + (i % 5) as f64 * 10.0, 36.0);
    }

    // A spine to guarantee connectivity.
    for i in 0..node_count.saturating_sub(1) {
        g.add_edge(LayerEdge::new(format!("{name}_n{i}"), format!("{name}_n{}", i + 1)));
    }

    for i in 0..node_count {
        for k in 2..=(fanout + 1) {
            let to = i.saturating_add(k);
            if to >= node_count {
                break;
            }
            g.add_edge(LayerEdge::new(format!("{name}_n{i}"), format!("{name}_n{to}")));
        }

        // Every seventh node gets a sibling hanging off its right side.
        if i % 7 == 0 && i + 3 < node_count {
            g.add_edge(
                LayerEdge::new(format!("{name}_n{i}"), format!("{name}_n{}", i + 3))
                    .with_sides(Some(Side::Right), Some(Side::Left)),
            );
        }
    }

    g
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layered");
    group.measurement_time(Duration::from_secs(10));

    let cases = [
        ("flat_50_f2", 50usize, 2usize),
        ("flat_200_f3", 200usize, 3usize),
        ("flat_400_f3", 400usize, 3usize),
    ];

    for (name, nodes, fanout) in cases {
        let g = build_graph(name, nodes, fanout);
        for rankdir in [RankDir::TB, RankDir::LR] {
            let settings = LayoutSettings {
                rankdir,
                ..Default::default()
            };
            group.bench_with_input(
                BenchmarkId::new(format!("layout/{rankdir:?}"), name),
                &g,
                |b, g| {
                    b.iter(|| {
                        let out = layout(black_box(g), &settings);
                        black_box(out.width);
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_layout);
criterion_main!(benches);
