use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use schema_graph::graph::{build_graph, SchemaGraph};
use schema_graph::layout::{apply_layout, LayoutAlgorithm, LayoutOptions};
use std::hint::black_box;
use test_data_gen::{Generator, Scale};

fn build_test_graph(scale: Scale) -> SchemaGraph {
    let mut gen = Generator::new(42, scale);
    let snapshot = gen.generate();
    build_graph(
        &snapshot.database,
        &snapshot.tables,
        &snapshot.relationships,
    )
}

fn bench_algorithms(c: &mut Criterion) {
    let graph = build_test_graph(Scale::Medium);

    let mut group = c.benchmark_group("layout_algorithms");
    group.throughput(Throughput::Elements(graph.nodes.len() as u64));

    for algorithm in [
        LayoutAlgorithm::Hierarchical,
        LayoutAlgorithm::ForceDirected,
        LayoutAlgorithm::Circular,
        LayoutAlgorithm::Grid,
    ] {
        let options = LayoutOptions {
            algorithm,
            ..Default::default()
        };

        group.bench_with_input(
            BenchmarkId::new("apply", algorithm.to_string()),
            &options,
            |b, options| {
                b.iter_with_setup(
                    || graph.clone(),
                    |mut graph| {
                        apply_layout(&mut graph, options);
                        black_box(graph)
                    },
                )
            },
        );
    }

    group.finish();
}

fn bench_hierarchical_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("hierarchical_scaling");
    group.sample_size(20);

    for scale in [Scale::Small, Scale::Medium, Scale::Large, Scale::XLarge] {
        let graph = build_test_graph(scale);
        let options = LayoutOptions::default();

        group.throughput(Throughput::Elements(graph.nodes.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("apply", format!("{}_tables", graph.nodes.len())),
            &graph,
            |b, graph| {
                b.iter_with_setup(
                    || graph.clone(),
                    |mut graph| {
                        apply_layout(&mut graph, &options);
                        black_box(graph)
                    },
                )
            },
        );
    }

    group.finish();
}

fn bench_force_directed_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("force_directed_scaling");
    group.sample_size(10);

    // Force-directed is quadratic in node count per iteration
    for scale in [Scale::Small, Scale::Medium, Scale::Large] {
        let graph = build_test_graph(scale);
        let options = LayoutOptions {
            algorithm: LayoutAlgorithm::ForceDirected,
            ..Default::default()
        };

        group.throughput(Throughput::Elements(graph.nodes.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("apply", format!("{}_tables", graph.nodes.len())),
            &graph,
            |b, graph| {
                b.iter_with_setup(
                    || graph.clone(),
                    |mut graph| {
                        apply_layout(&mut graph, &options);
                        black_box(graph)
                    },
                )
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_algorithms,
    bench_hierarchical_scaling,
    bench_force_directed_scaling,
);

criterion_main!(benches);
