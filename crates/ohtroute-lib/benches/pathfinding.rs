use criterion::{criterion_group, criterion_main, Criterion};
use ohtroute_lib::{
    build_graph, plan_route, read_layout, LayoutGraph, RouteAlgorithm, RouteFormat, RouteRequest,
};
use once_cell::sync::Lazy;
use std::hint::black_box;
use std::path::PathBuf;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/main_layout.json")
}

static GRAPH: Lazy<LayoutGraph> = Lazy::new(|| {
    let layout = read_layout(&fixture_path()).expect("fixture loads");
    build_graph(&layout).expect("fixture graph builds")
});
static ASTAR_REQUEST: Lazy<RouteRequest> = Lazy::new(|| RouteRequest::new("B1", "H11"));
static DIJKSTRA_REQUEST: Lazy<RouteRequest> = Lazy::new(|| {
    RouteRequest::new("B1", "H11").with_algorithm(RouteAlgorithm::Dijkstra)
});
static SIMPLE_REQUEST: Lazy<RouteRequest> =
    Lazy::new(|| RouteRequest::new("B1", "C3-L").with_format(RouteFormat::Simple));

fn benchmark_pathfinding(c: &mut Criterion) {
    let graph = &*GRAPH;

    c.bench_function("build_graph_main_layout", |b| {
        let layout = read_layout(&fixture_path()).expect("fixture loads");
        b.iter(|| {
            let graph = build_graph(black_box(&layout)).expect("graph builds");
            black_box(graph.edge_count())
        });
    });

    c.bench_function("astar_b1_h11", |b| {
        let request = &*ASTAR_REQUEST;
        b.iter(|| {
            let plan = plan_route(graph, request).expect("route exists");
            black_box(plan.hop_count())
        });
    });

    c.bench_function("dijkstra_b1_h11", |b| {
        let request = &*DIJKSTRA_REQUEST;
        b.iter(|| {
            let plan = plan_route(graph, request).expect("route exists");
            black_box(plan.total_cost)
        });
    });

    c.bench_function("astar_simple_b1_c3l", |b| {
        let request = &*SIMPLE_REQUEST;
        b.iter(|| {
            let plan = plan_route(graph, request).expect("route exists");
            black_box(plan.steps.len())
        });
    });
}

criterion_group!(benches, benchmark_pathfinding);
criterion_main!(benches);
