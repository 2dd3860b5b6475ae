use antflow::algorithm::{extract_paths, EdmondsKarp, FlowNetwork};
use antflow::{Graph, RoomId, Solver, SolverConfig};
use criterion::{criterion_group, criterion_main, Criterion};

/// n x n 网格，起点左上角，终点右下角
fn grid(n: usize) -> Graph {
    let mut graph = Graph::new();
    for r in 0..n {
        for c in 0..n {
            graph.add_room(format!("r{}c{}", r, c), None).unwrap();
        }
    }
    for r in 0..n {
        for c in 0..n {
            let id = RoomId::new(r * n + c);
            if c + 1 < n {
                graph.connect(id, RoomId::new(r * n + c + 1)).unwrap();
            }
            if r + 1 < n {
                graph.connect(id, RoomId::new((r + 1) * n + c)).unwrap();
            }
        }
    }
    // 起点与终点多连几条通道，让最大流大于 2
    for c in 1..n {
        graph.connect(RoomId::new(0), RoomId::new(n + c)).unwrap();
        graph
            .connect(RoomId::new(n * n - 1), RoomId::new((n - 2) * n + c - 1))
            .unwrap();
    }
    graph.set_start(RoomId::new(0));
    graph.set_end(RoomId::new(n * n - 1));
    graph
}

fn bench_max_flow(c: &mut Criterion) {
    let graph = grid(30);
    c.bench_function("max flow 30x30", |b| {
        b.iter(|| {
            let mut network = FlowNetwork::build(&graph, 100).unwrap();
            let (source, sink) = (network.source(), network.sink());
            EdmondsKarp::new(&mut network).max_flow(source, sink)
        })
    });
}

fn bench_extract(c: &mut Criterion) {
    let graph = grid(30);
    let mut network = FlowNetwork::build(&graph, 100).unwrap();
    let (source, sink) = (network.source(), network.sink());
    EdmondsKarp::new(&mut network).max_flow(source, sink);

    c.bench_function("extract paths 30x30", |b| b.iter(|| extract_paths(&network)));
}

fn bench_full_pipeline(c: &mut Criterion) {
    let graph = grid(30);
    c.bench_function("full pipeline 30x30, 500 ants", |b| {
        b.iter(|| Solver::new(SolverConfig::new(500)).solve(&graph).unwrap())
    });
}

criterion_group!(benches, bench_max_flow, bench_extract, bench_full_pipeline);
criterion_main!(benches);
