use criterion::{criterion_group, criterion_main, Criterion};
use pcst_types::Pruning;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

/// A random connected-ish graph: a spanning path plus extra random chords, so
/// every size has a reasonable mix of forced and optional edges to grow over.
fn random_instance(n: usize, extra_edges: usize, seed: u64) -> (Vec<(usize, usize)>, Vec<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut edges = Vec::with_capacity(n - 1 + extra_edges);
    for v in 1..n {
        edges.push((v - 1, v));
    }
    for _ in 0..extra_edges {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        if u != v {
            edges.push((u, v));
        }
    }
    let costs: Vec<f64> = edges.iter().map(|_| rng.gen_range(1.0..10.0)).collect();
    let prizes: Vec<f64> = (0..n).map(|_| rng.gen_range(0.0..20.0)).collect();
    (edges, prizes, costs)
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");

    for &n in &[50usize, 200, 1000] {
        let (edges, prizes, costs) = random_instance(n, n / 2, n as u64);
        for pruning in [Pruning::None, Pruning::Simple, Pruning::Gw, Pruning::Strong] {
            group.bench_function(format!("n={n}/{pruning}"), |b| {
                b.iter(|| {
                    pcst_core::pcst(
                        black_box(&edges),
                        black_box(&prizes),
                        black_box(&costs),
                        None,
                        black_box(1),
                        pruning,
                        0,
                    )
                    .expect("solve failed")
                })
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_solve);
criterion_main!(benches);
