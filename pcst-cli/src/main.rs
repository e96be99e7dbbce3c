//! Minimal demonstration binary for `pcst-core`: reads a graph in a small
//! line-oriented text format, solves it, and prints the resulting vertex and
//! edge sets.
//!
//! Format: a header line `n m root num_clusters pruning` (`root` is `-1` for
//! none, `pruning` one of `none`/`simple`/`gw`/`strong`), then `m` edge lines
//! `u v cost`, then `n` prize values.

use pcst_types::Pruning;
use std::str::FromStr;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

fn main() {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(true)
                .with_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off")),
                ),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: pcst-cli <input.txt>");
        std::process::exit(1);
    }

    let contents = match std::fs::read_to_string(&args[1]) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to read {}: {}", args[1], e);
            std::process::exit(1);
        }
    };

    let mut tokens = contents.split_whitespace();
    let mut next = |what: &str| -> String {
        tokens.next().unwrap_or_else(|| {
            eprintln!("Malformed input: missing {what}");
            std::process::exit(1);
        }).to_string()
    };

    let n: usize = next("n").parse().expect("n must be an integer");
    let m: usize = next("m").parse().expect("m must be an integer");
    let root_raw: i64 = next("root").parse().expect("root must be an integer");
    let root = if root_raw < 0 { None } else { Some(root_raw as usize) };
    let num_clusters: usize = next("num_clusters").parse().expect("num_clusters must be an integer");
    let pruning = Pruning::from_str(&next("pruning")).unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    });

    let mut edges = Vec::with_capacity(m);
    let mut costs = Vec::with_capacity(m);
    for _ in 0..m {
        let u: usize = next("edge endpoint").parse().expect("edge endpoint must be an integer");
        let v: usize = next("edge endpoint").parse().expect("edge endpoint must be an integer");
        let cost: f64 = next("edge cost").parse().expect("edge cost must be a number");
        edges.push((u, v));
        costs.push(cost);
    }

    let mut prizes = Vec::with_capacity(n);
    for _ in 0..n {
        prizes.push(next("prize").parse().expect("prize must be a number"));
    }

    let start = std::time::Instant::now();
    match pcst_core::pcst(&edges, &prizes, &costs, root, num_clusters, pruning, 1) {
        Ok(solution) => {
            let elapsed = start.elapsed();
            println!("vertices: {:?}", solution.vertices);
            println!("edges: {:?}", solution.edges);
            eprintln!("Solved in {:.3}ms", elapsed.as_secs_f64() * 1000.0);
        }
        Err(e) => {
            eprintln!("Solve failed: {e}");
            std::process::exit(1);
        }
    }
}
