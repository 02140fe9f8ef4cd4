//! HNSW benchmark case: assemble configuration from flags, bulk-load
//! deterministic vectors, and time approximate top-k queries.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Args;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use vecbench_core::config::{Address, ConnectionConfig, IndexConfig, MetricType, Secret};
use vecbench_core::error::BenchError;
use vecbench_core::traits::{VectorSession, VectorStore};
use vecbench_oceanbase::OceanBaseClient;

#[derive(Args)]
pub struct HnswArgs {
    /// Server host
    #[arg(long)]
    host: Option<String>,

    /// Server port
    #[arg(long, default_value_t = 2881)]
    port: u16,

    /// Unix socket file path (mutually exclusive with --host)
    #[arg(long)]
    unix_socket: Option<String>,

    /// Database username
    #[arg(long, default_value = "root@perf")]
    user: String,

    /// Database password
    #[arg(long, env = "OB_PASSWORD", default_value = "", hide_env_values = true)]
    password: String,

    /// Database name
    #[arg(long)]
    database: String,

    /// Target table name
    #[arg(long, default_value = "items")]
    table: String,

    /// Vector dimensionality
    #[arg(long, default_value_t = 128)]
    dim: usize,

    /// Drop and recreate the table before loading
    #[arg(long)]
    drop_old: bool,

    /// Distance metric: l2, ip, or cosine
    #[arg(long, default_value = "cosine")]
    metric: MetricType,

    /// HNSW graph degree
    #[arg(short, long, default_value_t = 16)]
    m: u32,

    /// HNSW build-time search breadth
    #[arg(long, default_value_t = 200)]
    ef_construction: u32,

    /// HNSW query-time search breadth
    #[arg(long, default_value_t = 64)]
    ef_search: u32,

    /// Number of vectors to load
    #[arg(long, default_value_t = 10_000)]
    load: usize,

    /// Number of queries to run after loading
    #[arg(long, default_value_t = 100)]
    queries: usize,

    /// Result count per query
    #[arg(short, long, default_value_t = 10)]
    k: usize,

    /// Seed for the deterministic vector generator
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

pub fn execute(args: HnswArgs) -> Result<()> {
    let address = Address::from_parts(args.host.as_deref(), args.port, args.unix_socket.as_deref())?;
    let connection = ConnectionConfig::new(
        address,
        &args.user,
        Secret::new(args.password.clone()),
        &args.database,
    );
    let index = IndexConfig::hnsw(
        args.metric,
        args.m,
        args.ef_construction,
        Some(args.ef_search),
    );

    tracing::info!(table = %args.table, dim = args.dim, "opening benchmark client");
    let client = OceanBaseClient::open(args.dim, &connection, index, &args.table, args.drop_old)
        .context("failed to open benchmark client")?;

    let embeddings = generate_embeddings(args.load, args.dim, args.seed, client.needs_normalization());
    let ids: Vec<i64> = (0..args.load as i64).collect();

    client.ready_to_load()?;
    let mut session = client.session().context("failed to open session")?;

    let started = Instant::now();
    let (inserted, err) = session.insert_embeddings(&embeddings, &ids);
    let load_elapsed = started.elapsed();
    if let Some(source) = err {
        return Err(BenchError::partial_insert(inserted, source).into());
    }
    tracing::info!(inserted, elapsed = ?load_elapsed, "load complete");

    let mut latencies: Vec<Duration> = Vec::with_capacity(args.queries);
    let mut self_hits = 0usize;
    if !embeddings.is_empty() {
        for qi in 0..args.queries {
            let pick = qi % embeddings.len();
            let started = Instant::now();
            let result = session
                .search_embedding(&embeddings[pick], args.k, None)
                .context("search failed")?;
            latencies.push(started.elapsed());
            if result.first() == Some(&ids[pick]) {
                self_hits += 1;
            }
        }
    }

    drop(session);
    client.optimize()?;

    println!("\nHNSW Benchmark Case");
    println!("{}", "=".repeat(60));
    println!("Table: {} (dim {})", args.table, args.dim);
    println!(
        "Index: m={} ef_construction={} ef_search={}",
        args.m, args.ef_construction, args.ef_search
    );
    println!(
        "Load: {} vector(s) in {:.2}s ({:.0} rows/s)",
        inserted,
        load_elapsed.as_secs_f64(),
        inserted as f64 / load_elapsed.as_secs_f64().max(f64::EPSILON)
    );
    if latencies.is_empty() {
        println!("Search: skipped (nothing loaded)");
    } else {
        let (mean, p95) = summarize(&mut latencies);
        println!(
            "Search: {} queries, k={}, mean {:.2}ms, p95 {:.2}ms",
            args.queries,
            args.k,
            mean.as_secs_f64() * 1000.0,
            p95.as_secs_f64() * 1000.0
        );
        println!(
            "Top-1 self-recall: {:.1}%",
            100.0 * self_hits as f64 / args.queries as f64
        );
    }

    Ok(())
}

fn generate_embeddings(count: usize, dim: usize, seed: u64, normalize: bool) -> Vec<Vec<f32>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let mut v: Vec<f32> = (0..dim).map(|_| rng.gen_range(-1.0..1.0)).collect();
            if normalize {
                l2_normalize(&mut v);
            }
            v
        })
        .collect()
}

fn l2_normalize(v: &mut [f32]) {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

fn summarize(latencies: &mut [Duration]) -> (Duration, Duration) {
    latencies.sort_unstable();
    let total: Duration = latencies.iter().sum();
    let mean = total / latencies.len() as u32;
    let p95 = latencies[(latencies.len() * 95 / 100).min(latencies.len() - 1)];
    (mean, p95)
}
