//! Live integration tests against a real OceanBase instance.
//!
//! Gated on environment variables so the suite passes cleanly without a
//! server. To run, point the tests at an instance:
//!
//! ```bash
//! export VECBENCH_TEST_HOST=127.0.0.1
//! export VECBENCH_TEST_PORT=2881
//! export VECBENCH_TEST_USER=root@perf
//! export VECBENCH_TEST_PASSWORD=
//! export VECBENCH_TEST_DATABASE=bench
//! cargo test -p vecbench-oceanbase --test live
//! ```

use vecbench_core::config::{Address, ConnectionConfig, IndexConfig, MetricType, Secret};
use vecbench_core::error::BenchError;
use vecbench_core::traits::{SearchFilter, VectorSession, VectorStore};
use vecbench_oceanbase::OceanBaseClient;

fn connection_from_env() -> Option<ConnectionConfig> {
    let host = std::env::var("VECBENCH_TEST_HOST").ok()?;
    let port = std::env::var("VECBENCH_TEST_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(2881);
    let user = std::env::var("VECBENCH_TEST_USER").unwrap_or_else(|_| "root@perf".to_string());
    let password = std::env::var("VECBENCH_TEST_PASSWORD").unwrap_or_default();
    let database = std::env::var("VECBENCH_TEST_DATABASE").unwrap_or_else(|_| "bench".to_string());

    let address = Address::from_parts(Some(&host), port, None).ok()?;
    Some(ConnectionConfig::new(
        address,
        user,
        Secret::new(password),
        database,
    ))
}

macro_rules! require_server {
    () => {
        match connection_from_env() {
            Some(connection) => connection,
            None => {
                eprintln!("skipping: VECBENCH_TEST_HOST not set");
                return;
            }
        }
    };
}

#[test]
fn test_lifecycle_insert_and_search() {
    let connection = require_server!();
    let index = IndexConfig::hnsw(MetricType::Cosine, 16, 200, Some(64));
    let client =
        OceanBaseClient::open(3, &connection, index, "vecbench_live_basic", true).unwrap();
    assert!(client.needs_normalization());
    client.ready_to_load().unwrap();

    let mut session = client.session().unwrap();
    let embeddings = vec![
        vec![1.0, 0.0, 0.0],
        vec![0.0, 1.0, 0.0],
        vec![0.0, 0.0, 1.0],
    ];
    let (count, err) = session.insert_embeddings(&embeddings, &[42, 7, 9]);
    assert_eq!(count, 3);
    assert!(err.is_none(), "insert failed: {:?}", err);

    let ids = session.search_embedding(&[1.0, 0.0, 0.0], 5, None).unwrap();
    assert_eq!(ids.first(), Some(&42));
    // Fewer rows than k is passed through unchanged.
    assert!(ids.len() <= 5);

    drop(session);
    client.optimize().unwrap();
}

#[test]
fn test_filtered_search_is_refused() {
    let connection = require_server!();
    let index = IndexConfig::hnsw(MetricType::Cosine, 16, 200, Some(64));
    let client =
        OceanBaseClient::open(3, &connection, index, "vecbench_live_filters", true).unwrap();

    let mut session = client.session().unwrap();
    let filter = SearchFilter {
        id_gte: Some(1),
        exprs: vec![],
    };
    let err = session
        .search_embedding(&[1.0, 0.0, 0.0], 5, Some(&filter))
        .unwrap_err();
    assert!(matches!(err, BenchError::UnsupportedOperation(_)));
}

#[test]
fn test_sessions_reopen_after_drop() {
    let connection = require_server!();
    let index = IndexConfig::hnsw(MetricType::Cosine, 16, 200, Some(64));
    let client =
        OceanBaseClient::open(2, &connection, index, "vecbench_live_sessions", true).unwrap();

    for round in 0..3 {
        let mut session = client.session().unwrap();
        let (count, err) =
            session.insert_embeddings(&[vec![round as f32, 1.0]], &[i64::from(round)]);
        assert_eq!(count, 1);
        assert!(err.is_none());
    }
}

#[test]
fn test_mismatched_lengths_report_zero_inserted() {
    let connection = require_server!();
    let index = IndexConfig::hnsw(MetricType::Cosine, 16, 200, Some(64));
    let client =
        OceanBaseClient::open(2, &connection, index, "vecbench_live_mismatch", true).unwrap();

    let mut session = client.session().unwrap();
    let (count, err) = session.insert_embeddings(&[vec![1.0, 0.0]], &[1, 2]);
    assert_eq!(count, 0);
    assert!(matches!(err, Some(BenchError::Config(_))));
}
