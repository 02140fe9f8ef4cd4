//! Scoped insert/search session.
//!
//! A session owns its driver connection exclusively; dropping the session
//! closes the connection on every exit path. Inserts run under autocommit
//! and are not transactional across batches: the partial count is the
//! contract, never rolled back.

use std::time::Instant;

use mysql::prelude::Queryable;
use mysql::Conn;
use tracing::warn;

use crate::client::OceanBaseClient;
use crate::params::SearchParams;
use crate::sql;
use vecbench_core::error::{BenchError, Result};
use vecbench_core::observe;
use vecbench_core::traits::{SearchFilter, VectorSession};

#[derive(Debug)]
pub struct OceanBaseSession<'a> {
    client: &'a OceanBaseClient,
    conn: Conn,
    search: SearchParams,
}

impl<'a> OceanBaseSession<'a> {
    pub(crate) fn new(client: &'a OceanBaseClient, conn: Conn, search: SearchParams) -> Self {
        Self {
            client,
            conn,
            search,
        }
    }
}

/// Refuse filtered search outright; the engine's ANN path has no predicate
/// support, and silently ignoring a filter would corrupt recall numbers.
pub(crate) fn reject_filters(filters: Option<&SearchFilter>) -> Result<()> {
    match filters {
        Some(filter) if !filter.is_empty() => Err(BenchError::UnsupportedOperation(
            "filtered search is not supported".to_string(),
        )),
        _ => Ok(()),
    }
}

impl VectorSession for OceanBaseSession<'_> {
    fn insert_embeddings(
        &mut self,
        embeddings: &[Vec<f32>],
        ids: &[i64],
    ) -> (usize, Option<BenchError>) {
        if embeddings.len() != ids.len() {
            return (
                0,
                Some(BenchError::Config(format!(
                    "embeddings/ids length mismatch: {} vs {}",
                    embeddings.len(),
                    ids.len()
                ))),
            );
        }

        let mut inserted = 0;
        for (statement, rows) in
            sql::insert_batches(&self.client.table, ids, embeddings, sql::LOAD_BATCH_SIZE)
        {
            let started = Instant::now();
            if let Err(e) = self.conn.query_drop(&statement) {
                warn!(
                    table = %self.client.table,
                    inserted,
                    error = %e,
                    "insert batch failed; prior batches remain committed"
                );
                return (inserted, Some(BenchError::Query(e.to_string())));
            }
            observe::record_insert_batch(started.elapsed(), rows);
            inserted += rows;
        }
        (inserted, None)
    }

    fn search_embedding(
        &mut self,
        query: &[f32],
        k: usize,
        filters: Option<&SearchFilter>,
    ) -> Result<Vec<i64>> {
        reject_filters(filters)?;

        let statement = sql::search(
            &self.client.table,
            self.search.distance_function,
            query,
            k,
        );
        let started = Instant::now();
        let result = self
            .conn
            .query_map(&statement, |id: i64| id)
            .map_err(|e| BenchError::Query(e.to_string()));
        observe::record_search(started.elapsed(), result.is_ok());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_or_absent_filters_pass() {
        assert!(reject_filters(None).is_ok());
        assert!(reject_filters(Some(&SearchFilter::default())).is_ok());
    }

    #[test]
    fn test_non_empty_filters_rejected() {
        let filter = SearchFilter {
            id_gte: Some(10_000),
            exprs: vec![],
        };
        let err = reject_filters(Some(&filter)).unwrap_err();
        assert!(matches!(err, BenchError::UnsupportedOperation(_)));

        let filter = SearchFilter {
            id_gte: None,
            exprs: vec!["color = 'red'".to_string()],
        };
        assert!(reject_filters(Some(&filter)).is_err());
    }
}
