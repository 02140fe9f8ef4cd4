use crate::config::{ConnectionConfig, IndexConfig};
use crate::error::{BenchError, Result};
use serde::{Deserialize, Serialize};

/// Predicate attached to a search request by the harness.
///
/// Backends without filtered ANN support must refuse a non-empty filter
/// outright rather than silently running the query unfiltered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchFilter {
    /// Lower bound on the primary key (the harness's common filter case).
    #[serde(default)]
    pub id_gte: Option<i64>,

    /// Raw predicate fragments for engines that accept them.
    #[serde(default)]
    pub exprs: Vec<String>,
}

impl SearchFilter {
    pub fn is_empty(&self) -> bool {
        self.id_gte.is_none() && self.exprs.is_empty()
    }
}

/// One scoped connection lifetime: insert and search operations.
///
/// A session owns its connection exclusively and releases it on drop, on
/// every exit path. One outstanding operation at a time; no internal retry.
pub trait VectorSession {
    /// Bulk-insert embeddings paired positionally with integer ids.
    ///
    /// Insertion runs in bounded batches under autocommit, so it is not
    /// transactional: on the first failed batch the call stops and returns
    /// the number of rows already committed together with the error. Callers
    /// rely on the count to know how much data landed.
    fn insert_embeddings(
        &mut self,
        embeddings: &[Vec<f32>],
        ids: &[i64],
    ) -> (usize, Option<BenchError>);

    /// Approximate top-`k` nearest-neighbor search; returns ordered ids.
    ///
    /// The engine may return fewer than `k` rows; that is passed through
    /// unchanged. A non-empty filter fails with
    /// [`BenchError::UnsupportedOperation`] before any query is issued.
    fn search_embedding(
        &mut self,
        query: &[f32],
        k: usize,
        filters: Option<&SearchFilter>,
    ) -> Result<Vec<i64>>;
}

/// A benchmark-client adapter for one vector-database backend.
///
/// Constructed once per benchmark run; sessions are opened and torn down
/// repeatedly inside that lifetime. The intended pattern is one store per
/// worker, each with its own session; the store itself holds no connection.
pub trait VectorStore {
    type Session<'a>: VectorSession
    where
        Self: 'a;

    /// One-shot setup: validate configuration and, when `drop_old` is set,
    /// drop and recreate the target table and its vector index over a
    /// temporary connection that is closed before this returns.
    fn open(
        dim: usize,
        connection: &ConnectionConfig,
        index: IndexConfig,
        table: &str,
        drop_old: bool,
    ) -> Result<Self>
    where
        Self: Sized;

    /// Open a scoped session for inserts and searches.
    fn session(&self) -> Result<Self::Session<'_>>;

    /// Whether the harness's loader must L2-normalize vectors before insert.
    fn needs_normalization(&self) -> bool;

    /// Hook before bulk load. Safe to call for every backend.
    fn ready_to_load(&self) -> Result<()> {
        Ok(())
    }

    /// Hook after bulk load, for backends with an explicit index-build or
    /// compaction step. Safe to call for every backend.
    fn optimize(&self) -> Result<()> {
        Ok(())
    }
}
