//! OceanBase benchmark client.
//!
//! Stateful side of the adapter: construction-time schema setup over a
//! temporary connection, and per-session connection acquisition. The client
//! itself holds no connection; sessions own theirs exclusively.

use mysql::prelude::Queryable;
use mysql::{Conn, Opts, OptsBuilder};
use tracing::{debug, info};

use crate::params;
use crate::session::OceanBaseSession;
use crate::sql;
use vecbench_core::config::{Address, ConnectionConfig, IndexConfig, IndexParams};
use vecbench_core::error::{BenchError, Result};
use vecbench_core::observe;
use vecbench_core::traits::VectorStore;

#[derive(Debug)]
pub struct OceanBaseClient {
    pub(crate) dim: usize,
    pub(crate) table: String,
    pub(crate) connection: ConnectionConfig,
    pub(crate) index: IndexConfig,
}

impl OceanBaseClient {
    /// Open a driver connection using whichever addressing mode is configured.
    pub(crate) fn connect(cfg: &ConnectionConfig) -> Result<Conn> {
        let builder = OptsBuilder::new()
            .user(Some(cfg.user.as_str()))
            .pass(Some(cfg.password.expose()))
            .db_name(Some(cfg.database.as_str()));
        let builder = match &cfg.address {
            Address::Tcp { host, port } => {
                builder.ip_or_hostname(Some(host.as_str())).tcp_port(*port)
            }
            Address::Socket { path } => builder.socket(Some(path.as_str())),
        };
        Conn::new(Opts::from(builder)).map_err(|e| BenchError::Connection(e.to_string()))
    }

    fn create_schema(&self, conn: &mut Conn) -> Result<()> {
        info!(table = %self.table, "dropping and recreating table");
        conn.query_drop(sql::drop_table(&self.table))
            .map_err(|e| BenchError::Schema(e.to_string()))?;

        let schema = params::schema_params(&self.index);
        let ddl = sql::create_table(&self.table, self.dim, &schema);
        conn.query_drop(&ddl)
            .map_err(|e| BenchError::Schema(e.to_string()))?;
        info!(
            table = %self.table,
            dim = self.dim,
            index_type = schema.index_type,
            distance = schema.distance,
            "created table with vector index"
        );
        Ok(())
    }
}

impl VectorStore for OceanBaseClient {
    type Session<'a> = OceanBaseSession<'a>;

    fn open(
        dim: usize,
        connection: &ConnectionConfig,
        index: IndexConfig,
        table: &str,
        drop_old: bool,
    ) -> Result<Self> {
        sql::validate_identifier(table)?;
        index.validate()?;

        let client = Self {
            dim,
            table: table.to_string(),
            connection: connection.clone(),
            index,
        };
        debug!(connection = ?client.connection, index = ?client.index, "client configuration");

        // Temporary connection for setup; closed (dropped) before returning
        // so schema setup never overlaps session traffic.
        let mut conn = Self::connect(&client.connection)?;
        if drop_old {
            client.create_schema(&mut conn)?;
        }
        drop(conn);

        Ok(client)
    }

    /// Open a scoped insert/search session.
    ///
    /// Search parameters are resolved before any connection is opened, so a
    /// misconfigured index never leaves a dangling handle: an index flavor
    /// without a session breadth variable is unsupported, and an HNSW index
    /// without `ef_search` cannot be queried.
    fn session(&self) -> Result<OceanBaseSession<'_>> {
        let search = params::search_params(&self.index);
        let ef_search = match &self.index.params {
            IndexParams::Hnsw(_) => search.ef_search.ok_or_else(|| {
                BenchError::Config(
                    "ef_search is required to open a query session on an hnsw index".to_string(),
                )
            })?,
            other => {
                return Err(BenchError::UnsupportedIndex(format!(
                    "index type '{}' has no session search parameters",
                    other.type_tag()
                )))
            }
        };

        let mut conn = Self::connect(&self.connection)?;
        conn.query_drop("SET autocommit=1")
            .map_err(|e| BenchError::Connection(e.to_string()))?;
        conn.query_drop(sql::set_ef_search(ef_search))
            .map_err(|e| BenchError::Connection(e.to_string()))?;

        observe::record_session_open();
        debug!(table = %self.table, ef_search, "session opened");
        Ok(OceanBaseSession::new(self, conn, search))
    }

    fn needs_normalization(&self) -> bool {
        params::needs_normalization(self.index.metric)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vecbench_core::config::{MetricType, Secret};

    fn connection() -> ConnectionConfig {
        ConnectionConfig::new(
            Address::from_parts(Some("127.0.0.1"), 2881, None).unwrap(),
            "root@perf",
            Secret::new(""),
            "bench",
        )
    }

    // Construction validates before it connects, so bad input fails fast
    // even with no server behind the address.
    #[test]
    fn test_open_rejects_invalid_table_before_connecting() {
        let index = IndexConfig::hnsw(MetricType::Cosine, 16, 200, Some(64));
        let err =
            OceanBaseClient::open(4, &connection(), index, "items; DROP TABLE x", true).unwrap_err();
        assert!(matches!(err, BenchError::Config(_)));
    }

    #[test]
    fn test_open_rejects_invalid_index_before_connecting() {
        let index = IndexConfig::hnsw(MetricType::Cosine, 0, 200, None);
        let err = OceanBaseClient::open(4, &connection(), index, "items", true).unwrap_err();
        assert!(matches!(err, BenchError::Config(_)));
    }

    fn client_without_server(index: IndexConfig) -> OceanBaseClient {
        OceanBaseClient {
            dim: 4,
            table: "items".to_string(),
            connection: connection(),
            index,
        }
    }

    #[test]
    fn test_session_requires_ef_search() {
        let client = client_without_server(IndexConfig::hnsw(MetricType::Cosine, 16, 200, None));
        let err = client.session().unwrap_err();
        assert!(matches!(err, BenchError::Config(_)));
    }

    #[test]
    fn test_session_rejects_unsupported_flavor() {
        let client = client_without_server(IndexConfig::ivf_flat(MetricType::L2, 128));
        let err = client.session().unwrap_err();
        assert!(matches!(err, BenchError::UnsupportedIndex(_)));
    }

    #[test]
    fn test_needs_normalization_follows_metric() {
        let cosine = client_without_server(IndexConfig::hnsw(MetricType::Cosine, 16, 200, None));
        assert!(cosine.needs_normalization());
        let l2 = client_without_server(IndexConfig::hnsw(MetricType::L2, 16, 200, None));
        assert!(!l2.needs_normalization());
    }
}
