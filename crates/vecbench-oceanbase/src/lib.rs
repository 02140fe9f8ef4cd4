//! OceanBase benchmark-client adapter.
//!
//! Implements the vecbench collaborator contract against an OceanBase-style
//! SQL engine with a native vector index, over the MySQL protocol:
//! - Schema: `vector(dim)` column plus a `VECTOR INDEX … WITH (…)` clause
//!   built from the translated index parameters
//! - Load: multi-row INSERTs in bounded batches, vectors as `0x…` f32-LE
//!   hex literals, partial success reported with an exact count
//! - Search: approximate top-k `SELECT … ORDER BY l2_distance(…) APPROXIMATE
//!   LIMIT k`, with the session-scoped `ob_hnsw_ef_search` breadth set at
//!   session open

pub mod client;
pub mod params;
pub mod session;
pub mod sql;

pub use client::OceanBaseClient;
pub use params::{SchemaParams, SearchParams};
pub use session::OceanBaseSession;
