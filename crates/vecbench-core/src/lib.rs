//! Vecbench Core: the adapter protocol for vector-database benchmarking
//!
//! This crate defines the contract every backend client must satisfy so a
//! benchmarking harness can treat heterogeneous vector engines
//! interchangeably:
//! - Configuration: validated connection and index-flavor descriptions
//! - Vector codec: exact IEEE-754 f32 LE encoding for the SQL boundary
//! - Collaborator traits: store construction, scoped sessions, bulk insert,
//!   approximate top-k search, and post-load hooks
//! - Errors: one typed enum, no implicit retries, partial results explicit
//!
//! Backend crates (e.g. the OceanBase client) implement the traits; the
//! harness and CLI consume them through this crate alone.

pub mod config;
pub mod error;
pub mod observe;
pub mod traits;
pub mod vector;

pub use config::{
    Address, ConnectionConfig, HnswParams, IndexConfig, IndexParams, IvfFlatParams, MetricType,
    Secret,
};
pub use error::{BenchError, Result};
pub use traits::{SearchFilter, VectorSession, VectorStore};
pub use vector::Vector;
