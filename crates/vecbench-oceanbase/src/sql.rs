//! SQL statement construction.
//!
//! All statement text is assembled here, from validated identifiers and
//! adapter-formatted values only: ids are `i64`, vectors become `0x…` hex
//! literals, limits and breadths are integers. No untrusted string reaches
//! a statement.

use crate::params::SchemaParams;
use vecbench_core::error::{BenchError, Result};
use vecbench_core::vector;

/// Rows per INSERT statement, bounding statement size and memory.
pub const LOAD_BATCH_SIZE: usize = 1000;

/// Name of the vector index created on the embedding column.
pub const INDEX_NAME: &str = "vidx";

/// Validate a SQL identifier (table name) against an allow-list.
///
/// Only `[a-zA-Z_][a-zA-Z0-9_]*` up to 64 chars, so identifiers can be
/// interpolated into DDL and DML without quoting.
pub fn validate_identifier(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(BenchError::Config("table name must not be empty".into()));
    }
    if name.len() > 64 {
        return Err(BenchError::Config(format!(
            "table name must be 64 characters or fewer, got {}",
            name.len()
        )));
    }
    let mut chars = name.chars();
    let first = chars.next().unwrap(); // non-empty checked above
    if !first.is_ascii_alphabetic() && first != '_' {
        return Err(BenchError::Config(format!(
            "table name '{}' must start with a letter or underscore",
            name
        )));
    }
    for c in chars {
        if !c.is_ascii_alphanumeric() && c != '_' {
            return Err(BenchError::Config(format!(
                "table name '{}' contains invalid character '{}'",
                name, c
            )));
        }
    }
    Ok(())
}

pub fn drop_table(table: &str) -> String {
    format!("DROP TABLE IF EXISTS {}", table)
}

/// Table with an integer primary key, a fixed-width vector column, and a
/// vector index built from the translated schema parameters.
pub fn create_table(table: &str, dim: usize, schema: &SchemaParams) -> String {
    let build: Vec<String> = schema
        .build
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect();
    format!(
        "CREATE TABLE {table} (id INT, embedding vector({dim}), PRIMARY KEY(id), \
         VECTOR INDEX {index}(embedding) WITH (distance={distance}, type={ty}, lib={lib}, {build}))",
        table = table,
        dim = dim,
        index = INDEX_NAME,
        distance = schema.distance,
        ty = schema.index_type,
        lib = schema.lib,
        build = build.join(","),
    )
}

/// Session-scoped runtime search breadth for the HNSW index.
pub fn set_ef_search(ef_search: u32) -> String {
    format!("SET ob_hnsw_ef_search={}", ef_search)
}

/// One multi-row INSERT; each row is `(id, 0x<f32-le hex>)`.
pub fn insert_batch(table: &str, ids: &[i64], embeddings: &[Vec<f32>]) -> String {
    debug_assert_eq!(ids.len(), embeddings.len());
    let rows: Vec<String> = ids
        .iter()
        .zip(embeddings)
        .map(|(id, emb)| format!("({}, {})", id, vector::to_hex_literal(emb)))
        .collect();
    format!("INSERT INTO {} VALUES {}", table, rows.join(","))
}

/// Split a load into bounded INSERT statements, preserving order.
///
/// Returns `(statement, row_count)` pairs; `ceil(len / batch_size)` of them.
pub fn insert_batches(
    table: &str,
    ids: &[i64],
    embeddings: &[Vec<f32>],
    batch_size: usize,
) -> Vec<(String, usize)> {
    ids.chunks(batch_size)
        .zip(embeddings.chunks(batch_size))
        .map(|(id_chunk, emb_chunk)| (insert_batch(table, id_chunk, emb_chunk), id_chunk.len()))
        .collect()
}

/// Approximate top-`k` query, ordered by the translated distance function.
pub fn search(table: &str, distance_function: &str, query: &[f32], k: usize) -> String {
    format!(
        "SELECT /*+ opt_param('rowsets_max_rows', 256) */ id FROM {table} \
         ORDER BY {func}(embedding, {literal}) APPROXIMATE LIMIT {k}",
        table = table,
        func = distance_function,
        literal = vector::to_hex_literal(query),
        k = k,
    )
}
