use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Unsupported index type: {0}")]
    UnsupportedIndex(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Partial insert: {inserted} row(s) committed before failure: {source}")]
    PartialInsert {
        /// Rows committed before the first failed batch.
        inserted: usize,
        source: Box<BenchError>,
    },

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, BenchError>;

impl BenchError {
    /// Wrap a batch failure together with the rows that already landed.
    ///
    /// Autocommit insertion is not transactional across batches, so callers
    /// that cannot carry the `(count, error)` pair forward fold it into this
    /// variant instead of dropping the count.
    pub fn partial_insert(inserted: usize, source: BenchError) -> Self {
        BenchError::PartialInsert {
            inserted,
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_insert_keeps_count_and_cause() {
        let err = BenchError::partial_insert(3000, BenchError::Query("duplicate key".into()));
        let msg = err.to_string();
        assert!(msg.contains("3000"));
        assert!(msg.contains("duplicate key"));
    }

    #[test]
    fn test_error_kinds_are_distinguishable() {
        assert!(matches!(
            BenchError::UnsupportedIndex("ivf_flat".into()),
            BenchError::UnsupportedIndex(_)
        ));
        assert!(matches!(
            BenchError::UnsupportedOperation("filtered search".into()),
            BenchError::UnsupportedOperation(_)
        ));
    }
}
