//! Embedding vector codec.
//!
//! Vectors cross the SQL boundary as raw IEEE-754 f32 little-endian bytes,
//! written into statements as `0x…` hex literals. Encoding must be exact:
//! the engine stores the bytes verbatim and distance math runs on them.

use crate::error::{BenchError, Result};

/// A fixed-width embedding vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    data: Vec<f32>,
}

impl Vector {
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    pub fn dimension(&self) -> usize {
        self.data.len()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Serialize to the engine's storage bytes: each component as f32 LE.
    pub fn to_blob(&self) -> Vec<u8> {
        to_blob(&self.data)
    }

    /// Deserialize from storage bytes. Bit-for-bit exact.
    pub fn from_blob(blob: &[u8]) -> Result<Self> {
        if blob.len() % 4 != 0 {
            return Err(BenchError::Query(format!(
                "invalid vector blob length {} (must be a multiple of 4)",
                blob.len()
            )));
        }
        let data = blob
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();
        Ok(Self { data })
    }

    /// The `0x…` literal form used in INSERT and SELECT statements.
    pub fn to_hex_literal(&self) -> String {
        to_hex_literal(&self.data)
    }
}

impl From<Vec<f32>> for Vector {
    fn from(data: Vec<f32>) -> Self {
        Self::new(data)
    }
}

/// Encode a float slice as f32 LE bytes.
pub fn to_blob(data: &[f32]) -> Vec<u8> {
    data.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// Encode a float slice as a `0x…` hex literal for statement text.
pub fn to_hex_literal(data: &[f32]) -> String {
    format!("0x{}", hex::encode(to_blob(data)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_roundtrip_is_bit_exact() {
        let original = Vector::new(vec![
            0.1,
            -0.2,
            1.0,
            f32::MIN_POSITIVE,
            f32::MAX,
            -0.0,
            1e-40, // subnormal
        ]);
        let decoded = Vector::from_blob(&original.to_blob()).unwrap();
        assert_eq!(original.dimension(), decoded.dimension());
        for (a, b) in original.as_slice().iter().zip(decoded.as_slice()) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn test_blob_is_little_endian_f32() {
        let blob = Vector::new(vec![1.0]).to_blob();
        assert_eq!(blob, vec![0x00, 0x00, 0x80, 0x3f]);
    }

    #[test]
    fn test_hex_literal_format() {
        let literal = Vector::new(vec![1.0, 0.0]).to_hex_literal();
        assert_eq!(literal, "0x0000803f00000000");
    }

    #[test]
    fn test_invalid_blob_length_rejected() {
        assert!(Vector::from_blob(&[0u8, 1, 2]).is_err());
    }

    #[test]
    fn test_empty_vector() {
        let v = Vector::new(vec![]);
        assert_eq!(v.to_blob().len(), 0);
        assert_eq!(v.to_hex_literal(), "0x");
    }
}
