use crate::error::{BenchError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Abstract distance metric requested by a benchmark case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
    /// Euclidean distance (L2 norm)
    L2,
    /// Inner product (for normalized vectors)
    InnerProduct,
    /// Cosine similarity
    #[default]
    Cosine,
}

impl FromStr for MetricType {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "l2" | "euclidean" => Ok(MetricType::L2),
            "ip" | "inner_product" => Ok(MetricType::InnerProduct),
            "cosine" => Ok(MetricType::Cosine),
            other => Err(BenchError::Config(format!(
                "unknown metric '{}': expected l2, ip, or cosine",
                other
            ))),
        }
    }
}

/// Build/search parameters for the hierarchical-graph (HNSW) index flavor.
///
/// `ef_search` is optional at build time: an index without it can be created
/// and loaded, but a query session cannot be opened until it is set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HnswParams {
    /// Graph degree
    pub m: u32,
    /// Build-time search breadth
    pub ef_construction: u32,
    /// Query-time search breadth
    #[serde(default)]
    pub ef_search: Option<u32>,
}

/// Build parameters for the inverted-file (IVF) index flavor.
///
/// Schema-expressible only: the engine's runtime search-breadth variable is
/// wired for HNSW, so sessions over an IVF index are refused.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct IvfFlatParams {
    /// Number of coarse clusters
    pub nlist: u32,
}

/// Flavor-specific parameter sets, one variant per supported index flavor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexParams {
    Hnsw(HnswParams),
    IvfFlat(IvfFlatParams),
}

impl IndexParams {
    /// Engine-side index type tag used in schema DDL.
    pub fn type_tag(&self) -> &'static str {
        match self {
            IndexParams::Hnsw(_) => "hnsw",
            IndexParams::IvfFlat(_) => "ivf_flat",
        }
    }
}

fn default_lib() -> String {
    "vsag".to_string()
}

/// One index flavor: metric, backing library, and flavor parameters.
///
/// Immutable once validated; shared read-only by the client across sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    #[serde(default)]
    pub metric: MetricType,

    /// Implementation library tag passed through to schema DDL.
    #[serde(default = "default_lib")]
    pub lib: String,

    pub params: IndexParams,
}

impl IndexConfig {
    pub fn hnsw(metric: MetricType, m: u32, ef_construction: u32, ef_search: Option<u32>) -> Self {
        Self {
            metric,
            lib: default_lib(),
            params: IndexParams::Hnsw(HnswParams {
                m,
                ef_construction,
                ef_search,
            }),
        }
    }

    pub fn ivf_flat(metric: MetricType, nlist: u32) -> Self {
        Self {
            metric,
            lib: default_lib(),
            params: IndexParams::IvfFlat(IvfFlatParams { nlist }),
        }
    }

    pub fn with_lib(mut self, lib: impl Into<String>) -> Self {
        self.lib = lib.into();
        self
    }

    /// Fail-fast parameter validation, run before any DDL is issued.
    ///
    /// All declared build/search parameters must be positive integers.
    pub fn validate(&self) -> Result<()> {
        if self.lib.is_empty() {
            return Err(BenchError::Config("index lib tag must not be empty".into()));
        }
        match &self.params {
            IndexParams::Hnsw(p) => {
                if p.m == 0 {
                    return Err(BenchError::Config("hnsw m must be positive".into()));
                }
                if p.ef_construction == 0 {
                    return Err(BenchError::Config(
                        "hnsw ef_construction must be positive".into(),
                    ));
                }
                if p.ef_search == Some(0) {
                    return Err(BenchError::Config("hnsw ef_search must be positive".into()));
                }
            }
            IndexParams::IvfFlat(p) => {
                if p.nlist == 0 {
                    return Err(BenchError::Config("ivf_flat nlist must be positive".into()));
                }
            }
        }
        Ok(())
    }
}
