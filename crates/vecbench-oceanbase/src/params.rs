//! Index parameter translation.
//!
//! Pure mapping from the abstract metric/flavor choice to the engine's
//! schema and query parameters. No I/O, no state; presence of optional
//! search parameters is enforced at the client boundary, not here.

use vecbench_core::config::{IndexConfig, IndexParams, MetricType};

/// Distance metric name used in schema DDL (`WITH (distance=…)`).
pub fn distance_name(metric: MetricType) -> &'static str {
    match metric {
        MetricType::L2 => "l2",
        MetricType::InnerProduct => "inner_product",
        MetricType::Cosine => "cosine",
    }
}

/// Query-time distance function used in `ORDER BY`.
///
/// Always `l2_distance`, for every metric: vectors are L2-normalized by the
/// loader when the metric is cosine or inner-product (see
/// [`needs_normalization`]), and Euclidean ranking on normalized vectors is
/// rank-equivalent to both.
pub fn distance_function(_metric: MetricType) -> &'static str {
    "l2_distance"
}

/// True when the loader must L2-normalize vectors before insertion.
///
/// The adapter itself never normalizes.
pub fn needs_normalization(metric: MetricType) -> bool {
    matches!(metric, MetricType::InnerProduct | MetricType::Cosine)
}

/// Schema-side index parameters, taken verbatim into the DDL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaParams {
    pub distance: &'static str,
    pub index_type: &'static str,
    pub lib: String,
    /// Flavor build parameters in DDL order, e.g. `[(m, 16), (ef_construction, 200)]`.
    pub build: Vec<(&'static str, u32)>,
}

/// Session-side search parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParams {
    pub distance_function: &'static str,
    /// Runtime search breadth; `None` when unset or when the flavor has no
    /// session-scoped breadth variable.
    pub ef_search: Option<u32>,
}

/// Map an index config to its schema DDL parameters. Total over all flavors.
pub fn schema_params(cfg: &IndexConfig) -> SchemaParams {
    let build = match &cfg.params {
        IndexParams::Hnsw(p) => vec![("m", p.m), ("ef_construction", p.ef_construction)],
        IndexParams::IvfFlat(p) => vec![("nlist", p.nlist)],
    };
    SchemaParams {
        distance: distance_name(cfg.metric),
        index_type: cfg.params.type_tag(),
        lib: cfg.lib.clone(),
        build,
    }
}

/// Map an index config to its query-time parameters. Total over all flavors.
pub fn search_params(cfg: &IndexConfig) -> SearchParams {
    let ef_search = match &cfg.params {
        IndexParams::Hnsw(p) => p.ef_search,
        IndexParams::IvfFlat(_) => None,
    };
    SearchParams {
        distance_function: distance_function(cfg.metric),
        ef_search,
    }
}
