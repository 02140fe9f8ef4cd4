//! Optional metrics instrumentation.
//!
//! When the `observe` feature is enabled, insert and search operations emit
//! counters and histograms via the [`metrics`] crate; a downstream binary
//! must install a recorder to collect them. Without the feature every
//! function here is a zero-cost no-op.

/// Record one committed insert batch.
///
/// - `vecbench.insert.batches_total` – counter
/// - `vecbench.insert.rows_total` – counter
/// - `vecbench.insert.batch_duration_seconds` – histogram
#[inline]
pub fn record_insert_batch(duration: std::time::Duration, rows: usize) {
    #[cfg(feature = "observe")]
    {
        metrics::counter!("vecbench.insert.batches_total").increment(1);
        metrics::counter!("vecbench.insert.rows_total").increment(rows as u64);
        metrics::histogram!("vecbench.insert.batch_duration_seconds")
            .record(duration.as_secs_f64());
    }
    #[cfg(not(feature = "observe"))]
    {
        let _ = (duration, rows);
    }
}

/// Record one search query.
///
/// - `vecbench.search.total` – counter with `outcome` label (`ok` / `fail`)
/// - `vecbench.search.duration_seconds` – histogram
#[inline]
pub fn record_search(duration: std::time::Duration, success: bool) {
    #[cfg(feature = "observe")]
    {
        let outcome = if success { "ok" } else { "fail" };
        metrics::counter!("vecbench.search.total", "outcome" => outcome).increment(1);
        metrics::histogram!("vecbench.search.duration_seconds").record(duration.as_secs_f64());
    }
    #[cfg(not(feature = "observe"))]
    {
        let _ = (duration, success);
    }
}

/// Record one session open.
///
/// - `vecbench.session.opens_total` – counter
#[inline]
pub fn record_session_open() {
    #[cfg(feature = "observe")]
    {
        metrics::counter!("vecbench.session.opens_total").increment(1);
    }
}
