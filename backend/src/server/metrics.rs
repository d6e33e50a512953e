//! Prometheus middleware serving `/metrics`.

use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};

/// Request counters and latency histograms, namespaced `hiring`.
///
/// # Errors
/// Returns [`std::io::Error`] when the collectors cannot be registered.
pub(crate) fn prometheus_middleware() -> std::io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new("hiring")
        .endpoint("/metrics")
        .build()
        .map_err(|err| std::io::Error::other(format!("metrics registration failed: {err}")))
}
