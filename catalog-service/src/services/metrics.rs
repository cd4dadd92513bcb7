//! Metrics collection for catalog-service.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub const GENRES_CREATED_TOTAL: &str = "genres_created_total";
pub const GENRES_DELETED_TOTAL: &str = "genres_deleted_total";

/// Install the Prometheus recorder. Later calls are no-ops.
pub fn init_metrics() {
    if METRICS_HANDLE.get().is_some() {
        return;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            let _ = METRICS_HANDLE.set(handle);
        }
        Err(e) => {
            tracing::warn!("Failed to install Prometheus recorder: {}", e);
        }
    }
}

/// Get metrics output in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

pub fn record_genre_created() {
    ::metrics::counter!(GENRES_CREATED_TOTAL).increment(1);
}

pub fn record_genre_deleted() {
    ::metrics::counter!(GENRES_DELETED_TOTAL).increment(1);
}
