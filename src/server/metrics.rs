use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::Arc;
use std::{sync::OnceLock, time::Duration};
use tokio::sync::RwLock;
use tracing::warn;

pub fn init_metrics(enable: bool) -> Option<Arc<RwLock<PrometheusHandle>>> {
    if enable {
        Some(setup_metrics_recorder())
    } else {
        None
    }
}

pub fn spawn_process_collector_if(enable: bool) {
    if enable {
        tokio::spawn(async {
            let collector = metrics_process::Collector::default();
            collector.describe();

            loop {
                collector.collect();
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
        });
    }
}

// to prevent multiple initialization of the metrics recorder, happens in tests
static HANDLER: OnceLock<Arc<RwLock<PrometheusHandle>>> = OnceLock::new();

pub fn setup_metrics_recorder() -> Arc<RwLock<PrometheusHandle>> {
    HANDLER.get_or_init(internal_setup).clone()
}

fn internal_setup() -> Arc<RwLock<PrometheusHandle>> {
    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();

    if let Err(e) = metrics::set_global_recorder(recorder) {
        warn!("Prometheus recorder not installed: {e}");
    }

    // Counters start at 0 so they show up under `GET /metrics` right after startup.

    describe_counter!(
        "http_requests_total",
        "HTTP calls made to the insight-platform API"
    );

    describe_counter!(
        "node_requests_total",
        "JSON-RPC calls made to the indexing node"
    );
    counter!("node_requests_total").absolute(0);

    describe_counter!(
        "node_request_failures_total",
        "JSON-RPC calls to the indexing node that ended with an error"
    );
    counter!("node_request_failures_total").absolute(0);

    Arc::new(RwLock::new(handle))
}
