#![allow(dead_code)]

pub mod mock_node;
pub mod mock_rpc_server;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use insight_platform::{
    config::{Config, NodeConfig},
    node::Node,
    server::build_with_node,
    types::Network,
};
use mock_node::MockNode;
use serde_json::Value;
use std::{
    sync::{Arc, LazyLock},
    time::Duration,
};
use tower::ServiceExt;
use tracing::Level;
use url::Url;

static INIT_LOGGING: LazyLock<()> = LazyLock::new(|| {
    tracing_subscriber::fmt::init();
});

pub fn initialize_logging() {
    LazyLock::force(&INIT_LOGGING);
}

pub fn test_config() -> Config {
    Config {
        server_address: "0.0.0.0".parse().unwrap(),
        server_port: 3001,
        api_prefix: "/insight-api".to_string(),
        log_level: Level::INFO,
        network: Network::Mainnet,
        node: NodeConfig {
            endpoint: Url::parse("http://127.0.0.1:1").unwrap(),
            request_timeout: Duration::from_secs(5),
        },
        no_metrics: false,
        enable_wallet: false,
        sentry_dsn: None,
    }
}

pub fn build_app(node: &MockNode) -> Router {
    build_app_with(test_config(), node)
}

pub fn build_app_with(config: Config, node: &MockNode) -> Router {
    let node: Arc<dyn Node> = Arc::new(node.clone());
    let (app, _) = build_with_node(Arc::new(config), node).expect("Failed to build the application");

    app
}

/// Mainnet pubkey-hash address over a hash filled with `fill`.
pub fn address(fill: u8) -> String {
    let mut payload = vec![30u8];
    payload.extend([fill; 20]);

    bs58::encode(payload).with_check().into_string()
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(
        app,
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await
}

pub async fn post_json(app: &Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn post_form(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

/// Non-JSON bodies come back as a JSON string.
async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Request failed");

    let status = response.status();
    let body_bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");

    let body = serde_json::from_slice(&body_bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body_bytes).to_string()));

    (status, body)
}
