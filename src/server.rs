pub mod logging;
pub mod metrics;
pub mod routes;
pub mod state;

use crate::{
    config::Config,
    controller::AddressController,
    errors::{ApiError, AppError},
    middlewares::errors::error_middleware,
    node::{Node, rpc::RpcNode},
    transactions::InsightTransformer,
};
use axum::{Extension, Router, middleware::from_fn};
use self::metrics::{init_metrics, spawn_process_collector_if};
use self::routes::{insight::get_insight_api_routes, nest_routes, regular::get_regular_api_routes};
use self::state::{ApiPrefix, AppState};
use std::sync::Arc;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

/// Builds the router against the configured JSON-RPC node.
pub fn build(config: Arc<Config>) -> Result<(Router, ApiPrefix), AppError> {
    let node: Arc<dyn Node> = Arc::new(RpcNode::new(&config.node)?);

    build_with_node(config, node)
}

/// Builds the router against any [`Node`] implementation.
pub fn build_with_node(
    config: Arc<Config>,
    node: Arc<dyn Node>,
) -> Result<(Router, ApiPrefix), AppError> {
    // The recorder has to be in place before anything records a metric,
    // or the early data is lost.
    let metrics_handle = init_metrics(!config.no_metrics);

    let transformer = Arc::new(InsightTransformer);
    let controller = AddressController::new(node.clone(), transformer);

    let api_prefix = ApiPrefix(config.api_prefix.clone());

    let regular_api_routes = get_regular_api_routes(!config.no_metrics);
    let insight_api_routes = get_insight_api_routes(!config.no_metrics, config.enable_wallet);
    let api_routes = nest_routes(&api_prefix, regular_api_routes, insight_api_routes);

    let app_state = AppState {
        config: config.clone(),
        controller,
        node,
    };

    let inner = {
        let mut routes = api_routes
            .with_state(app_state)
            .layer(from_fn(error_middleware))
            .fallback(|| async { ApiError::not_found() });

        if let Some(prom_handler) = metrics_handle {
            routes = routes.layer(Extension(prom_handler));
        }

        routes
    };

    let inner = NormalizePathLayer::trim_trailing_slash().layer(inner);
    let app = Router::new().fallback_service(inner);

    Ok((app, api_prefix))
}

/// Process metrics only make sense for the long-running binary.
pub fn spawn_process_metrics(config: &Config) {
    spawn_process_collector_if(!config.no_metrics);
}
