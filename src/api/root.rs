use crate::{server::state::AppState, types::Network};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub revision: String,
    pub network: Network,
    pub blocks: Option<i64>,
    pub errors: Vec<String>,
}

pub async fn route(State(state): State<AppState>) -> impl IntoResponse {
    let (blocks, errors) = match state.node.best_height().await {
        Ok(height) => (Some(height), vec![]),
        Err(e) => (None, vec![e.to_string()]),
    };

    let http_status = if errors.is_empty() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = RootResponse {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        revision: env!("GIT_REVISION").to_string(),
        network: state.config.network,
        blocks,
        errors,
    };

    (http_status, Json(response))
}
