use crate::{server::state::AppState, types::ApiResult};
use axum::{Json, extract::State};
use serde_json::Value;

pub async fn route(State(state): State<AppState>) -> ApiResult<Value> {
    let address = state.controller.create_address().await?;

    Ok(Json(address))
}
