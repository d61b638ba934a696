use super::{AddrsBody, resolve_addresses};
use crate::{
    addresses::AddressesPath,
    params::{ConfirmationBounds, UnspentQuery},
    server::state::AppState,
    types::ApiResult,
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::Value;

pub async fn route(
    State(state): State<AppState>,
    Path(addresses_path): Path<AddressesPath>,
    Query(query): Query<UnspentQuery>,
) -> ApiResult<Value> {
    let addresses = resolve_addresses(&state, None, Some(&addresses_path.addrs))?;
    let bounds = ConfirmationBounds::resolve(&query, None);

    Ok(Json(state.controller.list_unspent(&addresses, bounds).await?))
}

pub async fn route_body(
    State(state): State<AppState>,
    Query(query): Query<UnspentQuery>,
    AddrsBody(body): AddrsBody,
) -> ApiResult<Value> {
    let addresses = resolve_addresses(&state, Some(&body), None)?;
    let bounds = ConfirmationBounds::resolve(&query, Some(&body));

    Ok(Json(state.controller.list_unspent(&addresses, bounds).await?))
}
