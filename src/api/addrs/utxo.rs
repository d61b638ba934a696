use super::{AddrsBody, resolve_addresses};
use crate::{
    addresses::AddressesPath, models::UtxoView, server::state::AppState, types::ApiResult,
};
use axum::{
    Json,
    extract::{Path, State},
};

pub async fn route(
    State(state): State<AppState>,
    Path(addresses_path): Path<AddressesPath>,
) -> ApiResult<Vec<UtxoView>> {
    let addresses = resolve_addresses(&state, None, Some(&addresses_path.addrs))?;

    Ok(Json(state.controller.multi_utxo(&addresses).await?))
}

pub async fn route_body(
    State(state): State<AppState>,
    AddrsBody(body): AddrsBody,
) -> ApiResult<Vec<UtxoView>> {
    let addresses = resolve_addresses(&state, Some(&body), None)?;

    Ok(Json(state.controller.multi_utxo(&addresses).await?))
}
