use super::{AddrsBody, resolve_addresses};
use crate::{
    addresses::AddressesPath, models::BalanceSum, server::state::AppState, types::ApiResult,
};
use axum::{
    Json,
    extract::{Path, State},
};

pub async fn route(
    State(state): State<AppState>,
    Path(addresses_path): Path<AddressesPath>,
) -> ApiResult<BalanceSum> {
    let addresses = resolve_addresses(&state, None, Some(&addresses_path.addrs))?;
    let balance = state.controller.balance_sum(&addresses).await?;

    Ok(Json(balance))
}

pub async fn route_body(
    State(state): State<AppState>,
    AddrsBody(body): AddrsBody,
) -> ApiResult<BalanceSum> {
    let addresses = resolve_addresses(&state, Some(&body), None)?;
    let balance = state.controller.balance_sum(&addresses).await?;

    Ok(Json(balance))
}
