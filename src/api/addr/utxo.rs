use crate::{
    addresses::{AddressPath, validate_single},
    models::UtxoView,
    server::state::AppState,
    types::ApiResult,
};
use axum::{
    Json,
    extract::{Path, State},
};

pub async fn route(
    State(state): State<AppState>,
    Path(address_path): Path<AddressPath>,
) -> ApiResult<Vec<UtxoView>> {
    let address = validate_single(&address_path.addr, &state.config.network)?;
    let utxos = state.controller.utxo(&address).await?;

    Ok(Json(utxos))
}
