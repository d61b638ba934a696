use crate::{
    addresses::{AddressPath, validate_single},
    models::AddressSummary,
    params::SummaryQuery,
    server::state::AppState,
    types::ApiResult,
};
use axum::{
    Json,
    extract::{Path, Query, State},
};

pub async fn route(
    State(state): State<AppState>,
    Path(address_path): Path<AddressPath>,
    Query(query): Query<SummaryQuery>,
) -> ApiResult<AddressSummary> {
    let address = validate_single(&address_path.addr, &state.config.network)?;
    let summary = state
        .controller
        .get_address_summary(&address, &query.options())
        .await?;

    Ok(Json(summary))
}
