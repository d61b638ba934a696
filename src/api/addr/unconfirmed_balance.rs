use super::summary_field;
use crate::{
    addresses::AddressPath, models::SummaryField, server::state::AppState, types::ApiResult,
};
use axum::extract::{Path, State};

pub async fn route(
    State(state): State<AppState>,
    Path(address_path): Path<AddressPath>,
) -> ApiResult<i64> {
    summary_field(&state, &address_path.addr, SummaryField::UnconfirmedBalanceSat).await
}
