pub mod balance;
pub mod root;
pub mod total_received;
pub mod total_sent;
pub mod unconfirmed_balance;
pub mod utxo;

use crate::{
    addresses::validate_single, models::SummaryField, server::state::AppState, types::ApiResult,
};
use axum::Json;

/// Shared body of the single-amount routes.
async fn summary_field(state: &AppState, addr: &str, field: SummaryField) -> ApiResult<i64> {
    let address = validate_single(addr, &state.config.network)?;
    let amount = state.controller.summary_field(&address, field).await?;

    Ok(Json(amount))
}
