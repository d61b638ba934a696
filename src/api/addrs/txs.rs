use super::{AddrsBody, resolve_addresses};
use crate::{
    addresses::AddressesPath,
    models::PagedHistory,
    params::{AddrsPayload, HistoryQuery, HistoryWindow},
    server::state::AppState,
    transactions::TransformOptions,
    types::ApiResult,
};
use axum::{
    Json,
    extract::{Path, Query, State},
};

pub async fn route(
    State(state): State<AppState>,
    Path(addresses_path): Path<AddressesPath>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<PagedHistory> {
    let addresses = resolve_addresses(&state, None, Some(&addresses_path.addrs))?;

    history(&state, &addresses, &query, None).await
}

pub async fn route_body(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
    AddrsBody(body): AddrsBody,
) -> ApiResult<PagedHistory> {
    let addresses = resolve_addresses(&state, Some(&body), None)?;

    history(&state, &addresses, &query, Some(&body)).await
}

async fn history(
    state: &AppState,
    addresses: &[String],
    query: &HistoryQuery,
    body: Option<&AddrsPayload>,
) -> ApiResult<PagedHistory> {
    let window = HistoryWindow::resolve(query, body);
    let options = TransformOptions::from_flags(
        query.no_asm.as_deref(),
        query.no_script_sig.as_deref(),
        query.no_spent.as_deref(),
    );

    let page = state
        .controller
        .multi_txs(addresses, window, options)
        .await?;

    Ok(Json(page))
}
