pub mod balance;
pub mod listunspent;
pub mod txs;
pub mod utxo;
pub mod utxo_without_mempool;

use crate::{
    addresses::{split_addresses, validate_many},
    errors::ApiError,
    params::AddrsPayload,
    server::state::AppState,
};
use axum::{
    Form,
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Body of the `POST /addrs/...` routes, form-encoded or JSON.
///
/// An empty body is an empty payload; the missing-address check is left to
/// address validation.
#[derive(Debug, Clone, Default)]
pub struct AddrsBody(pub AddrsPayload);

impl<S> FromRequest<S> for AddrsBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|content_type| content_type.starts_with(FORM_CONTENT_TYPE));

        if is_form {
            let Form(payload) = Form::<AddrsPayload>::from_request(req, state)
                .await
                .map_err(|e| ApiError::validation(e.body_text()))?;

            return Ok(Self(payload));
        }

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::validation(e.body_text()))?;

        if body.is_empty() {
            return Ok(Self::default());
        }

        serde_json::from_slice(&body)
            .map(Self)
            .map_err(|e| ApiError::validation(format!("Invalid request body: {e}")))
    }
}

/// Validated address list, the body's `addrs` winning over the path.
fn resolve_addresses(
    state: &AppState,
    body: Option<&AddrsPayload>,
    path: Option<&str>,
) -> Result<Vec<String>, ApiError> {
    let addresses = split_addresses(body.and_then(|b| b.addrs.as_deref()), path);

    validate_many(addresses, &state.config.network)
}
