pub mod insight;
pub mod regular;

use super::state::{ApiPrefix, AppState};
use axum::Router;

/// `regular` always stays at `/`; `insight` goes under the prefix.
pub fn nest_routes(
    prefix: &ApiPrefix,
    regular: Router<AppState>,
    insight: Router<AppState>,
) -> Router<AppState> {
    if prefix.is_root() {
        regular.merge(insight)
    } else {
        regular.nest(&prefix.0, insight)
    }
}
