use crate::api::{addr, addrs, createaddress};
use crate::middlewares::metrics::track_http_metrics;
use crate::server::state::AppState;
use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};

/// Insight address API, mounted under the configured prefix.
#[rustfmt::skip]
pub fn get_insight_api_routes(enable_metrics: bool, enable_wallet: bool) -> Router<AppState> {
    let mut router = Router::new()
        // addr
        .route("/addr/{addr}", get(addr::root::route))
        .route("/addr/{addr}/utxo", get(addr::utxo::route))
        .route("/addr/{addr}/balance", get(addr::balance::route))
        .route("/addr/{addr}/totalReceived", get(addr::total_received::route))
        .route("/addr/{addr}/totalSent", get(addr::total_sent::route))
        .route("/addr/{addr}/unconfirmedBalance", get(addr::unconfirmed_balance::route))

        // addrs
        .route("/addrs/{addrs}/utxo", get(addrs::utxo::route))
        .route("/addrs/utxo", post(addrs::utxo::route_body))
        .route("/addrs/{addrs}/utxoWithoutMempool", get(addrs::utxo_without_mempool::route))
        .route("/addrs/utxoWithoutMempool", post(addrs::utxo_without_mempool::route_body))
        .route("/addrs/{addrs}/txs", get(addrs::txs::route))
        .route("/addrs/txs", post(addrs::txs::route_body))
        .route("/addrs/{addrs}/balance", get(addrs::balance::route))
        .route("/addrs/balance", post(addrs::balance::route_body))
        .route("/addrs/{addrs}/listunspent", get(addrs::listunspent::route))
        .route("/addrs/listunspent", post(addrs::listunspent::route_body));

    if enable_wallet {
        router = router.route("/createaddress", get(createaddress::route));
    }

    if enable_metrics {
        router = router.route_layer(from_fn(track_http_metrics));
    }

    router
}
