use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics::counter;

/// Counts requests by method, route template and status.
pub async fn track_http_metrics(request: Request, next: Next) -> Response {
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let method = request.method().to_string();

    let response = next.run(request).await;
    let status = response.status().as_u16().to_string();

    counter!("http_requests_total", "method" => method, "path" => path, "status" => status)
        .increment(1);

    response
}
