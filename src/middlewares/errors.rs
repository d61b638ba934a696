use crate::errors::{ApiError, ErrorResponse};
use axum::{
    body::{Body, Bytes, to_bytes},
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use sentry::{
    Breadcrumb, Level,
    protocol::{Event, Exception},
};
use std::convert::Infallible;

/// Logs every failed request and reports server errors to Sentry.
///
/// Bodies are passed through unchanged; a body that cannot be read becomes a
/// transform error.
pub async fn error_middleware(request: Request, next: Next) -> Result<Response, Infallible> {
    let request_path = request.uri().path().to_string();
    let request_uri = request.uri().to_string();
    let response = next.run(request).await;
    let status_code = response.status();

    if status_code.is_server_error() {
        handle_server_error(response, &request_path, &request_uri, status_code).await
    } else if status_code.is_client_error() {
        log_client_error(response, &request_path, &request_uri, status_code).await
    } else {
        Ok(response)
    }
}

async fn handle_server_error(
    response: Response,
    request_path: &str,
    request_uri: &str,
    status_code: StatusCode,
) -> Result<Response, Infallible> {
    let (parts, body) = response.into_parts();

    match to_bytes(body, usize::MAX).await {
        Ok(bytes) => {
            parse_and_log_error(&bytes, request_path, request_uri, status_code);

            Ok(Response::from_parts(parts, Body::from(bytes)))
        },
        Err(e) => {
            log_and_capture_error(
                "Failed to read body",
                e,
                request_path,
                request_uri,
                status_code,
            );

            Ok(unreadable_body().into_response())
        },
    }
}

async fn log_client_error(
    response: Response,
    request_path: &str,
    request_uri: &str,
    status_code: StatusCode,
) -> Result<Response, Infallible> {
    let (parts, body) = response.into_parts();

    match to_bytes(body, usize::MAX).await {
        Ok(bytes) => {
            let error_detail = match serde_json::from_slice::<ErrorResponse>(&bytes) {
                Ok(err) => format!("{} - {}", err.error, err.message),
                Err(_) => String::from_utf8_lossy(&bytes).to_string(),
            };

            tracing::warn!(
                path = %request_path,
                uri = %request_uri,
                status = %status_code,
                "Client error: {error_detail}",
            );

            Ok(Response::from_parts(parts, Body::from(bytes)))
        },
        Err(_) => Ok(unreadable_body().into_response()),
    }
}

fn unreadable_body() -> ApiError {
    ApiError::transform("Unable to read the response body")
}

fn parse_and_log_error(bytes: &Bytes, request_path: &str, request_uri: &str, status_code: StatusCode) {
    match serde_json::from_slice::<ErrorResponse>(bytes) {
        Ok(error_info) => {
            tracing::error!(
                path = %request_path,
                uri = %request_uri,
                status = %status_code,
                code = ?error_info.code,
                "Server error: {} - {}",
                error_info.error,
                error_info.message,
            );
            log_to_sentry("|", format!("{error_info:?}"), request_path, status_code)
        },
        Err(e) => {
            let body_str = String::from_utf8_lossy(bytes);
            tracing::error!(
                path = %request_path,
                uri = %request_uri,
                status = %status_code,
                body = %body_str,
                "Server error: failed to parse body as JSON: {e:?}",
            );
            log_to_sentry(
                "JSON Parse Error",
                format!("{e:?}"),
                request_path,
                status_code,
            );
        },
    }
}

fn log_and_capture_error(
    message: &str,
    error: impl std::fmt::Debug,
    request_path: &str,
    request_uri: &str,
    status_code: StatusCode,
) {
    tracing::error!(
        path = %request_path,
        uri = %request_uri,
        status = %status_code,
        "{message}: {error:?}",
    );

    let exception = Exception {
        ty: "ServerError".to_string(),
        value: Some(format!("{error:?}")),
        ..Default::default()
    };

    let event = Event {
        message: Some(format!(
            "{message}: URI: {request_uri}, Status: {status_code}"
        )),
        level: Level::Error,
        exception: vec![exception].into(),
        ..Default::default()
    };

    sentry::capture_event(event);
}

fn log_to_sentry(context: &str, detail: String, request_path: &str, status_code: StatusCode) {
    let breadcrumb = Breadcrumb {
        message: Some(format!("Request at {request_path}")),
        category: Some("request".into()),
        level: Level::Info,
        ..Default::default()
    };

    sentry::add_breadcrumb(breadcrumb);

    let event = Event {
        message: Some(format!("{status_code} - {context}: {detail}")),
        level: Level::Error,
        ..Default::default()
    };

    sentry::capture_event(event);
}
