use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;
use tracing::error;

/// Code carried by every locally detected validation failure.
pub const VALIDATION_ERROR_CODE: i64 = 1;

/// Node error code meaning "no such item", e.g. an address without outputs.
pub const NOT_FOUND_ERROR_CODE: i64 = -5;

#[derive(Error, Debug, Clone)]
pub enum AppError {
    #[error("Node connection error: {0}")]
    Node(String),

    #[error("Server startup error: {0}")]
    Server(String),
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        error!("I/O Error occurred: {err}");
        AppError::Server(err.to_string())
    }
}

/// Failure reported by the backing node.
///
/// `code` is the node's own error code; it is `None` when the node could not
/// be reached or its reply could not be decoded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct NodeError {
    pub code: Option<i64>,
    pub message: String,
}

impl NodeError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.code == Some(NOT_FOUND_ERROR_CODE)
    }
}

impl From<reqwest::Error> for NodeError {
    fn from(err: reqwest::Error) -> Self {
        NodeError::transport(format!("Node request failed: {err}"))
    }
}

impl From<serde_json::Error> for NodeError {
    fn from(err: serde_json::Error) -> Self {
        NodeError::transport(format!("Invalid node response: {err}"))
    }
}

/// Every error a request can end with.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{message}")]
    Validation { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    NodeQuery { code: Option<i64>, message: String },

    #[error("{message}")]
    Transform { message: String },
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn missing_address() -> Self {
        Self::validation("Must include address")
    }

    pub fn invalid_address(reason: impl std::fmt::Display) -> Self {
        Self::validation(format!("Invalid address: {reason}"))
    }

    /// Used as the router fallback.
    pub fn not_found() -> Self {
        Self::NotFound {
            message: "The requested resource has not been found.".to_string(),
        }
    }

    pub fn transform(message: impl Into<String>) -> Self {
        Self::Transform {
            message: message.into(),
        }
    }

    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Validation { .. } => Some(VALIDATION_ERROR_CODE),
            Self::NotFound { .. } => Some(NOT_FOUND_ERROR_CODE),
            Self::NodeQuery { code, .. } => *code,
            Self::Transform { .. } => None,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::NodeQuery { code: Some(_), .. } => StatusCode::BAD_REQUEST,
            Self::NodeQuery { code: None, .. } | Self::Transform { .. } => {
                StatusCode::SERVICE_UNAVAILABLE
            },
        }
    }
}

impl From<NodeError> for ApiError {
    fn from(err: NodeError) -> Self {
        if err.is_not_found() {
            ApiError::NotFound {
                message: err.message,
            }
        } else {
            ApiError::NodeQuery {
                code: err.code,
                message: err.message,
            }
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub code: Option<i64>,
    pub status_code: u16,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        let status = err.status_code();
        let message = match err {
            ApiError::Validation { message } | ApiError::NodeQuery { message, .. } => {
                match err.code() {
                    Some(code) => format!("{message}. Code:{code}"),
                    None => message.clone(),
                }
            },
            ApiError::NotFound { message } | ApiError::Transform { message } => message.clone(),
        };

        Self {
            error: status
                .canonical_reason()
                .unwrap_or("Unknown Error")
                .to_string(),
            message,
            code: err.code(),
            status_code: status.as_u16(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse::from(&self);

        // log only server errors
        if body.status_code >= 500 {
            error!("Error occurred: {} - {}", body.error, body.message);
        }

        (self.status_code(), Json(body)).into_response()
    }
}
