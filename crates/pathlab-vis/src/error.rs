//! Error types for the visualizer session and its HTTP surface.
//!
//! [`VisError`] implements `axum::response::IntoResponse`, producing a
//! structured JSON body with a status code matched to the failure.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pathlab_graph::GraphError;
use pathlab_trace::{ParseAlgorithmError, TraceError};
use serde::Serialize;
use thiserror::Error;

/// Result type for visualizer operations.
pub type Result<T> = std::result::Result<T, VisError>;

/// Errors raised while building or driving a session.
#[derive(Debug, Error)]
pub enum VisError {
    /// A fixture graph failed validation
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    /// Trace generation rejected its input
    #[error("trace error: {0}")]
    Trace(#[from] TraceError),

    /// Algorithm name did not parse
    #[error(transparent)]
    UnknownAlgorithm(#[from] ParseAlgorithmError),

    /// Malformed client request
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl VisError {
    /// Machine-readable code sent to clients.
    pub fn code(&self) -> &'static str {
        match self {
            VisError::Graph(_) => "INVALID_GRAPH",
            VisError::Trace(_) => "TRACE_FAILED",
            VisError::UnknownAlgorithm(_) => "UNKNOWN_ALGORITHM",
            VisError::BadRequest(_) => "BAD_REQUEST",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            VisError::Graph(_) => StatusCode::INTERNAL_SERVER_ERROR,
            VisError::Trace(_) => StatusCode::UNPROCESSABLE_ENTITY,
            VisError::UnknownAlgorithm(_) | VisError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn detail(&self) -> ErrorDetail {
        ErrorDetail {
            code: self.code(),
            message: self.to_string(),
        }
    }
}

/// Error body shared by HTTP and WebSocket replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

impl IntoResponse for VisError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "success": false,
            "error": self.detail(),
        });
        (self.status(), axum::Json(body)).into_response()
    }
}
