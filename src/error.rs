//! Unified application error and its HTTP mapping.
//!
//! Only `InvalidPayload` carries its message to the caller. Store and
//! internal failures respond with a generic message; full detail goes to
//! the server-side logs.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::api::envelope::ApiResponse;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to hand back to callers.
    fn public_message(&self) -> String {
        match self {
            AppError::InvalidPayload(msg) => msg.clone(),
            _ => "Internal Server Error processing notifications.".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        }
        (status, Json(ApiResponse::<()>::error(self.public_message()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_payload_maps_to_400_with_its_message() {
        let err = AppError::InvalidPayload("missing requestId".to_string());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.public_message(), "missing requestId");
    }

    #[test]
    fn store_and_internal_errors_hide_detail_behind_a_generic_message() {
        let store = AppError::Store(StoreError::Backend("credentials leaked".to_string()));
        let internal = AppError::Internal("stack trace".to_string());

        for err in [store, internal] {
            assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
            let msg = err.public_message();
            assert!(!msg.contains("credentials"));
            assert!(!msg.contains("stack"));
        }
    }
}
