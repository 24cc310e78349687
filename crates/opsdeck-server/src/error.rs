use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use opsdeck_errors::prelude::*;
use serde_json::json;

/// HTTP rendition of an [`ErrorObj`]: status from the code table, body
/// carrying the user-safe message plus any field violations.
pub struct ApiError(pub ErrorObj);

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError(
            ErrorBuilder::new(codes::BAD_REQUEST)
                .user_msg(msg.into())
                .build(),
        )
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        ApiError(
            ErrorBuilder::new(codes::STORAGE_CONFLICT)
                .user_msg(msg.into())
                .build(),
        )
    }

    pub fn validation(path: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        ApiError(
            ErrorBuilder::new(codes::SCHEMA_VALIDATION)
                .user_msg(message.clone())
                .violation(path, message)
                .build(),
        )
    }
}

impl From<opsdeck_store::prelude::StoreError> for ApiError {
    fn from(err: opsdeck_store::prelude::StoreError) -> Self {
        ApiError(err.into_inner())
    }
}

impl From<opsdeck_provision::prelude::ProvisionError> for ApiError {
    fn from(err: opsdeck_provision::prelude::ProvisionError) -> Self {
        ApiError(err.into_inner())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.http_status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut body = json!({
            "error": self.0.message(),
            "code": self.0.code,
        });
        if !self.0.violations.is_empty() {
            body["violations"] = json!(self.0.violations);
        }
        (status, Json(body)).into_response()
    }
}
