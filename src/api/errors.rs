use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::error::HubError;

#[derive(Debug)]
pub struct AppError(pub HubError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            HubError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            HubError::NotReady(_) => (StatusCode::CONFLICT, self.0.to_string()),
            HubError::Sunset(e) => {
                error!(error = %e, "Sunset lookup failed");
                (StatusCode::BAD_GATEWAY, self.0.to_string())
            }
            HubError::Storage(e) => {
                error!(error = %e, "Storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_owned(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl<E: Into<HubError>> From<E> for AppError {
    fn from(e: E) -> Self {
        Self(e.into())
    }
}
