use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use tracing::{error, warn};

use crate::service::AssociationError;
use crate::store::StoreError;

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Errors of the restaurant and pizza endpoints, rendered as `{"error": "..."}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Restaurant not found")]
    RestaurantNotFound,
    #[error(transparent)]
    Internal(#[from] StoreError),
}

impl From<diesel::result::Error> for ApiError {
    fn from(e: diesel::result::Error) -> Self {
        ApiError::Internal(StoreError::Query(e))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            ApiError::RestaurantNotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Internal(e) => {
                error!(error = %e, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}

/// Restaurant pizza creation errors are rendered as `{"errors": ["..."]}`.
impl IntoResponse for AssociationError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AssociationError::MalformedInput | AssociationError::Validation(_) => {
                warn!(error = %self, "rejected restaurant pizza");
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AssociationError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            AssociationError::Internal(e) => {
                error!(error = %e, "failed to create restaurant pizza");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        let body = Json(json!({
            "errors": [error_message]
        }));

        (status, body).into_response()
    }
}
