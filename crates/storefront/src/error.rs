//! Unified error handling for the HTTP surface.
//!
//! Provides a unified `ApiError` type mapping catalog failures to the
//! response contract. All route handlers return `Result<T, ApiError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use tavola_catalog::{CatalogError, InvalidFields};

/// Application-level error type for the storefront API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Input failed validation; the violated field set is attached.
    #[error("{0}")]
    Validation(InvalidFields),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The catalog store failed.
    #[error("Store error: {0}")]
    Store(#[from] CatalogError),
}

impl ApiError {
    /// Map a catalog failure on the list route, where the contract reports
    /// store trouble as a client-visible 400 rather than a 500.
    pub fn listing(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound => Self::NotFound("food".to_owned()),
            CatalogError::Validation(invalid) => Self::Validation(invalid),
            other => {
                tracing::error!(error = %other, "failed to load foods");
                Self::BadRequest("failed to load foods".to_owned())
            }
        }
    }
}

impl From<InvalidFields> for ApiError {
    fn from(invalid: InvalidFields) -> Self {
        Self::Validation(invalid)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Normalize the store taxonomy onto the HTTP contract first.
        let err = match self {
            Self::Store(CatalogError::NotFound) => Self::NotFound("food".to_owned()),
            Self::Store(CatalogError::Validation(invalid)) => Self::Validation(invalid),
            other => other,
        };

        if let Self::Store(inner) = &err {
            tracing::error!(error = %inner, "request error");
        }

        let status = match &err {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose internal error details to clients
        let body = match &err {
            Self::Validation(invalid) => json!({
                "message": invalid.to_string(),
                "fields": invalid.fields,
                "index": invalid.index,
            }),
            Self::NotFound(what) => json!({ "message": format!("{what} not found") }),
            Self::BadRequest(message) => json!({ "message": message }),
            Self::Store(_) => json!({ "message": "internal server error" }),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn status_codes_follow_the_contract() {
        assert_eq!(
            status_of(ApiError::NotFound("food".to_owned())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(ApiError::BadRequest("bad".to_owned())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ApiError::Store(CatalogError::NotFound)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(ApiError::Store(CatalogError::DataCorruption(
                "bad row".to_owned()
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn listing_maps_store_failure_to_bad_request() {
        let err = ApiError::listing(CatalogError::DataCorruption("bad row".to_owned()));
        assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
    }
}
