use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// Request-scoped failure taxonomy. Every variant is terminal for the
/// request it occurs in; there are no retries anywhere in the service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing request input, reported verbatim to the client.
    #[error("{0}")]
    BadRequest(String),
    /// Authentication failure. The message is uniform for unknown users,
    /// lookup errors and password mismatches alike.
    #[error("{0}")]
    Unauthorized(&'static str),
    /// Authenticated but not allowed to mutate.
    #[error("forbidden")]
    Forbidden,
    /// Delete hit zero rows.
    #[error("not found")]
    NotFound,
    /// Store-level failure. Detail stays in the server log.
    #[error("store error")]
    Store(#[from] sqlx::Error),
    /// Response body could not be encoded.
    #[error("encoding error")]
    Encoding(#[from] serde_json::Error),
    /// Anything else internal (hashing and the like).
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, (*msg).to_string()),
            ApiError::Forbidden => (StatusCode::FORBIDDEN, "forbidden".to_string()),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "not found".to_string()),
            ApiError::Store(e) => {
                error!(error = %e, "store operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            ApiError::Encoding(e) => {
                error!(error = %e, "response encoding failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            ApiError::Internal(e) => {
                error!(error = %e, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_carries_reason_to_client() {
        let resp = ApiError::bad_request("invalid id").into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_error_maps_to_500() {
        let resp = ApiError::Store(sqlx::Error::RowNotFound).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn forbidden_maps_to_403() {
        let resp = ApiError::Forbidden.into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}
