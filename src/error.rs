use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Everything a handler can fail with. Each variant is converted to an HTTP
/// status plus a `{ "error": ... }` body at the response boundary; nothing
/// here triggers a retry.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("SPOC name and password are both required")]
    EmptyInput,

    #[error("SPOC name already exists")]
    AlreadyExists,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("not logged in")]
    Unauthenticated,

    #[error("error reading login sheet: {0}")]
    StoreRead(#[source] anyhow::Error),

    #[error("error submitting data: {0}")]
    StoreWrite(#[source] anyhow::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::EmptyInput => StatusCode::BAD_REQUEST,
            ApiError::AlreadyExists => StatusCode::CONFLICT,
            ApiError::InvalidCredentials | ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::StoreRead(_) | ApiError::StoreWrite(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_taxonomy() {
        assert_eq!(ApiError::EmptyInput.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::AlreadyExists.status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::InvalidCredentials.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::Unauthenticated.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::StoreRead(anyhow::anyhow!("quota exceeded")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn store_errors_keep_the_underlying_message() {
        let err = ApiError::StoreWrite(anyhow::anyhow!("range Test!A1 not found"));
        assert!(err.to_string().contains("range Test!A1 not found"));
    }
}
