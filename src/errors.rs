use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("malformed dialog event: {0}")]
    BadEvent(String),

    #[error("intent with name {0} not supported")]
    UnsupportedIntent(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadEvent(_) => StatusCode::BAD_REQUEST,
            AppError::UnsupportedIntent(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
