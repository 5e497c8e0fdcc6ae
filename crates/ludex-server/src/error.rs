use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use ludex_store::StoreError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("no image attached")]
    MissingImage,

    #[error("game not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("malformed upload: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("store error: {0}")]
    Store(StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ServerResult<T> = Result<T, ServerError>;

impl From<StoreError> for ServerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ServerError::NotFound,
            StoreError::MissingImage => ServerError::MissingImage,
            StoreError::Validation(msg) => ServerError::Validation(msg),
            StoreError::InvalidImageName(name) => {
                ServerError::Validation(format!("invalid image name: {name}"))
            }
            other => ServerError::Store(other),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::MissingImage => {
                (StatusCode::BAD_REQUEST, "No image attached".to_string())
            }
            ServerError::NotFound => (StatusCode::NOT_FOUND, "Game not found".to_string()),
            ServerError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ServerError::Multipart(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            ServerError::Config(_) | ServerError::Store(_) | ServerError::Io(_) => {
                tracing::error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}
