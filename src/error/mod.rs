use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Video ID is required")]
    MissingVideoId,

    #[error("Invalid video ID format")]
    InvalidVideoId,

    #[error("Token minter is not ready, please try again later")]
    TokenMinterNotReady,

    #[error("Video unavailable")]
    Unplayable { reason: Option<String> },

    #[error("Upstream player request failed: {0}")]
    Upstream(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingVideoId | ApiError::InvalidVideoId | ApiError::Unplayable { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::TokenMinterNotReady => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, "application/json".parse().unwrap());
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*".parse().unwrap());

        let mut body = serde_json::json!({
            "error": self.to_string(),
        });
        if let ApiError::Unplayable {
            reason: Some(reason),
        } = &self
        {
            body["reason"] = serde_json::json!(reason);
        }

        (self.status(), headers, Json(body)).into_response()
    }
}
