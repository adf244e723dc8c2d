use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::sources::SourceError;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Upstream data unavailable: {0}")]
    Upstream(String),

    #[error("Not enough price history: {have} candles, need {need}")]
    InsufficientHistory { have: usize, need: usize },

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) | AppError::InsufficientHistory { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) | AppError::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<SourceError> for AppError {
    fn from(err: SourceError) -> Self {
        AppError::Upstream(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Unexpected error: {}", message);
        }

        let body = Json(json!({
            "error": true,
            "message": message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
