//! Web-layer error type and the single fault-to-response adapter.

use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use pulseboard_core::PulseError;
use thiserror::Error;

use crate::pages::{self, ErrorPage, NotFoundPage};

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config: {0}")]
    Config(String),

    #[error("page not found: {0}")]
    NotFound(Uri),

    #[error("render: {0}")]
    Render(#[from] askama::Error),

    #[error(transparent)]
    Core(#[from] PulseError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(uri) => {
                tracing::warn!(%uri, "page not found");
                let page = pages::render_or(&NotFoundPage, "Page not found");
                (StatusCode::NOT_FOUND, page).into_response()
            }
            other => internal_error(&other.to_string()),
        }
    }
}

/// Generic 500 page. The raw message goes to the log only.
pub fn internal_error(message: &str) -> Response {
    tracing::error!("unhandled error: {message}");
    let page = pages::render_or(
        &ErrorPage { message: "Internal server error" },
        "Internal server error",
    );
    (StatusCode::INTERNAL_SERVER_ERROR, page).into_response()
}
