//! Route handlers.

pub mod activity;
pub mod ops;
pub mod performance;
pub mod relay;
pub mod session;

use axum::{http::Uri, response::Html};

use crate::error::{AppError, Result};
use crate::pages::{self, IndexPage};

pub async fn index() -> Result<Html<String>> {
    pages::render(&IndexPage)
}

pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri)
}
