//! Request extractors.

use crate::error::ApiError;
use axum::extract::FromRequest;

/// `axum::Json` whose rejections render as [`ApiError::BadRequest`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);
