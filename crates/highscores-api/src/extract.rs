//! Extractors whose rejections render as `ApiError`.
//!
//! axum's stock `Json`, `Query` and `Path` extractors reject with plain-text
//! bodies and a mix of 400/415/422 statuses. These wrappers route every
//! rejection through `ApiError`, so malformed input always gets the JSON
//! validation error body and a 400.

use axum::extract::FromRequest;
use axum::extract::FromRequestParts;

use crate::error::ApiError;

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Query string parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// Path parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);
