//! Extractors whose rejections use the same `{ "error": message }` body as every other
//! failure.

use axum::extract::{FromRequest, FromRequestParts};

use crate::api::error::ApiError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);
