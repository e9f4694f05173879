// ABOUTME: JSON body and query string extractors that report bad input as structured errors
// ABOUTME: Replace axum's plain-text rejections with a 400 INVALID_INPUT error body
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HälsoPartner AI

use async_trait::async_trait;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde_json::json;

use boris_core::errors::AppError;

/// Drop-in for `axum::Json` in handler arguments
pub struct AppJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(map_json_rejection(&rejection)),
        }
    }
}

/// Drop-in for `axum::extract::Query` in handler arguments
pub struct AppQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for AppQuery<T>
where
    Query<T>: FromRequestParts<S, Rejection = QueryRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(map_query_rejection(&rejection)),
        }
    }
}

/// Convert a `QueryRejection` into `INVALID_INPUT`
pub fn map_query_rejection(rejection: &QueryRejection) -> AppError {
    AppError::invalid_input(format!("Invalid query string: {}", rejection.body_text()))
        .with_details(json!({ "field": "query" }))
}

/// Convert a `JsonRejection` into `INVALID_INPUT`
pub fn map_json_rejection(rejection: &JsonRejection) -> AppError {
    let body_text = rejection.body_text();
    let field = field_from_serde_message(&body_text).unwrap_or("body");

    AppError::invalid_input(format!("Invalid request body: {body_text}"))
        .with_details(json!({ "field": field }))
}

/// Field named in serde's "missing field `x`" or "unknown field `x`" messages
fn field_from_serde_message(message: &str) -> Option<&str> {
    ["missing field `", "unknown field `"]
        .iter()
        .find_map(|pattern| {
            let start = message.find(pattern)? + pattern.len();
            let rest = &message[start..];
            rest.find('`').map(|end| &rest[..end])
        })
}
