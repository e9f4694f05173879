// ABOUTME: Caller identification from the trusted identity header
// ABOUTME: The header name is configurable; a missing or blank value is rejected with 401
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HälsoPartner AI

//! Authentication happens upstream of this service. Every `/api` request
//! carries the already-verified user id in a single header. The id is opaque
//! UTF-8 text, so header bytes are decoded as UTF-8 rather than visible ASCII.

use std::str::from_utf8;
use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use boris_core::errors::{AppError, AppResult};

use crate::resources::ServerResources;

/// Authenticated caller, extracted before any body is read
///
/// List it first among handler arguments so a request without identity is
/// rejected with 401 regardless of its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser(pub String);

#[async_trait]
impl FromRequestParts<Arc<ServerResources>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        resources: &Arc<ServerResources>,
    ) -> Result<Self, Self::Rejection> {
        authenticate(&parts.headers, resources).map(Self)
    }
}

/// User id from the configured identity header
///
/// # Errors
///
/// Returns `AUTH_REQUIRED` if the header is absent, not valid UTF-8 or blank.
pub fn authenticate(headers: &HeaderMap, resources: &ServerResources) -> AppResult<String> {
    user_id_from_headers(headers, resources.user_id_header())
}

fn user_id_from_headers(headers: &HeaderMap, header_name: &str) -> AppResult<String> {
    headers
        .get(header_name)
        .and_then(|value| from_utf8(value.as_bytes()).ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
        .ok_or_else(AppError::auth_required)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use axum::http::HeaderValue;
    use boris_core::errors::ErrorCode;

    use super::*;

    #[test]
    fn test_reads_trimmed_user_id() {
        let mut headers = HeaderMap::new();
        headers.insert("x-user-id", HeaderValue::from_static(" user-42 "));

        assert_eq!(user_id_from_headers(&headers, "x-user-id").unwrap(), "user-42");
    }

    #[test]
    fn test_missing_or_blank_header_is_rejected() {
        let mut headers = HeaderMap::new();
        let err = user_id_from_headers(&headers, "x-user-id").unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthRequired);

        headers.insert("x-user-id", HeaderValue::from_static("   "));
        assert!(user_id_from_headers(&headers, "x-user-id").is_err());
    }

    #[test]
    fn test_non_ascii_user_id_is_accepted() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-user-id",
            HeaderValue::from_bytes("ny-användare".as_bytes()).unwrap(),
        );

        assert_eq!(
            user_id_from_headers(&headers, "x-user-id").unwrap(),
            "ny-användare"
        );
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert("x-user-id", HeaderValue::from_bytes(&[0x61, 0xff]).unwrap());

        let err = user_id_from_headers(&headers, "x-user-id").unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthRequired);
    }

    #[test]
    fn test_custom_header_name() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-user", HeaderValue::from_static("anna"));

        assert_eq!(
            user_id_from_headers(&headers, "x-forwarded-user").unwrap(),
            "anna"
        );
        assert!(user_id_from_headers(&headers, "x-user-id").is_err());
    }
}
