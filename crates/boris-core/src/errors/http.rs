// ABOUTME: Axum IntoResponse integration for AppError
// ABOUTME: Converts errors into status codes and camelCase JSON bodies with severity-aware logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HälsoPartner AI

use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use tracing::{error, warn};

use super::{AppError, ErrorResponse};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(code = ?self.code, error = %self, source = ?self.source, "request failed");
        } else {
            warn!(code = ?self.code, error = %self, "request rejected");
        }

        (status, Json(ErrorResponse::from(self))).into_response()
    }
}
