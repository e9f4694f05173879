// ABOUTME: Route handler for the coaching endpoint
// ABOUTME: POST /api/coach forwards a question and optional health context to the gateway
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HälsoPartner AI

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use boris_core::errors::AppError;
use boris_core::models::HealthContext;

use super::auth::AuthUser;
use super::extract::AppJson;
use crate::coaching::CoachingRequest;
use crate::resources::ServerResources;

/// Body of POST /api/coach
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachBody {
    /// Question for the coach
    pub message: String,
    /// Recent health numbers
    #[serde(default)]
    pub context: Option<HealthContext>,
}

/// Coaching routes
pub struct CoachRoutes;

impl CoachRoutes {
    /// Create the coaching router
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/coach", post(Self::handle_coach))
            .with_state(resources)
    }

    /// Handle POST /api/coach
    async fn handle_coach(
        State(resources): State<Arc<ServerResources>>,
        AuthUser(user_id): AuthUser,
        AppJson(body): AppJson<CoachBody>,
    ) -> Result<Response, AppError> {

        let response = resources
            .gateway
            .get_advice(CoachingRequest {
                user_id,
                message: body.message,
                context: body.context,
            })
            .await?;

        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
