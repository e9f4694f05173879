// ABOUTME: Route handlers for streak, XP and achievement endpoints
// ABOUTME: Reads the caller's engagement state and records daily log events
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HälsoPartner AI

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};

use boris_core::errors::AppError;

use super::auth::AuthUser;
use crate::resources::ServerResources;

/// Engagement routes
pub struct EngagementRoutes;

impl EngagementRoutes {
    /// Create the engagement router
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/engagement", get(Self::handle_get_state))
            .route("/api/engagement/log", post(Self::handle_record_log))
            .route(
                "/api/engagement/achievements",
                get(Self::handle_achievements),
            )
            .with_state(resources)
    }

    /// Handle GET /api/engagement
    async fn handle_get_state(
        State(resources): State<Arc<ServerResources>>,
        AuthUser(user_id): AuthUser,
    ) -> Result<Response, AppError> {
        let snapshot = resources.tracker.current_state(&user_id).await?;

        Ok((StatusCode::OK, Json(snapshot)).into_response())
    }

    /// Handle POST /api/engagement/log
    async fn handle_record_log(
        State(resources): State<Arc<ServerResources>>,
        AuthUser(user_id): AuthUser,
    ) -> Result<Response, AppError> {
        let outcome = resources.tracker.record_log(&user_id).await?;

        Ok((StatusCode::OK, Json(outcome)).into_response())
    }

    /// Handle GET /api/engagement/achievements
    async fn handle_achievements(
        State(resources): State<Arc<ServerResources>>,
        AuthUser(user_id): AuthUser,
    ) -> Result<Response, AppError> {
        let achievements = resources.tracker.achievements(&user_id).await?;

        Ok((StatusCode::OK, Json(achievements)).into_response())
    }
}
