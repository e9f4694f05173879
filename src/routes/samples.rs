// ABOUTME: Route handlers for logging, listing and deleting weight, activity and meal samples
// ABOUTME: Logging a sample also records the day's engagement log and returns celebrations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HälsoPartner AI

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, post};
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use boris_core::constants::samples::{DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use boris_core::errors::AppError;
use boris_core::models::{ActivitySample, MealSample, SampleKind, SamplePayload, WeightSample};

use super::auth::AuthUser;
use super::extract::{AppJson, AppQuery};
use crate::resources::ServerResources;

/// Query parameters for listing samples
#[derive(Debug, Default, Deserialize)]
pub struct ListSamplesQuery {
    /// Maximum number of samples, 1 to 100
    pub limit: Option<u32>,
}

impl ListSamplesQuery {
    /// Requested limit clamped to the accepted range
    #[must_use]
    pub fn effective_limit(&self) -> u32 {
        self.limit
            .unwrap_or(DEFAULT_LIST_LIMIT)
            .clamp(1, MAX_LIST_LIMIT)
    }
}

/// Sample routes
pub struct SampleRoutes;

impl SampleRoutes {
    /// Create the sample router
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/samples/:kind",
                post(Self::handle_log).get(Self::handle_list),
            )
            .route("/api/samples/:kind/:id", delete(Self::handle_delete))
            .with_state(resources)
    }

    /// Handle POST /api/samples/:kind
    async fn handle_log(
        State(resources): State<Arc<ServerResources>>,
        AuthUser(user_id): AuthUser,
        Path(kind): Path<String>,
        AppJson(body): AppJson<Value>,
    ) -> Result<Response, AppError> {
        let payload = match kind.parse::<SampleKind>()? {
            SampleKind::Weight => SamplePayload::Weight(parse_body::<WeightSample>(body)?),
            SampleKind::Activity => SamplePayload::Activity(parse_body::<ActivitySample>(body)?),
            SampleKind::Meal => SamplePayload::Meal(parse_body::<MealSample>(body)?),
        };

        let logged = resources.tracker.log_sample(&user_id, payload).await?;

        Ok((StatusCode::CREATED, Json(logged)).into_response())
    }

    /// Handle GET /api/samples/:kind
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        AuthUser(user_id): AuthUser,
        Path(kind): Path<String>,
        AppQuery(query): AppQuery<ListSamplesQuery>,
    ) -> Result<Response, AppError> {
        let kind: SampleKind = kind.parse()?;

        let samples = resources
            .tracker
            .list_samples(&user_id, kind, query.effective_limit())
            .await?;

        Ok((StatusCode::OK, Json(samples)).into_response())
    }

    /// Handle DELETE /api/samples/:kind/:id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        AuthUser(user_id): AuthUser,
        Path((kind, id)): Path<(String, String)>,
    ) -> Result<Response, AppError> {
        let kind: SampleKind = kind.parse()?;
        let id = Uuid::parse_str(&id)
            .map_err(|_| AppError::invalid_input(format!("Invalid sample id '{id}'")))?;

        resources.tracker.delete_sample(&user_id, kind, id).await?;

        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}

/// Decode a sample body whose shape depends on the path's kind
fn parse_body<T: DeserializeOwned>(body: Value) -> Result<T, AppError> {
    serde_json::from_value(body)
        .map_err(|e| AppError::invalid_input(format!("Invalid request body: {e}")))
}
