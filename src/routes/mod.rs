// ABOUTME: Route module organization for the Boris coach HTTP API
// ABOUTME: Merges the domain routers and applies tracing, request-id and body-limit layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HälsoPartner AI

//! Route module for the Boris coach server
//!
//! Each domain module owns its route table and thin handlers that delegate to
//! the gateway or the tracker held in [`ServerResources`].

/// Caller identity extraction
pub mod auth;
/// Coaching endpoint
pub mod coach;
/// Streak, XP and achievement endpoints
pub mod engagement;
/// Structured JSON body extraction
pub mod extract;
/// Health check and readiness
pub mod health;
/// Weight, activity and meal sample endpoints
pub mod samples;

pub use coach::CoachRoutes;
pub use engagement::EngagementRoutes;
pub use health::HealthRoutes;
pub use samples::SampleRoutes;

use std::sync::Arc;

use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;
use tracing::Level;

use crate::resources::ServerResources;

/// Largest accepted request body
pub const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

/// Complete application router
pub fn router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(CoachRoutes::routes(Arc::clone(&resources)))
        .merge(EngagementRoutes::routes(Arc::clone(&resources)))
        .merge(SampleRoutes::routes(resources))
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
