// ABOUTME: Shared server resources handed to every route handler
// ABOUTME: Bundles configuration, storage, the coaching gateway and the engagement tracker
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HälsoPartner AI

use std::sync::Arc;

use crate::coaching::CoachingGateway;
use crate::config::ServerConfig;
use crate::database::HealthStore;
use crate::engagement::{Clock, EngagementTracker};

/// Resources shared across requests
///
/// Built once at startup and passed to routers as `Arc<ServerResources>`.
pub struct ServerResources {
    /// Loaded configuration
    pub config: ServerConfig,
    /// Persistence backend
    pub store: Arc<dyn HealthStore>,
    /// LLM gateway
    pub gateway: CoachingGateway,
    /// Engagement state tracker over `store`
    pub tracker: EngagementTracker,
}

impl ServerResources {
    /// Wire the tracker to `store` and `clock`
    #[must_use]
    pub fn new(
        config: ServerConfig,
        store: Arc<dyn HealthStore>,
        gateway: CoachingGateway,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let tracker = EngagementTracker::new(Arc::clone(&store), clock);
        Self {
            config,
            store,
            gateway,
            tracker,
        }
    }

    /// Name of the identity header, lowercase
    #[must_use]
    pub fn user_id_header(&self) -> &str {
        &self.config.user_id_header
    }
}
