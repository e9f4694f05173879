// ABOUTME: Core types and constants for the Boris health coaching service
// ABOUTME: Foundation crate with error handling, engagement state and sample models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 HälsoPartner AI

#![deny(unsafe_code)]

//! # Boris Core
//!
//! Foundation crate shared by the coaching server. It holds the types that
//! change rarely so the workspace recompiles less.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode` and the client-facing error body
//! - **constants**: scoring, celebration and validation constants by domain
//! - **models**: engagement state, health context and logged samples

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models
pub mod models;
