//! Health check handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{repository::BookRepository, state::AppState};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service name
    pub service: String,

    /// Version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Readiness check response with dependency status
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// Overall readiness status
    pub ready: bool,

    /// Service name
    pub service: String,

    /// Dependency statuses
    pub dependencies: HashMap<String, DependencyStatus>,
}

/// Individual dependency status
#[derive(Debug, Serialize, Deserialize)]
pub struct DependencyStatus {
    /// Dependency is healthy
    pub healthy: bool,

    /// Optional message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Liveness probe; 200 whenever the process is serving requests
pub async fn health<R: BookRepository>(State(state): State<AppState<R>>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy".to_string(),
        service: state.config().service.name.clone(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    };

    (StatusCode::OK, Json(response))
}

/// Readiness probe
///
/// 200 when the book store answers a ping, 503 Service Unavailable otherwise.
pub async fn readiness<R: BookRepository>(State(state): State<AppState<R>>) -> impl IntoResponse {
    let database = match state.books().ping().await {
        Ok(()) => DependencyStatus {
            healthy: true,
            message: Some("Connected".to_string()),
        },
        Err(e) => {
            tracing::error!("Database health check failed: {}", e);
            DependencyStatus {
                healthy: false,
                message: Some("Connection failed".to_string()),
            }
        }
    };

    let ready = database.healthy;
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = ReadinessResponse {
        ready,
        service: state.config().service.name.clone(),
        dependencies: HashMap::from([("database".to_string(), database)]),
    };

    (status, Json(response))
}
