use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::league::LeagueService;
use crate::sleeper::UpstreamClient;
use crate::store::LeagueStore;
use crate::summary::SummaryService;
use crate::sync::SyncService;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn LeagueStore>,
    pub leagues: Arc<LeagueService>,
    pub sync: Arc<SyncService>,
    pub summaries: Arc<SummaryService>,
}

impl AppState {
    pub fn new(store: Arc<dyn LeagueStore>, upstream: Arc<dyn UpstreamClient>) -> Self {
        let leagues = Arc::new(LeagueService::new(store.clone()));
        let sync = Arc::new(SyncService::new(store.clone(), upstream.clone()));
        let summaries = Arc::new(SummaryService::new(
            store.clone(),
            upstream,
            leagues.clone(),
        ));
        Self {
            store,
            leagues,
            sync,
            summaries,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Inconsistent data: {0}")]
    Inconsistent(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Config(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Configuration error: {}", msg),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Inconsistent(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Inconsistent data: {}", msg),
            ),
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::Database(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", msg),
            ),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| AppError::Config("DATABASE_URL environment variable not set".into()))?;
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| AppError::Config(format!("invalid PORT value: {raw}")))?,
            Err(_) => 3000,
        };
        Ok(Config { database_url, port })
    }
}
