pub mod files;
pub mod generate;
pub mod models;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::error::Error;
use models::ErrorResponse;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = DefaultBodyLimit::max(state.config.server.max_upload_bytes);

    Router::new()
        .route("/generate", post(generate::generate))
        .route("/download/:filename", get(files::download))
        .route("/direct/:id/:kind", get(files::direct))
        .route("/cleanup/:id", delete(files::cleanup))
        .route("/health", get(files::health))
        .layer(body_limit)
        .with_state(state)
        .layer(cors)
}

/// Pipeline errors rendered as the JSON error envelope with the status the
/// taxonomy prescribes.
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(err = %self.0, "request failed");
        }
        let body = Json(ErrorResponse {
            success: false,
            message: self.0.to_string(),
        });
        (status, body).into_response()
    }
}
