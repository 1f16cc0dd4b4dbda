//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::classify::{ClassificationResult, classify};
use crate::gbfs::{FeedSnapshot, GbfsError};
use crate::render::{LeafletRenderer, format_timestamp};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(map_page))
        .route("/health", get(health))
        .route("/api/stations", get(stations))
        .route("/api/summary", get(summary))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Fetch the current snapshot and classify it.
async fn classify_current(
    state: &AppState,
) -> Result<(std::sync::Arc<FeedSnapshot>, ClassificationResult), GbfsError> {
    let snapshot = state.feed.snapshot().await?;
    let result = classify(&snapshot.stations, &snapshot.statuses);
    Ok((snapshot, result))
}

fn now_timestamp(state: &AppState) -> String {
    format_timestamp(Utc::now(), state.timezone)
}

/// Map page.
///
/// If the feeds cannot be fetched no map is drawn; an error page is shown
/// instead.
async fn map_page(State(state): State<AppState>) -> Response {
    let result = match classify_current(&state).await {
        Ok((_, result)) => result,
        Err(e) => {
            error!(error = %e, "failed to fetch station feeds");
            return error_page(
                StatusCode::BAD_GATEWAY,
                "Station data unavailable",
                "The bike share feeds could not be fetched. Please try again shortly.",
                Some(e.to_string()),
            );
        }
    };

    let view = LeafletRenderer::render_map(&result, &state.palette, &state.map, &now_timestamp(&state));

    let html = MapTemplate::from_view(&view)
        .map_err(|e| e.to_string())
        .and_then(|template| template.render().map_err(|e| e.to_string()));

    match html {
        Ok(html) => Html(html).into_response(),
        Err(message) => {
            error!(%message, "failed to render map page");
            error_page(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong",
                "The map could not be rendered.",
                None,
            )
        }
    }
}

fn error_page(status: StatusCode, title: &str, message: &str, details: Option<String>) -> Response {
    let template = ErrorTemplate {
        title: title.to_string(),
        message: message.to_string(),
        details,
    };
    let body = template
        .render()
        .unwrap_or_else(|e| format!("Template error: {}", e));
    (status, Html(body)).into_response()
}

/// All classified stations, grouped by category.
async fn stations(State(state): State<AppState>) -> Result<Json<StationsResponse>, AppError> {
    let (_, result) = classify_current(&state).await?;
    Ok(Json(StationsResponse::from_result(
        &result,
        &state.palette,
        now_timestamp(&state),
    )))
}

/// Per-category counts.
async fn summary(State(state): State<AppState>) -> Result<Json<SummaryResponse>, AppError> {
    let (snapshot, result) = classify_current(&state).await?;
    Ok(Json(SummaryResponse {
        timestamp: now_timestamp(&state),
        feed_last_updated: snapshot.last_updated.map(|t| t.to_rfc3339()),
        total_stations: result.total_stations(),
        counts: result.counts(),
        unmatched_stations: result.unmatched().len(),
    }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Upstream feed could not be fetched or parsed
    BadGateway { message: String },
}

impl From<GbfsError> for AppError {
    fn from(e: GbfsError) -> Self {
        AppError::BadGateway {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
        };

        error!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
