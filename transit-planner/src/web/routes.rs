//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::engine::RouteError;
use crate::status::StatusSource;
use crate::topology::TopologySource;

use super::dto::*;
use super::state::AppState;

/// Longest accepted station name, in characters. Fuzzy matching is
/// quadratic in the input length and runs against every station.
const MAX_NAME_CHARS: usize = 200;

/// Create the application router.
pub fn create_router<T, S>(state: AppState<T, S>) -> Router
where
    T: TopologySource + 'static,
    S: StatusSource + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/stations", get(list_stations::<T, S>))
        .route("/route/plan", post(plan_route::<T, S>))
        .route("/status/refresh", post(refresh_status::<T, S>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Every known station name.
async fn list_stations<T: TopologySource, S: StatusSource>(
    State(state): State<AppState<T, S>>,
) -> Result<Json<StationsResponse>, AppError> {
    let stations = state.engine.list_stations().await?;
    Ok(Json(StationsResponse { stations }))
}

/// Plan a route between two free-text station names.
async fn plan_route<T: TopologySource, S: StatusSource>(
    State(state): State<AppState<T, S>>,
    body: Bytes,
) -> Result<Json<PlanRouteResponse>, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: PlanRouteRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "Invalid route request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let origin = required(req.origin.as_deref(), "origin")?;
    let destination = required(req.destination.as_deref(), "destination")?;

    let plan = state.engine.plan_route(origin, destination).await?;
    Ok(Json(PlanRouteResponse::from_plan(&plan)))
}

/// Refetch the live line status now.
async fn refresh_status<T: TopologySource, S: StatusSource>(
    State(state): State<AppState<T, S>>,
) -> Json<RefreshResponse> {
    let status = state.engine.refresh_status().await;
    Json(RefreshResponse {
        lines: status.len(),
        fetched_at: status.fetched_at().map(|t| t.to_rfc3339()),
    })
}

/// A non-blank request field of bounded length.
fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, AppError> {
    match value.map(str::trim) {
        Some(v) if v.chars().count() > MAX_NAME_CHARS => Err(AppError::BadRequest {
            message: format!("{field} station name longer than {MAX_NAME_CHARS} characters"),
        }),
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::BadRequest {
            message: format!("Missing {field} station"),
        }),
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        match e {
            RouteError::StationNotFound { .. } | RouteError::NoRouteFound { .. } => {
                AppError::NotFound {
                    message: e.to_string(),
                }
            }
            RouteError::DataUnavailable(_) => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            warn!(%status, %message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
