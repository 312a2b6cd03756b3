//! HTTP surface for the dashboard: selector options in, chart and table out.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::courses::catalog::CourseCatalog;
use crate::courses::filter::{StudentLevel, gpa_marks};
use crate::courses::types::{CourseView, Selection};
use crate::error::QueryError;

#[derive(Clone)]
pub struct AppState {
    catalog: Arc<CourseCatalog>,
    defaults: Selection,
}

impl AppState {
    pub fn new(catalog: CourseCatalog, defaults: Selection) -> Self {
        Self {
            catalog: Arc::new(catalog),
            defaults,
        }
    }
}

#[derive(Debug, Serialize)]
struct ApiResponse<T: Serialize> {
    ok: bool,
    data: T,
}

#[derive(Debug, Serialize)]
struct ApiErrorBody {
    ok: bool,
    error: String,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<QueryError> for ApiError {
    fn from(error: QueryError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: error.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ApiErrorBody {
            ok: false,
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

type ApiResult<T> = std::result::Result<Json<ApiResponse<T>>, ApiError>;

/// Query string for `/v1/courses`; anything omitted falls back to the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
struct CoursesQuery {
    subject: Option<String>,
    level: Option<String>,
    min_gpa: Option<String>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/subjects", get(subjects))
        .route("/v1/levels", get(levels))
        .route("/v1/gpa-marks", get(marks))
        .route("/v1/defaults", get(defaults))
        .route("/v1/courses", get(courses))
        .with_state(state)
}

pub async fn run_server(state: AppState, bind: SocketAddr) -> Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("Dashboard API listening on http://{bind}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> Json<ApiResponse<HealthResponse>> {
    ok(HealthResponse { status: "ok" })
}

async fn subjects(State(state): State<AppState>) -> Json<ApiResponse<Vec<String>>> {
    ok(state.catalog.subjects().to_vec())
}

async fn levels() -> Json<ApiResponse<[StudentLevel; 2]>> {
    ok(StudentLevel::ALL)
}

async fn marks() -> Json<ApiResponse<Vec<f64>>> {
    ok(gpa_marks())
}

async fn defaults(State(state): State<AppState>) -> Json<ApiResponse<Selection>> {
    ok(state.defaults)
}

#[tracing::instrument(skip(state))]
async fn courses(
    State(state): State<AppState>,
    Query(params): Query<CoursesQuery>,
) -> ApiResult<CourseView> {
    let subject = params.subject.unwrap_or(state.defaults.subject);
    let level = match params.level {
        Some(raw) => raw.parse::<StudentLevel>()?,
        None => state.defaults.level,
    };
    let min_gpa = match params.min_gpa {
        Some(raw) => parse_min_gpa(&raw)?,
        None => state.defaults.min_gpa,
    };

    if !state.catalog.has_subject(&subject) {
        warn!(subject = %subject, "Unknown subject requested");
    }

    let view = state.catalog.query(&subject, level, min_gpa)?;
    Ok(ok(view))
}

fn parse_min_gpa(raw: &str) -> Result<f64, QueryError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| QueryError::InvalidGpa(raw.to_string()))
}

fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse { ok: true, data })
}
