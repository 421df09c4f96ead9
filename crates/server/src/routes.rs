//! HTTP surface: the analysis API, the three HTML views and a health check.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, Method, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use panel_data::{parse_panel_body, PanelError};

use crate::orchestrator::{BloodReport, ReportOrchestrator};
use crate::pages::{self, APP_JS, INDEX_HTML, RESULTS_HTML};

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    orchestrator: Arc<ReportOrchestrator>,
    enter_report: Arc<str>,
}

impl AppState {
    pub fn new(orchestrator: ReportOrchestrator) -> Self {
        let enter_report = pages::render_enter_report(orchestrator.catalog()).into();
        Self {
            orchestrator: Arc::new(orchestrator),
            enter_report,
        }
    }

    pub fn orchestrator(&self) -> &ReportOrchestrator {
        &self.orchestrator
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(#[from] PanelError),

    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Debug, Serialize)]
struct HealthStatus {
    status: &'static str,
    model_loaded: bool,
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/enter-report", get(enter_report))
        .route("/results", get(results))
        .route("/static/js/app.js", get(app_js))
        .route("/health", get(health))
        .route("/api/analyze", post(analyze))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn enter_report(State(state): State<AppState>) -> Html<String> {
    Html(state.enter_report.to_string())
}

async fn results() -> Html<&'static str> {
    Html(RESULTS_HTML)
}

async fn app_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        APP_JS,
    )
}

async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        model_loaded: state.orchestrator.model_loaded(),
    })
}

/// Body is taken as raw bytes so a bad payload yields our own 400 JSON
/// instead of the extractor's rejection.
async fn analyze(State(state): State<AppState>, body: Bytes) -> Result<Json<BloodReport>, ApiError> {
    let request = parse_panel_body(&body).map_err(|e| {
        warn!("Rejected panel: {}", e);
        ApiError::from(e)
    })?;

    let orchestrator = Arc::clone(&state.orchestrator);
    let report = tokio::task::spawn_blocking(move || orchestrator.generate_report(&request))
        .await
        .map_err(|e| {
            error!("Report task failed: {}", e);
            ApiError::Internal("Report generation failed".to_string())
        })?;

    Ok(Json(report))
}
