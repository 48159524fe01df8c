//! HTTP transport module for floatchat
//!
//! Serves the chat contract straight from the local engine so front ends can
//! run against it when no analytics backend is deployed. Dashboard routes
//! aggregate the in-memory history; data routes expose engine records and
//! charts directly. Root and health are plain JSON.

use axum::{
    BoxError, Json, Router,
    error_handling::HandleErrorLayer,
    extract::{Path, Query, State},
    http::{HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{Duration as ChronoDuration, Utc};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::{sync::Arc, time::Duration};
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;
use crate::engine::ResponseEngine;
use crate::engine::data::{FloatPosition, active_floats};
use crate::engine::intent::Intent;
use crate::engine::viz::{self, VisualizationKind, VisualizationSpec};
use crate::error::Result;
use crate::history::HistoryStore;
use crate::schemas::{
    ANONYMOUS_USER, ChatMessage, HistoryEntry, ResponseDocument, SaveQueryRequest,
};

pub const ANALYSIS_TYPES: [&str; 4] = ["trend", "anomaly", "summary", "comparison"];
pub const VISUALIZATION_TYPES: [&str; 4] = ["time_series", "depth_profile", "map", "heatmap"];

/// Shared state for HTTP server
#[derive(Clone)]
pub struct HttpState {
    pub engine: Arc<ResponseEngine>,
    pub history: Arc<Mutex<HistoryStore>>,
}

impl HttpState {
    pub fn new(engine: ResponseEngine, history_limit: usize, history_users: usize) -> Self {
        Self {
            engine: Arc::new(engine),
            history: Arc::new(Mutex::new(HistoryStore::new(history_limit, history_users))),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            ResponseEngine::new(config.engine.seed),
            config.server.history_limit,
            config.server.history_users,
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct UserParams {
    pub user_id: Option<String>,
}

impl UserParams {
    fn into_user_id(self) -> String {
        self.user_id.unwrap_or_else(|| ANONYMOUS_USER.to_string())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FloatsParams {
    pub lat_min: Option<f64>,
    pub lat_max: Option<f64>,
    pub lon_min: Option<f64>,
    pub lon_max: Option<f64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Comma separated parameter names
    pub parameters: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisParams {
    pub region: Option<String>,
    pub parameter: Option<String>,
    pub time_period: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VisualizationParams {
    pub region: Option<String>,
    pub parameter: Option<String>,
}

fn bad_request(detail: String) -> (StatusCode, Json<Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({ "detail": detail })))
}

/// Root endpoint
pub async fn root_handler() -> impl IntoResponse {
    Json(json!({
        "message": "FloatChat API is running",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Health check endpoint
pub async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}

/// Chat endpoint answered by the local engine
pub async fn chat_handler(
    State(state): State<HttpState>,
    Json(message): Json<ChatMessage>,
) -> Json<ResponseDocument> {
    let classification = state.engine.classify(&message.message);
    let user_id = message
        .user_id
        .clone()
        .unwrap_or_else(|| ANONYMOUS_USER.to_string());
    tracing::info!(
        intent = %classification.intent,
        rule = classification.rule,
        user_id = %user_id,
        "Processing chat message"
    );

    state.history.lock().await.record(HistoryEntry {
        id: uuid::Uuid::new_v4(),
        user_id,
        message: message.message,
        intent: classification.intent,
        timestamp: message.timestamp,
        has_visualizations: !classification.document.visualizations.is_empty(),
    });

    Json(classification.document)
}

/// Chat history endpoint, oldest first
pub async fn history_handler(
    State(state): State<HttpState>,
    Query(params): Query<UserParams>,
) -> impl IntoResponse {
    let messages = state.history.lock().await.entries(&params.into_user_id());
    Json(json!({ "messages": messages }))
}

/// Dashboard statistics and the ten most recent queries
pub async fn dashboard_handler(State(state): State<HttpState>) -> impl IntoResponse {
    let history = state.history.lock().await;
    let week_ago = Utc::now() - ChronoDuration::days(7);
    let recent: Vec<Value> = history
        .recent(10)
        .into_iter()
        .map(|e| {
            json!({
                "message": e.message,
                "timestamp": e.timestamp,
                "intent": e.intent,
            })
        })
        .collect();

    Json(json!({
        "stats": {
            "total_queries": history.total(),
            "queries_this_week": history.count_since(week_ago),
            "active_floats": 3847,
            "avg_temperature": 18.2,
            "data_points": 2_100_000,
            "trend": 1.2
        },
        "recent_queries": recent,
        "popular_parameters": [
            {"name": "Temperature", "count": 125},
            {"name": "Salinity", "count": 89},
            {"name": "Depth Profile", "count": 67},
            {"name": "Currents", "count": 45}
        ],
        "popular_regions": [
            {"name": "North Atlantic", "count": 87},
            {"name": "Pacific Ocean", "count": 65},
            {"name": "Mediterranean", "count": 43},
            {"name": "Arctic Ocean", "count": 23}
        ]
    }))
}

pub async fn save_query_handler(
    State(state): State<HttpState>,
    Json(request): Json<SaveQueryRequest>,
) -> impl IntoResponse {
    let user_id = request
        .user_id
        .unwrap_or_else(|| ANONYMOUS_USER.to_string());
    let saved = state.history.lock().await.save_query(user_id, request.query);
    Json(json!({ "id": saved.id, "message": "Query saved successfully" }))
}

/// Saved queries for a user, newest first
pub async fn saved_queries_handler(
    State(state): State<HttpState>,
    Query(params): Query<UserParams>,
) -> impl IntoResponse {
    let queries = state.history.lock().await.saved_queries(&params.into_user_id());
    Json(json!({ "queries": queries }))
}

/// Query counts by intent and by day over the last 30 days
pub async fn analytics_handler(State(state): State<HttpState>) -> impl IntoResponse {
    let history = state.history.lock().await;
    let distribution: Vec<Value> = history
        .intent_counts()
        .into_iter()
        .map(|(intent, count)| json!({ "intent": intent, "count": count }))
        .collect();
    let timeline: Vec<Value> = history
        .timeline(Utc::now() - ChronoDuration::days(30))
        .into_iter()
        .map(|(date, count)| json!({ "date": date, "count": count }))
        .collect();

    Json(json!({
        "intent_distribution": distribution,
        "query_timeline": timeline,
        "total_users": history.user_ids(),
        "most_active_hours": (9..17).collect::<Vec<u32>>(),
    }))
}

fn in_range(value: f64, min: Option<f64>, max: Option<f64>) -> bool {
    match (min, max) {
        (Some(lo), Some(hi)) => (lo..=hi).contains(&value),
        _ => true,
    }
}

/// Float positions, filtered by a bounding box when both bounds of an axis
/// are given
pub async fn floats_handler(Query(params): Query<FloatsParams>) -> impl IntoResponse {
    let floats: Vec<FloatPosition> = active_floats()
        .into_iter()
        .filter(|f| {
            in_range(f.lat, params.lat_min, params.lat_max)
                && in_range(f.lon, params.lon_min, params.lon_max)
        })
        .collect();

    let mut query_params = Map::new();
    if let (Some(lo), Some(hi)) = (params.lat_min, params.lat_max) {
        query_params.insert("latitude_range".into(), json!([lo, hi]));
    }
    if let (Some(lo), Some(hi)) = (params.lon_min, params.lon_max) {
        query_params.insert("longitude_range".into(), json!([lo, hi]));
    }
    if let (Some(start), Some(end)) = (&params.start_date, &params.end_date) {
        query_params.insert("time_range".into(), json!([start, end]));
    }
    if let Some(parameters) = &params.parameters {
        let names: Vec<&str> = parameters
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        query_params.insert("parameters".into(), json!(names));
    }

    Json(json!({
        "data": { "count": floats.len(), "floats": floats },
        "query_params": query_params,
        "timestamp": Utc::now(),
    }))
}

fn analysis_intent(analysis_type: &str) -> Option<Intent> {
    match analysis_type {
        "trend" => Some(Intent::TemperatureTrend),
        "anomaly" => Some(Intent::TemperatureAnomaly),
        "summary" => Some(Intent::Default),
        "comparison" => Some(Intent::TemperatureGeneric),
        _ => None,
    }
}

pub async fn analysis_handler(
    State(state): State<HttpState>,
    Path(analysis_type): Path<String>,
    Query(params): Query<AnalysisParams>,
) -> std::result::Result<Json<Value>, (StatusCode, Json<Value>)> {
    let intent = analysis_intent(&analysis_type).ok_or_else(|| {
        bad_request(format!(
            "Invalid analysis type. Must be one of: {:?}",
            ANALYSIS_TYPES
        ))
    })?;
    let results = state.engine.synthesize(intent);

    Ok(Json(json!({
        "analysis_type": analysis_type,
        "parameters": {
            "region": params.region.unwrap_or_else(|| "global".to_string()),
            "parameter": params.parameter.unwrap_or_else(|| "temperature".to_string()),
            "time_period": params.time_period.unwrap_or_else(|| "30d".to_string()),
        },
        "results": results,
        "timestamp": Utc::now(),
    })))
}

/// Intent and chart kind backing a visualization type; `heatmap` is accepted
/// but has nothing to draw.
fn visualization_source(viz_type: &str) -> Option<(Intent, VisualizationKind)> {
    match viz_type {
        "time_series" => Some((Intent::TemperatureGeneric, VisualizationKind::Plot)),
        "depth_profile" => Some((Intent::TemperatureDepthProfile, VisualizationKind::Plot)),
        "map" => Some((Intent::TemperatureGeneric, VisualizationKind::Map)),
        _ => None,
    }
}

pub async fn visualization_handler(
    State(state): State<HttpState>,
    Path(viz_type): Path<String>,
    Query(params): Query<VisualizationParams>,
) -> std::result::Result<Json<Value>, (StatusCode, Json<Value>)> {
    if !VISUALIZATION_TYPES.contains(&viz_type.as_str()) {
        return Err(bad_request(format!(
            "Invalid visualization type. Must be one of: {:?}",
            VISUALIZATION_TYPES
        )));
    }
    let spec: Option<VisualizationSpec> =
        visualization_source(&viz_type).and_then(|(intent, kind)| {
            viz::build(&state.engine.synthesize(intent))
                .into_iter()
                .find(|v| v.kind() == kind)
        });

    Ok(Json(json!({
        "visualization_type": viz_type,
        "data": spec,
        "metadata": {
            "region": params.region,
            "parameter": params.parameter.unwrap_or_else(|| "temperature".to_string()),
            "generated_at": Utc::now(),
        },
    })))
}

async fn handle_middleware_error(err: BoxError) -> impl IntoResponse {
    if err.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({"error": {"code": 408, "message": "Request timed out"}})),
        )
    } else {
        tracing::error!("Unhandled middleware error: {}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": {"code": 500, "message": "Internal error"}})),
        )
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the router; split from [`start_http_server`] so tests can drive it
/// in-process.
pub fn router(state: HttpState, config: &Config) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/api/chat/", post(chat_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/chat/history", get(history_handler))
        .route("/api/dashboard/", get(dashboard_handler))
        .route("/api/dashboard", get(dashboard_handler))
        .route("/api/dashboard/save-query", post(save_query_handler))
        .route("/api/dashboard/saved-queries", get(saved_queries_handler))
        .route("/api/dashboard/analytics", get(analytics_handler))
        .route("/api/data/floats", get(floats_handler))
        .route("/api/data/analysis/:analysis_type", get(analysis_handler))
        .route("/api/data/visualizations/:viz_type", get(visualization_handler))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .timeout(Duration::from_millis(config.server.request_timeout_ms)),
        )
        .layer(cors_layer(&config.server.allowed_origins))
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_http_server(config: &Config) -> Result<()> {
    let app = router(HttpState::from_config(config), config);

    let listener = tokio::net::TcpListener::bind(config.server.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind HTTP listener: {}", e))?;

    tracing::info!(
        "Starting HTTP server on {} (chat at /api/chat/)",
        config.server.bind
    );

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("HTTP server error: {}", e))?;

    Ok(())
}
