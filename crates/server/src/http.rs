//! HTTP Endpoints
//!
//! `POST /get_response` answers one chat message. It always replies 200:
//! blank input gets the prompt, and a failed, panicked or timed out
//! pipeline run is answered by the keyword fallback.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{Form, Json, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use campus_faq_agent::HandlerReply;
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::metrics::record_reply;
use crate::state::AppState;
use crate::ServerError;

/// Origin allowed when CORS is enabled without any configured origins
const LOCAL_ORIGIN: &str = "http://localhost:5000";

/// Form body posted by the chat widget
#[derive(Debug, Default, Deserialize)]
pub struct MessageForm {
    #[serde(default)]
    pub user_message: String,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let server = &state.config.server;
    let cors_layer = build_cors_layer(&server.cors_origins, server.cors_enabled);
    let timeout = Duration::from_secs(server.timeout_seconds);

    // get_response enforces the timeout itself so it can still answer 200
    let ops: Router<AppState> = Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics_handler))
        .layer(TimeoutLayer::new(timeout));

    Router::new()
        .route("/get_response", post(get_response))
        .merge(ops)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

/// Build the CORS layer from configured origins
///
/// - If cors_enabled is false, returns a permissive layer (for dev)
/// - If cors_origins is empty, only the local widget origin is allowed
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];

    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins (NOT FOR PRODUCTION)");
        return CorsLayer::permissive();
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    if parsed_origins.is_empty() {
        tracing::info!("No valid CORS origins configured, defaulting to {}", LOCAL_ORIGIN);
        return CorsLayer::new()
            .allow_origin(HeaderValue::from_static(LOCAL_ORIGIN))
            .allow_methods(methods)
            .allow_headers(Any);
    }

    tracing::info!("CORS configured with {} origins", parsed_origins.len());
    CorsLayer::new()
        .allow_origin(parsed_origins)
        .allow_methods(methods)
        .allow_headers(Any)
}

/// Answer one chat message.
///
/// A missing or malformed form is treated as an empty message.
async fn get_response(
    State(state): State<AppState>,
    form: Option<Form<MessageForm>>,
) -> Json<HandlerReply> {
    let started = Instant::now();
    let request_id = Uuid::new_v4();
    let text = form.map(|Form(f)| f.user_message).unwrap_or_default();
    let timeout = Duration::from_secs(state.config.server.timeout_seconds);

    let pipeline = Arc::clone(&state.pipeline);
    let message = text.clone();
    let task = tokio::task::spawn_blocking(move || pipeline.answer_with_fallback(&message));

    let reply = match tokio::time::timeout(timeout, task).await {
        Ok(Ok(reply)) => reply,
        Ok(Err(e)) => {
            tracing::warn!(%request_id, error = %e, "Pipeline task aborted, using keyword fallback");
            state.pipeline.fallback_reply(&text)
        }
        Err(_) => {
            tracing::warn!(
                %request_id,
                timeout_secs = timeout.as_secs(),
                "Pipeline timed out, using keyword fallback"
            );
            state.pipeline.fallback_reply(&text)
        }
    };

    let elapsed = started.elapsed();
    record_reply(&reply, elapsed);

    tracing::debug!(
        %request_id,
        source = ?reply.source,
        intent = ?reply.intent,
        language = ?reply.language,
        elapsed_ms = elapsed.as_millis() as u64,
        "Answered chat message"
    );

    Json(reply)
}

/// Liveness plus a summary of the loaded content
async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let content = state.pipeline.content();

    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.config.environment,
        "started_at": state.started_at.to_rfc3339(),
        "uptime_seconds": state.uptime_seconds(),
        "content": {
            "college": content.college_name,
            "departments": content.department_details.len(),
            "faculty": content.faculty_count(),
        }
    }))
}

/// Ready once the content store passes validation
async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let mut checks = serde_json::Map::new();

    let content_check = state.pipeline.content().validate();
    let ready = content_check.is_ok();
    checks.insert(
        "content".to_string(),
        match content_check {
            Ok(()) => serde_json::json!({ "status": "ok" }),
            Err(e) => serde_json::json!({ "status": "invalid", "error": e.to_string() }),
        },
    );
    checks.insert(
        "metrics".to_string(),
        serde_json::json!({
            "status": if state.metrics.is_some() { "ok" } else { "disabled" }
        }),
    );

    let (status, status_code) = if ready {
        ("ready", StatusCode::OK)
    } else {
        ("not_ready", StatusCode::SERVICE_UNAVAILABLE)
    };

    (
        status_code,
        Json(serde_json::json!({
            "status": status,
            "checks": checks
        })),
    )
}

/// Prometheus text exposition
async fn metrics_handler(State(state): State<AppState>) -> Result<impl IntoResponse, StatusCode> {
    let handle = state.metrics.as_ref().ok_or(ServerError::MetricsDisabled)?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    ))
}
