//! HTTP routes.
//!
//! The chat endpoint always answers with a `{reply}` body — on failure the
//! reply carries a human-readable error message and the status moves to the
//! matching error class (400 for validation, 502 when the external engine
//! failed). Nothing propagates as a bare empty success.

use crate::state::AppState;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use carbon_chat::ChatError;
use carbon_dashboard::unified_dashboard;
use carbon_protocol::{ChatReply, ChatRequest, ErrorEnvelope};
use serde::Deserialize;
use serde_json::json;

pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/healthz", get(healthz))
        .route("/api/dashboard", get(dashboard))
        .route("/api/chat", post(chat));

    if state.debug_routes {
        router = router.route("/api/debug/context", get(debug_context));
    }

    router.with_state(state)
}

async fn healthz() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

#[derive(Debug, Deserialize)]
struct DashboardQuery {
    scenario: Option<String>,
}

async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Response {
    match unified_dashboard(&state.store, query.scenario.as_deref()) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(err) => {
            log::error!("dashboard aggregation failed: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(
                    ErrorEnvelope::new("internal", err.to_string())
                        .with_hint("The carbon context failed to resolve its baseline scenario; check the dataset integrity."),
                ),
            )
                .into_response()
        }
    }
}

async fn chat(State(state): State<AppState>, Json(request): Json<ChatRequest>) -> Response {
    match state.chat.handle(&request).await {
        Ok(reply) => (StatusCode::OK, Json(reply)).into_response(),
        Err(err) => error_reply(&err).into_response(),
    }
}

fn error_reply(err: &ChatError) -> (StatusCode, Json<ChatReply>) {
    let (status, reply) = match err {
        ChatError::EmptyMessage => (
            StatusCode::BAD_REQUEST,
            format!("Erro de validação (400): {err}"),
        ),
        ChatError::Store(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Erro Técnico (500): {err}"),
        ),
        ChatError::Engine(_) => (
            StatusCode::BAD_GATEWAY,
            format!("Erro Técnico (502): {err}"),
        ),
    };
    log::error!("chat request failed ({status}): {err}");
    (status, Json(ChatReply::new(reply)))
}

/// Debug-only visibility into what the store actually holds: top-level
/// section names and the serialized size.
async fn debug_context(State(state): State<AppState>) -> Response {
    let serialized = match carbon_protocol::serialize_json(&*state.store) {
        Ok(raw) => raw,
        Err(err) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorEnvelope::new("internal", err.to_string())),
            )
                .into_response();
        }
    };
    let keys: Vec<String> = serde_json::from_str::<serde_json::Value>(&serialized)
        .ok()
        .and_then(|value| {
            value
                .as_object()
                .map(|map| map.keys().cloned().collect())
        })
        .unwrap_or_default();

    (
        StatusCode::OK,
        Json(json!({
            "context_keys": keys,
            "serialized_bytes": serialized.len(),
        })),
    )
        .into_response()
}
