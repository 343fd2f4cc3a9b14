//! Proxied entity routes.
//!
//! Every handler here is a thin pass-through: resolve the caller's session
//! credential, forward to the backend path, relay the result. The entities
//! themselves (properties, leads, tickets, ...) are opaque JSON owned by the
//! backend.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, Method},
    response::Response,
    Json,
};
use serde_json::Value;

use crate::gateway::bridge;
use crate::gateway::credentials::resolve_session_credential;
use crate::gateway::server::AppState;

async fn forward_session(
    state: &AppState,
    headers: &HeaderMap,
    method: Method,
    path: &str,
    body: Option<Value>,
) -> Response {
    let credential = resolve_session_credential(state, headers).await;
    bridge::forward(state, credential, method, path, body, None).await
}

// ===== Properties =====

pub async fn list_properties(State(state): State<AppState>, headers: HeaderMap) -> Response {
    forward_session(&state, &headers, Method::GET, "/properties", None).await
}

pub async fn create_property(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    forward_session(&state, &headers, Method::POST, "/properties", Some(body)).await
}

pub async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    forward_session(
        &state,
        &headers,
        Method::GET,
        &format!("/properties/{}", id),
        None,
    )
    .await
}

pub async fn update_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    forward_session(
        &state,
        &headers,
        Method::PATCH,
        &format!("/properties/{}", id),
        Some(body),
    )
    .await
}

pub async fn delete_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    forward_session(
        &state,
        &headers,
        Method::DELETE,
        &format!("/properties/{}", id),
        None,
    )
    .await
}

// ===== Leads =====

pub async fn list_leads(State(state): State<AppState>, headers: HeaderMap) -> Response {
    forward_session(&state, &headers, Method::GET, "/leads", None).await
}

pub async fn get_lead(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    forward_session(&state, &headers, Method::GET, &format!("/leads/{}", id), None).await
}

pub async fn update_lead(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    forward_session(
        &state,
        &headers,
        Method::PATCH,
        &format!("/leads/{}", id),
        Some(body),
    )
    .await
}

// ===== Tickets =====

pub async fn list_tickets(State(state): State<AppState>, headers: HeaderMap) -> Response {
    forward_session(&state, &headers, Method::GET, "/tickets", None).await
}

pub async fn update_ticket(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    forward_session(
        &state,
        &headers,
        Method::PATCH,
        &format!("/tickets/{}", id),
        Some(body),
    )
    .await
}

// ===== Conversations & calls =====

pub async fn list_conversations(State(state): State<AppState>, headers: HeaderMap) -> Response {
    forward_session(&state, &headers, Method::GET, "/conversations", None).await
}

pub async fn get_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    forward_session(
        &state,
        &headers,
        Method::GET,
        &format!("/conversations/{}", id),
        None,
    )
    .await
}

pub async fn list_calls(State(state): State<AppState>, headers: HeaderMap) -> Response {
    forward_session(&state, &headers, Method::GET, "/calls", None).await
}

pub async fn get_call(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    forward_session(&state, &headers, Method::GET, &format!("/calls/{}", id), None).await
}

// ===== Customers, users, voice sessions, stats =====

pub async fn list_customers(State(state): State<AppState>, headers: HeaderMap) -> Response {
    forward_session(&state, &headers, Method::GET, "/customers", None).await
}

pub async fn current_user(State(state): State<AppState>, headers: HeaderMap) -> Response {
    forward_session(&state, &headers, Method::GET, "/users/me", None).await
}

pub async fn list_voice_sessions(State(state): State<AppState>, headers: HeaderMap) -> Response {
    forward_session(&state, &headers, Method::GET, "/voice/sessions", None).await
}

pub async fn stats_overview(State(state): State<AppState>, headers: HeaderMap) -> Response {
    forward_session(&state, &headers, Method::GET, "/stats/overview", None).await
}
