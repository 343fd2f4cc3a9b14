//! Voice-agent service routes.
//!
//! These are called server-to-server by the voice platform, which supplies
//! its own `Authorization: Bearer` header; no cookie session is involved.

use axum::{
    extract::{RawQuery, State},
    http::{HeaderMap, Method},
    response::Response,
    Json,
};
use serde_json::{json, Value};

use crate::gateway::bridge;
use crate::gateway::credentials::resolve_bearer_credential;
use crate::gateway::server::AppState;

/// Property search for the voice agent; the inbound query string is
/// forwarded untouched.
pub async fn search_properties(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Response {
    let path = match query {
        Some(q) => format!("/properties/search?{}", q),
        None => "/properties/search".to_string(),
    };
    let credential = resolve_bearer_credential(&headers);
    bridge::forward(&state, credential, Method::GET, &path, None, None).await
}

/// Leads captured during a voice call are tagged with their origin before
/// reaching the backend.
fn tag_voice_source(mut body: Value) -> Value {
    body["source"] = json!("voice_agent");
    body
}

pub async fn create_lead(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let credential = resolve_bearer_credential(&headers);
    bridge::forward(
        &state,
        credential,
        Method::POST,
        "/leads",
        Some(body),
        Some(tag_voice_source),
    )
    .await
}
