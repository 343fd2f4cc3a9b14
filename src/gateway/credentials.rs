//! Inbound credential resolution.
//!
//! Two sources yield a backend bearer token: the dashboard's session cookie
//! (resolved through the session store) and a client-supplied
//! `Authorization: Bearer` header on the voice-agent service routes.

use axum::http::{header, HeaderMap};

use crate::gateway::server::AppState;

pub const SESSION_COOKIE_NAME: &str = "simsar_session";

/// Extract the session token from the Cookie header
pub fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    let cookie_header = headers.get(header::COOKIE)?;
    let cookie_str = cookie_header.to_str().ok()?;

    for cookie in cookie_str.split(';') {
        let cookie = cookie.trim();
        if let Some(value) = cookie.strip_prefix(&format!("{}=", SESSION_COOKIE_NAME)) {
            return Some(value.to_string());
        }
    }

    None
}

/// Resolve the cookie session to its stored backend access token,
/// refreshing the session's expiry on use.
pub async fn resolve_session_credential(state: &AppState, headers: &HeaderMap) -> Option<String> {
    let session_token = extract_session_token(headers)?;
    let access_token = state.sessions.access_token(&session_token).await?;
    state.sessions.refresh_session(&session_token).await;
    Some(access_token)
}

/// Resolve a client-supplied `Authorization: Bearer <token>` header
pub fn resolve_bearer_credential(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
