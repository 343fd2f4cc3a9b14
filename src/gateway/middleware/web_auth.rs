//! Dashboard authentication middleware.
//!
//! Gates the management API and dashboard pages behind the session cookie.
//! Routes with their own auth (agent bearer routes), the demo creation
//! endpoints, the webhook passthrough, and static assets pass through.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use crate::gateway::credentials::extract_session_token;
use crate::gateway::envelope::{self, messages};
use crate::gateway::server::AppState;

/// Path prefixes that require a dashboard session
fn is_protected_path(path: &str) -> bool {
    if path.starts_with("/api/") {
        // Auth endpoints must stay reachable to establish a session
        if path.starts_with("/api/auth/") {
            return false;
        }
        // Agent routes carry their own bearer credential
        if path.starts_with("/api/agent/") {
            return false;
        }
        // Demo creation endpoints are callable without a session
        if path.ends_with("/create") {
            return false;
        }
        return true;
    }

    // Webhook deliveries are verified by the platform signature, not a session
    if path.starts_with("/webhooks/") {
        return false;
    }

    if is_static_asset(path) {
        return false;
    }

    if path == "/login.html" || path == "/login" {
        return false;
    }

    if path == "/healthz" {
        return false;
    }

    // Remaining paths (dashboard pages) require a session
    true
}

/// Whether the path is a static asset
fn is_static_asset(path: &str) -> bool {
    // HTML pages are not assets; they stay behind auth
    if path.ends_with(".html") {
        return false;
    }

    if path == "/favicon.ico" {
        return true;
    }

    if path.starts_with("/assets/") {
        return true;
    }

    matches!(
        path.rsplit('.').next(),
        Some("css")
            | Some("js")
            | Some("png")
            | Some("svg")
            | Some("jpg")
            | Some("jpeg")
            | Some("webp")
            | Some("ico")
            | Some("woff")
            | Some("woff2")
            | Some("ttf")
    )
}

/// Dashboard auth middleware
pub async fn web_auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    if !is_protected_path(&path) {
        return next.run(request).await;
    }

    if let Some(token) = extract_session_token(request.headers()) {
        if state.sessions.validate_session(&token).await {
            state.sessions.refresh_session(&token).await;
            return next.run(request).await;
        }
        debug!("Invalid session token for {}", path);
    }

    // API requests get a JSON 401; pages redirect to the login screen
    if path.starts_with("/api/") {
        return envelope::error_response(StatusCode::UNAUTHORIZED, messages::UNAUTHORIZED);
    }

    Redirect::to("/login.html").into_response()
}
