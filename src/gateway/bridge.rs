//! Session-authenticated proxy bridge.
//!
//! Every proxied route goes through [`forward`]: resolve the backend origin,
//! check the credential, issue exactly one outbound call, and map the result
//! back onto the inbound response. The error mapping is uniform across all
//! routes; handlers never hand-roll their own.

use axum::body::Body;
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use tracing::{error, warn};

use crate::gateway::envelope::{self, messages};
use crate::gateway::server::AppState;

/// Optional per-call rewrite of the outgoing JSON body
pub type BodyTransform = fn(Value) -> Value;

/// Failure classes of a bridged call, in precondition order
#[derive(Debug)]
pub enum BridgeError {
    /// Backend origin not configured; nothing was sent
    Config,
    /// No resolvable credential; nothing was sent
    Unauthorized,
    /// Backend unreachable or its response unreadable
    Transport(String),
}

impl IntoResponse for BridgeError {
    fn into_response(self) -> Response {
        match self {
            BridgeError::Config => {
                error!("Proxy bridge invoked without a configured backend origin (set BACKEND_URL)");
                envelope::error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    messages::SERVER_MISCONFIGURED,
                )
            }
            BridgeError::Unauthorized => {
                envelope::error_response(StatusCode::UNAUTHORIZED, messages::UNAUTHORIZED)
            }
            BridgeError::Transport(cause) => {
                // Internal cause stays in the log, never in the client body
                error!("Backend transport failure: {}", cause);
                envelope::error_response(StatusCode::BAD_GATEWAY, messages::BACKEND_UNREACHABLE)
            }
        }
    }
}

/// Resolve the configured backend origin and join it with a relative path
pub fn backend_target(state: &AppState, path: &str) -> Result<String, BridgeError> {
    let origin = state.config.backend_origin().ok_or(BridgeError::Config)?;
    Ok(format!("{}{}", origin, path))
}

/// Forward an inbound request to the backend and relay the result.
///
/// Preconditions are checked in order: configured origin first (500),
/// then credential (401). Neither failure produces an outbound call.
pub async fn forward(
    state: &AppState,
    credential: Option<String>,
    method: Method,
    path: &str,
    body: Option<Value>,
    transform: Option<BodyTransform>,
) -> Response {
    let url = match backend_target(state, path) {
        Ok(url) => url,
        Err(e) => return e.into_response(),
    };

    let Some(token) = credential else {
        return BridgeError::Unauthorized.into_response();
    };

    let body = match (body, transform) {
        (Some(value), Some(transform)) => Some(transform(value)),
        (body, _) => body,
    };

    let forwarded = match state
        .backend
        .send_json(method, &url, Some(&token), body.as_ref())
        .await
    {
        Ok(forwarded) => forwarded,
        Err(cause) => return BridgeError::Transport(cause).into_response(),
    };

    if forwarded.status.is_success() {
        // Relay the backend's JSON verbatim, status included
        return match Response::builder()
            .status(forwarded.status)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(forwarded.body))
        {
            Ok(response) => response,
            Err(e) => BridgeError::Transport(e.to_string()).into_response(),
        };
    }

    // Non-success: re-wrap the backend's error body in the uniform envelope
    let backend_error: Value =
        serde_json::from_slice(&forwarded.body).unwrap_or_else(|_| serde_json::json!({}));
    warn!("Backend returned {} for {}", forwarded.status, path);
    envelope::error_body_response(forwarded.status, backend_error)
}
