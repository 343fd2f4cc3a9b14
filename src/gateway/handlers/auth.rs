//! Session authentication endpoints.
//!
//! Login is the one backend call made without a credential: it exchanges the
//! user's email/password for a backend access token, which is then held in
//! the in-memory session store and referenced by the `simsar_session` cookie.

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::gateway::bridge::{self, BridgeError};
use crate::gateway::credentials::{extract_session_token, SESSION_COOKIE_NAME};
use crate::gateway::envelope::{self, messages};
use crate::gateway::server::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

fn session_cookie(value: &str, max_age_secs: i64) -> Result<HeaderValue, String> {
    HeaderValue::from_str(&format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        SESSION_COOKIE_NAME, value, max_age_secs
    ))
    .map_err(|e| e.to_string())
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Response {
    let url = match bridge::backend_target(&state, "/auth/login") {
        Ok(url) => url,
        Err(e) => return e.into_response(),
    };

    let body = json!({ "email": payload.email, "password": payload.password });

    let forwarded = match state
        .backend
        .send_json(Method::POST, &url, None, Some(&body))
        .await
    {
        Ok(forwarded) => forwarded,
        Err(cause) => return BridgeError::Transport(cause).into_response(),
    };

    if !forwarded.status.is_success() {
        let backend_error: Value =
            serde_json::from_slice(&forwarded.body).unwrap_or_else(|_| json!({}));
        warn!("Login rejected by backend with {}", forwarded.status);
        return envelope::error_body_response(forwarded.status, backend_error);
    }

    let login_body: Value = match serde_json::from_slice(&forwarded.body) {
        Ok(value) => value,
        Err(e) => {
            return BridgeError::Transport(format!("Unparsable login response: {}", e))
                .into_response()
        }
    };

    let Some(access_token) = login_body["access_token"].as_str() else {
        return BridgeError::Transport("Login response missing access_token".to_string())
            .into_response();
    };

    let session_token = state.sessions.create_session(access_token.to_string()).await;
    let cookie = match session_cookie(&session_token, state.config.session_ttl_hours * 3600) {
        Ok(cookie) => cookie,
        Err(cause) => return BridgeError::Transport(cause).into_response(),
    };

    info!("Dashboard session opened for {}", payload.email);

    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(json!({
            "success": true,
            "user": login_body.get("user").cloned().unwrap_or(Value::Null),
        })),
    )
        .into_response()
}

pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = extract_session_token(&headers) {
        state.sessions.delete_session(&token).await;
    }

    let expired = match session_cookie("", 0) {
        Ok(cookie) => cookie,
        Err(_) => HeaderValue::from_static(""),
    };

    (
        StatusCode::OK,
        [(header::SET_COOKIE, expired)],
        Json(json!({ "success": true, "message": messages::LOGGED_OUT })),
    )
        .into_response()
}

pub async fn session_status(State(state): State<AppState>, headers: HeaderMap) -> Response {
    match extract_session_token(&headers) {
        Some(token) if state.sessions.validate_session(&token).await => {
            Json(json!({ "authenticated": true })).into_response()
        }
        _ => envelope::error_response(StatusCode::UNAUTHORIZED, messages::UNAUTHORIZED),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::testing::{test_state, StubForwarder};
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> Value {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn login_request() -> Json<LoginRequest> {
        Json(LoginRequest {
            email: "admin@simsar.sa".to_string(),
            password: "secret".to_string(),
        })
    }

    #[tokio::test]
    async fn login_creates_session_and_sets_cookie() {
        let stub = StubForwarder::replying(
            StatusCode::OK,
            json!({"access_token": "backend-tok", "user": {"email": "admin@simsar.sa"}}),
        );
        let state = test_state(Some("http://backend"), stub.clone());

        let response = login(State(state.clone()), login_request()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(cookie.starts_with("simsar_session="));
        assert!(cookie.contains("HttpOnly"));

        // The stored session resolves back to the backend token
        let session_token = cookie
            .split(';')
            .next()
            .unwrap()
            .trim_start_matches("simsar_session=")
            .to_string();
        assert_eq!(
            state.sessions.access_token(&session_token).await.as_deref(),
            Some("backend-tok")
        );

        // Login itself carries no credential
        let call = stub.last_call().unwrap();
        assert_eq!(call.bearer, None);
        assert_eq!(call.url, "http://backend/auth/login");

        let value = body_json(response).await;
        assert_eq!(value["user"]["email"], json!("admin@simsar.sa"));
    }

    #[tokio::test]
    async fn backend_rejection_is_relayed_with_status() {
        let stub = StubForwarder::replying(
            StatusCode::UNAUTHORIZED,
            json!({"detail": "invalid credentials"}),
        );
        let state = test_state(Some("http://backend"), stub);

        let response = login(State(state), login_request()).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let value = body_json(response).await;
        assert_eq!(value["success"], json!(false));
        assert_eq!(value["error"]["detail"], json!("invalid credentials"));
    }

    #[tokio::test]
    async fn login_without_backend_origin_fails_fast() {
        let stub = StubForwarder::replying(StatusCode::OK, json!({}));
        let state = test_state(None, stub.clone());

        let response = login(State(state), login_request()).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn logout_invalidates_session() {
        let stub = StubForwarder::replying(StatusCode::OK, json!({}));
        let state = test_state(Some("http://backend"), stub);

        let session = state.sessions.create_session("tok".to_string()).await;
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("simsar_session={}", session)).unwrap(),
        );

        let response = logout(State(state.clone()), headers.clone()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(!state.sessions.validate_session(&session).await);

        let probe = session_status(State(state), headers).await;
        assert_eq!(probe.status(), StatusCode::UNAUTHORIZED);
    }
}
