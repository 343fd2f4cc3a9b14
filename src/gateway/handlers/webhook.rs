//! Telephony webhook passthrough.
//!
//! The voice platform signs its delivery payloads, so this route relays the
//! body byte-for-byte to the backend's webhook endpoint and skips credential
//! resolution and JSON handling entirely.

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, HeaderMap, Method},
    response::{IntoResponse, Response},
};

use crate::gateway::backend::VOICE_SIGNATURE_HEADER;
use crate::gateway::bridge::{self, BridgeError};
use crate::gateway::server::AppState;

const WEBHOOK_PATH: &str = "/webhooks/voice";

pub async fn voice_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let url = match bridge::backend_target(&state, WEBHOOK_PATH) {
        Ok(url) => url,
        Err(e) => return e.into_response(),
    };

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    let signature = headers
        .get(VOICE_SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    let forwarded = match state
        .backend
        .send_raw(Method::POST, &url, content_type, signature, body)
        .await
    {
        Ok(forwarded) => forwarded,
        Err(cause) => return BridgeError::Transport(cause).into_response(),
    };

    match Response::builder()
        .status(forwarded.status)
        .body(Body::from(forwarded.body))
    {
        Ok(response) => response,
        Err(e) => BridgeError::Transport(e.to_string()).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::testing::{test_state, StubForwarder};
    use axum::http::{HeaderValue, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn payload_and_signature_are_relayed_untouched() {
        let stub = StubForwarder::replying(StatusCode::OK, json!({"received": true}));
        let state = test_state(Some("http://backend"), stub.clone());

        let raw = Bytes::from_static(b"{\"event\":\"call.ended\",\"call_id\":\"c1\"}");
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(
            VOICE_SIGNATURE_HEADER,
            HeaderValue::from_static("sig-abc"),
        );

        let response = voice_webhook(State(state), headers, raw.clone()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let call = stub.last_call().unwrap();
        assert_eq!(call.url, "http://backend/webhooks/voice");
        assert_eq!(call.raw_body.as_ref().unwrap(), &raw);
        assert_eq!(call.signature.as_deref(), Some("sig-abc"));
        assert_eq!(call.content_type.as_deref(), Some("application/json"));
        // No bearer is ever attached to webhook deliveries
        assert_eq!(call.bearer, None);
    }

    #[tokio::test]
    async fn missing_origin_fails_without_delivery() {
        let stub = StubForwarder::replying(StatusCode::OK, json!({}));
        let state = test_state(None, stub.clone());

        let response = voice_webhook(
            State(state),
            HeaderMap::new(),
            Bytes::from_static(b"{}"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn unreachable_backend_maps_to_502() {
        let stub = StubForwarder::failing("dns failure");
        let state = test_state(Some("http://backend"), stub);

        let response = voice_webhook(
            State(state),
            HeaderMap::new(),
            Bytes::from_static(b"{}"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
