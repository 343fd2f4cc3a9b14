//! Test doubles for the outbound network seam.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::http::{Method, StatusCode};
use bytes::Bytes;
use serde_json::Value;

use crate::gateway::backend::{ForwardedResponse, Forwarder};
use crate::gateway::server::AppState;
use crate::modules::config::ConsoleConfig;
use crate::modules::session::SessionManager;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    pub url: String,
    pub bearer: Option<String>,
    pub body: Option<Value>,
    pub raw_body: Option<Bytes>,
    pub content_type: Option<String>,
    pub signature: Option<String>,
}

enum StubBehavior {
    Reply { status: StatusCode, body: Bytes },
    Fail(String),
}

/// Scripted [`Forwarder`] that records every call and counts them, so tests
/// can assert the bridge's zero-outbound-call preconditions.
#[derive(Clone)]
pub struct StubForwarder {
    behavior: Arc<StubBehavior>,
    call_count: Arc<AtomicUsize>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl StubForwarder {
    pub fn replying(status: StatusCode, body: Value) -> Self {
        Self::with_behavior(StubBehavior::Reply {
            status,
            body: Bytes::from(serde_json::to_vec(&body).unwrap()),
        })
    }

    pub fn replying_raw(status: StatusCode, body: &str) -> Self {
        Self::with_behavior(StubBehavior::Reply {
            status,
            body: Bytes::from(body.to_string()),
        })
    }

    pub fn failing(cause: &str) -> Self {
        Self::with_behavior(StubBehavior::Fail(cause.to_string()))
    }

    fn with_behavior(behavior: StubBehavior) -> Self {
        Self {
            behavior: Arc::new(behavior),
            call_count: Arc::new(AtomicUsize::new(0)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        self.calls.lock().unwrap().last().cloned()
    }

    fn record(&self, call: RecordedCall) -> Result<ForwardedResponse, String> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().unwrap().push(call);

        match self.behavior.as_ref() {
            StubBehavior::Reply { status, body } => Ok(ForwardedResponse {
                status: *status,
                body: body.clone(),
            }),
            StubBehavior::Fail(cause) => Err(cause.clone()),
        }
    }
}

#[async_trait]
impl Forwarder for StubForwarder {
    async fn send_json(
        &self,
        method: Method,
        url: &str,
        bearer: Option<&str>,
        body: Option<&Value>,
    ) -> Result<ForwardedResponse, String> {
        self.record(RecordedCall {
            method,
            url: url.to_string(),
            bearer: bearer.map(str::to_string),
            body: body.cloned(),
            raw_body: None,
            content_type: None,
            signature: None,
        })
    }

    async fn send_raw(
        &self,
        method: Method,
        url: &str,
        content_type: Option<&str>,
        signature: Option<&str>,
        body: Bytes,
    ) -> Result<ForwardedResponse, String> {
        self.record(RecordedCall {
            method,
            url: url.to_string(),
            bearer: None,
            body: None,
            raw_body: Some(body),
            content_type: content_type.map(str::to_string),
            signature: signature.map(str::to_string),
        })
    }
}

/// App state wired to a stub forwarder and a fresh session store
pub fn test_state(backend_url: Option<&str>, stub: StubForwarder) -> AppState {
    let config = ConsoleConfig {
        backend_url: backend_url.map(str::to_string),
        ..Default::default()
    };

    AppState {
        config: Arc::new(config),
        backend: Arc::new(stub),
        sessions: Arc::new(SessionManager::new(1)),
    }
}
