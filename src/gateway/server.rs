use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use tokio::sync::oneshot;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::gateway::backend::{BackendClient, Forwarder};
use crate::gateway::handlers;
use crate::gateway::middleware;
use crate::modules::config::ConsoleConfig;
use crate::modules::session::SessionManager;

/// Axum application state. Everything the handlers need is constructed here
/// and passed down explicitly; there is no process-global lookup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ConsoleConfig>,
    pub backend: Arc<dyn Forwarder>,
    pub sessions: Arc<SessionManager>,
}

/// Console server instance
pub struct ConsoleServer {
    shutdown_tx: Option<oneshot::Sender<()>>,
}

/// Build the full application router for a given state
pub fn build_router(state: AppState) -> Router {
    let static_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("web");

    Router::new()
        // Session authentication
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/logout", post(handlers::auth::logout))
        .route("/api/auth/session", get(handlers::auth::session_status))
        // Proxied entity routes (cookie-session credential)
        .route(
            "/api/properties",
            get(handlers::entities::list_properties).post(handlers::entities::create_property),
        )
        .route(
            "/api/properties/:id",
            get(handlers::entities::get_property)
                .patch(handlers::entities::update_property)
                .delete(handlers::entities::delete_property),
        )
        .route("/api/leads", get(handlers::entities::list_leads))
        .route(
            "/api/leads/:id",
            get(handlers::entities::get_lead).patch(handlers::entities::update_lead),
        )
        .route("/api/tickets", get(handlers::entities::list_tickets))
        .route("/api/tickets/:id", axum::routing::patch(handlers::entities::update_ticket))
        .route(
            "/api/conversations",
            get(handlers::entities::list_conversations),
        )
        .route(
            "/api/conversations/:id",
            get(handlers::entities::get_conversation),
        )
        .route("/api/calls", get(handlers::entities::list_calls))
        .route("/api/calls/:id", get(handlers::entities::get_call))
        .route("/api/customers", get(handlers::entities::list_customers))
        .route("/api/users/me", get(handlers::entities::current_user))
        .route(
            "/api/voice/sessions",
            get(handlers::entities::list_voice_sessions),
        )
        .route(
            "/api/stats/overview",
            get(handlers::entities::stats_overview),
        )
        // Voice-agent service routes (bearer-header credential)
        .route(
            "/api/agent/properties/search",
            get(handlers::agent::search_properties),
        )
        .route("/api/agent/leads", post(handlers::agent::create_lead))
        // Demo creation endpoints (not persisted)
        .route("/api/bookings/create", post(handlers::mock::create_booking))
        .route(
            "/api/campaigns/create",
            post(handlers::mock::create_campaign),
        )
        .route("/api/leads/create", post(handlers::mock::create_lead))
        .route("/api/tickets/create", post(handlers::mock::create_ticket))
        .route("/api/payments/create", post(handlers::mock::create_payment))
        // Telephony webhook passthrough (no auth, raw body)
        .route("/webhooks/voice", post(handlers::webhook::voice_webhook))
        .route("/healthz", get(health_check_handler))
        // The fallback must be registered before the layers so the session
        // gate also covers dashboard page loads served from `web/`
        .fallback_service(ServeDir::new(static_dir).append_index_html_on_directories(true))
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::web_auth_middleware,
        ))
        .layer(middleware::cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

impl ConsoleServer {
    /// Start the console server
    pub async fn start(
        config: ConsoleConfig,
    ) -> Result<(Self, tokio::task::JoinHandle<()>), String> {
        let backend = BackendClient::new(config.request_timeout)?;
        let sessions = SessionManager::new(config.session_ttl_hours);

        let bind_address = config.bind_address();
        let addr = format!("{}:{}", bind_address, config.port);

        let state = AppState {
            config: Arc::new(config),
            backend: Arc::new(backend),
            sessions: Arc::new(sessions),
        };

        // Hourly sweep of expired sessions
        let cleanup_sessions = state.sessions.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(std::time::Duration::from_secs(3600));
            loop {
                interval.tick().await;
                cleanup_sessions.cleanup_expired().await;
            }
        });

        let app = build_router(state);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| format!("Failed to bind address {}: {}", addr, e))?;

        tracing::info!("Console server started at http://{}", addr);

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let serve = axum::serve(listener, app).with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            });
            if let Err(e) = serve.await {
                tracing::error!("Console server error: {:?}", e);
            }
            tracing::info!("Console server stopped listening");
        });

        Ok((Self { shutdown_tx: Some(shutdown_tx) }, handle))
    }

    /// Stop the server
    pub fn stop(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Health check handler
async fn health_check_handler() -> Response {
    Json(serde_json::json!({
        "status": "ok"
    }))
    .into_response()
}
