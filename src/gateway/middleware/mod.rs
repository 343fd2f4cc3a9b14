// Middleware module - Axum middleware

pub mod cors;
pub mod web_auth;

pub use cors::cors_layer;
pub use web_auth::web_auth_middleware;
