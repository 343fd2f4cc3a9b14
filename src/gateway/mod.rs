// gateway module - dashboard API gateway service

pub mod backend;    // Outbound client for the business backend
pub mod bridge;     // Session-authenticated proxy bridge
pub mod credentials; // Inbound credential resolution
pub mod envelope;   // Response envelope conventions
pub mod handlers;   // API endpoint handlers
pub mod middleware; // Axum middleware
pub mod server;     // Router and server lifecycle

#[cfg(test)]
pub mod testing;

pub use server::ConsoleServer;
