// Handlers module - API endpoint handlers

pub mod agent;
pub mod auth;
pub mod entities;
pub mod mock;
pub mod webhook;
