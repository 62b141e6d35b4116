//! # Stazy API
//!
//! HTTP and WebSocket surface of the Stazy backend, built on actix-web.
//! Handlers are thin: they validate input, call a core service and map the
//! result or error to JSON.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use app::create_app;
pub use state::{AppState, HealthProbe, Repositories};
