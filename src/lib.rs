use std::sync::Arc;

use axum::routing::{get, post};
use axum::{middleware, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod errors;
pub mod gate;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;

use state::AppState;

/// Full site router, Route Gate included, shared by main and the integration
/// tests.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::health::home))
        .route("/health", get(handlers::health::health))
        .route("/api/calendar", get(handlers::calendar::get_slots))
        .route(
            "/api/appointments",
            post(handlers::calendar::book_appointment),
        )
        .route("/api/auth/status", get(handlers::calendar::get_auth_status))
        .route(
            "/api/ui/chatbot",
            get(handlers::chatbot::get_state).post(handlers::chatbot::update_state),
        )
        .route("/sitemap.xml", get(handlers::sitemap::sitemap))
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            gate::route_gate,
        ))
        .layer(middleware::from_fn(gate::response_headers))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
