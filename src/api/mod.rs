//! HTTP API server

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::repository::OrderRepository;

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

/// Build the API router using the provided application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/transportationorders",
            get(handlers::list_orders)
                .post(handlers::create_order)
                .put(handlers::update_order),
        )
        .route(
            "/transportationorders/:truck",
            get(handlers::get_order).delete(handlers::delete_order),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Convenience helper wrapping a repository directly
pub fn create_repository_router(repository: Arc<dyn OrderRepository>) -> Router {
    create_router(AppState::new(repository))
}
