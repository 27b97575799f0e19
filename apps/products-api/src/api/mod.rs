//! API routes module

pub mod products;

use axum::Router;
use axum_helpers::server::{create_router, health_router};

use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/products", products::router(state))
        .merge(health_router(state.config.app))
}

/// API routes wrapped with docs, fallback and middleware
pub fn app(state: &AppState) -> std::io::Result<Router> {
    create_router::<ApiDoc>(routes(state), &state.config.server)
}
