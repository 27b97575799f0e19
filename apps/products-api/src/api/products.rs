//! Products API routes

use axum::Router;
use domain_products::{ProductService, handlers};

use crate::state::AppState;

/// Create products router
pub fn router(state: &AppState) -> Router {
    let service = ProductService::new(state.repository.clone());
    handlers::router(service)
}
