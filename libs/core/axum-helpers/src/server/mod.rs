//! Server infrastructure module.
//!
//! - Router construction with OpenAPI documentation and middleware
//! - Liveness endpoint
//! - Graceful shutdown coordination
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_app, create_router, health_router};
//! use core_config::{app_info, server::ServerConfig};
//!
//! let config = ServerConfig::default();
//! let routes = api_routes.merge(health_router(app_info!("Products API")));
//! let router = create_router::<ApiDoc>(routes, &config)?;
//!
//! create_app(router, &config).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_app, create_router, serve_until_shutdown};
pub use health::{HealthResponse, health_handler, health_router};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
