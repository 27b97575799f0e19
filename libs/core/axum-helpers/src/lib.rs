//! # Axum Helpers
//!
//! Shared HTTP plumbing for the Axum services in this workspace.
//!
//! ## Modules
//!
//! - **[`server`]**: router setup, liveness endpoint, graceful shutdown
//! - **[`http`]**: HTTP middleware (CORS, security headers)
//! - **[`errors`]**: the JSON error envelope and status mapping
//! - **[`extractors`]**: `ValidatedJson`, which separates malformed bodies from invalid ones
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let config = ServerConfig::default();
//!     let router = create_router::<ApiDoc>(Router::new(), &config)?;
//!     create_app(router, &config).await
//! }
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    HealthResponse, ShutdownCoordinator, create_app, create_router, health_router,
    serve_until_shutdown, shutdown_signal,
};

pub use http::{create_cors_layer, create_permissive_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse, FieldViolation, field_violations};

pub use extractors::{ValidatedJson, ValidatedPayload};
