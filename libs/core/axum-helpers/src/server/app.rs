use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::not_found;
use crate::http::{create_cors_layer, create_permissive_cors_layer, security_headers};
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::future::IntoFuture;
use std::io;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, error, info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Binds the configured address and serves `router` until SIGINT/SIGTERM.
///
/// In-flight requests get `server_config.shutdown_timeout` to finish once a
/// signal arrives.
///
/// # Errors
/// Returns an error if the listener cannot bind or the server fails.
pub async fn create_app(router: Router, server_config: &ServerConfig) -> io::Result<()> {
    let listener = TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let coordinator = ShutdownCoordinator::new();
    let signals = {
        let coordinator = coordinator.clone();
        tokio::spawn(async move { coordinator.wait_for_signal().await })
    };

    let result = serve_until_shutdown(
        listener,
        router,
        coordinator,
        server_config.shutdown_timeout,
    )
    .await;

    signals.abort();
    result
}

/// Serves `router` on `listener` until `coordinator` initiates shutdown.
///
/// After shutdown starts, the server stops accepting connections and waits at
/// most `shutdown_timeout` for in-flight requests before returning.
pub async fn serve_until_shutdown(
    listener: TcpListener,
    router: Router,
    coordinator: ShutdownCoordinator,
    shutdown_timeout: Duration,
) -> io::Result<()> {
    let graceful = {
        let coordinator = coordinator.clone();
        async move { coordinator.wait_for_shutdown().await }
    };

    let server = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(graceful)
        .into_future();

    let deadline = async move {
        coordinator.wait_for_shutdown().await;
        tokio::time::sleep(shutdown_timeout).await;
    };

    tokio::select! {
        result = server => {
            result.inspect_err(|e| error!("Server encountered an error: {:?}", e))?;
            info!("Server drained all connections");
            Ok(())
        }
        _ = deadline => {
            warn!(
                "In-flight requests exceeded shutdown timeout of {:?}, forcing shutdown",
                shutdown_timeout
            );
            Ok(())
        }
    }
}

/// Wraps the API routes with documentation and cross-cutting middleware.
///
/// This sets up:
/// - Swagger UI at `/swagger-ui`, serving `/api-docs/openapi.json`
/// - the API routes at the root (no prefix)
/// - a JSON 404 fallback
/// - request tracing, security headers, CORS and response compression
///
/// CORS follows `server_config.cors_allowed_origin`: a comma-separated origin
/// list, or permissive when unset.
///
/// # Errors
/// Returns `InvalidInput` if the configured CORS origin list is empty or
/// invalid.
pub fn create_router<T>(apis: Router, server_config: &ServerConfig) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let cors_layer = match server_config.cors_allowed_origin.as_deref() {
        Some(origins) => {
            let layer = create_cors_layer(origins)?;
            info!("CORS configured with allowed origins: {}", origins);
            layer
        }
        None => {
            info!("CORS_ALLOWED_ORIGIN not set, allowing any origin");
            create_permissive_cors_layer()
        }
    };

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors_layer)
        .layer(CompressionLayer::new());

    Ok(router)
}
