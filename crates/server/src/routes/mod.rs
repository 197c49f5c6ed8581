//! HTTP route handlers for the catalog server.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health         - Liveness check
//! GET    /health/ready   - Readiness check (database)
//!
//! # Products
//! GET    /productos      - Product listing
//! POST   /productos      - Create product
//! GET    /producto/{id}  - Product detail (`null` when missing)
//! PUT    /producto/{id}  - Partial update
//! DELETE /producto/{id}  - Delete product
//!
//! # Uploads
//! POST   /upload         - Store an image (multipart field `imagen`)
//! GET    /uploads/*      - Stored images
//!
//! GET    /*              - Static files from the public directory
//! ```

pub mod health;
pub mod products;
pub mod upload;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultOnResponse, OnResponse, TraceLayer},
};
use tracing::Span;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/productos", get(products::index).post(products::create))
        .route(
            "/producto/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::delete),
        )
}

/// Create the health routes router.
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
}

/// Build the complete application router.
///
/// Sentry layers are not included; the binary adds them outermost.
pub fn router(state: AppState) -> Router {
    let config = state.config();
    let upload_limit = DefaultBodyLimit::max(config.max_upload_bytes);
    let uploads = ServeDir::new(state.uploads().dir());
    let public = ServeDir::new(&config.public_dir);

    Router::new()
        .merge(health_routes())
        .merge(product_routes())
        .route("/upload", post(upload::upload).layer(upload_limit))
        .nest_service("/uploads", uploads)
        .fallback_service(public)
        .layer(CorsLayer::permissive())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                        request_id = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}
