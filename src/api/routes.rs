//! API Routes
//!
//! Configures the Axum router with all image server endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    data_handler, health_handler, line_handler, load_handler, minmax_handler, pixel_handler,
    stats_handler, view_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /load` - Decode an image and cache it under its path
/// - `GET /minmax` - Sample extrema (zero range when not loaded)
/// - `POST /view` - Extract a sub-array by region descriptor
/// - `GET /pixel` - Single sample at (x, y)
/// - `GET /line` - Samples along a line segment
/// - `GET /data` - Disabled whole-image transfer (always 403)
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/load", post(load_handler))
        .route("/minmax", get(minmax_handler))
        .route("/view", post(view_handler))
        .route("/pixel", get(pixel_handler))
        .route("/line", get(line_handler))
        .route("/data", get(data_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
