//! API Module
//!
//! HTTP handlers and routing for the image server REST API.
//!
//! # Endpoints
//! - `POST /load` - Decode an image and cache it under its path
//! - `GET /minmax` - Sample extrema for a loaded image
//! - `POST /view` - Extract a sub-array by region descriptor
//! - `GET /pixel` - Single sample at (x, y)
//! - `GET /line` - Samples along a line segment
//! - `GET /data` - Disabled whole-image transfer (always fails)
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
