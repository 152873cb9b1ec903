//! API Handlers
//!
//! HTTP request handlers for each image server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::accessor::ImageAccessor;
use crate::cache::ImageCache;
use crate::config::Config;
use crate::error::{RelayError, Result};
use crate::image::RasterDecoder;
use crate::models::{
    DataParams, HealthResponse, LineParams, LineResponse, LoadRequest, LoadResponse, MinMaxParams,
    MinMaxResponse, PixelParams, PixelResponse, StatsResponse, ViewRequest, ViewResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The accessor facade fronting the bounded cache
    pub accessor: Arc<ImageAccessor>,
}

impl AppState {
    /// Creates a new AppState around an accessor.
    pub fn new(accessor: ImageAccessor) -> Self {
        Self {
            accessor: Arc::new(accessor),
        }
    }

    /// Creates a new AppState from configuration, using the built-in
    /// raster decoder.
    pub fn from_config(config: &Config) -> Self {
        let cache = ImageCache::new(config.cache_len);
        Self::new(ImageAccessor::new(cache, Arc::new(RasterDecoder::new())))
    }
}

/// Handler for POST /load
///
/// Decodes an image from the server filesystem and caches it under its path.
pub async fn load_handler(
    State(state): State<AppState>,
    Json(req): Json<LoadRequest>,
) -> Result<Json<LoadResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(RelayError::InvalidRequest(error_msg));
    }

    let (shape, header) = state
        .accessor
        .load(&req.path, req.unit, &req.axis_path)
        .await?;

    Ok(Json(LoadResponse::new(req.path, shape, header)))
}

/// Handler for GET /minmax
///
/// Reports sample extrema; unloaded paths report a zero range with
/// `loaded` false rather than an error.
pub async fn minmax_handler(
    State(state): State<AppState>,
    Query(params): Query<MinMaxParams>,
) -> Json<MinMaxResponse> {
    let (min, max, loaded) = state.accessor.get_minmax(&params.path, params.noinf).await;
    Json(MinMaxResponse::new(params.path, min, max, loaded))
}

/// Handler for POST /view
///
/// Extracts the sub-array selected by the region descriptor.
pub async fn view_handler(
    State(state): State<AppState>,
    Json(req): Json<ViewRequest>,
) -> Result<Json<ViewResponse>> {
    let view = state.accessor.get_view(&req.path, &req.region).await?;
    Ok(Json(ViewResponse::new(req.path, view)))
}

/// Handler for GET /pixel
pub async fn pixel_handler(
    State(state): State<AppState>,
    Query(params): Query<PixelParams>,
) -> Result<Json<PixelResponse>> {
    let value = state
        .accessor
        .get_data_xy(&params.path, params.x, params.y)
        .await?;
    Ok(Json(PixelResponse::new(
        params.path,
        params.x,
        params.y,
        value,
    )))
}

/// Handler for GET /line
pub async fn line_handler(
    State(state): State<AppState>,
    Query(params): Query<LineParams>,
) -> Result<Json<LineResponse>> {
    let samples = state
        .accessor
        .get_pixels_on_line(&params.path, params.x1, params.y1, params.x2, params.y2)
        .await?;
    Ok(Json(LineResponse::new(params.path, samples)))
}

/// Handler for GET /data
///
/// Whole-image transfer is disabled by policy; this always fails with 403
/// whether or not the path is loaded.
pub async fn data_handler(
    State(state): State<AppState>,
    Query(params): Query<DataParams>,
) -> Result<Json<ViewResponse>> {
    let view = state.accessor.get_data(&params.path)?;
    Ok(Json(ViewResponse::new(params.path, view)))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.accessor.stats().await;
    Json(StatsResponse::new(&stats))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
