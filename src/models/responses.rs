//! Response DTOs for the image server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::accessor::ViewData;
use crate::cache::CacheStats;
use crate::image::Header;

/// Response body for the load operation (POST /load)
#[derive(Debug, Clone, Serialize)]
pub struct LoadResponse {
    /// The cache key the image now lives under
    pub path: String,
    /// Dimensions of the cached data, outermost axis first
    pub shape: Vec<usize>,
    /// Metadata recorded at decode time
    pub header: Header,
}

impl LoadResponse {
    /// Creates a new LoadResponse
    pub fn new(path: impl Into<String>, shape: Vec<usize>, header: Header) -> Self {
        Self {
            path: path.into(),
            shape,
            header,
        }
    }
}

/// Response body for the minmax operation (GET /minmax)
///
/// `loaded` distinguishes a genuinely flat-zero image from the `(0, 0)`
/// reported for a path that was never loaded.
#[derive(Debug, Clone, Serialize)]
pub struct MinMaxResponse {
    pub path: String,
    pub min: f64,
    pub max: f64,
    pub loaded: bool,
}

impl MinMaxResponse {
    /// Creates a new MinMaxResponse
    pub fn new(path: impl Into<String>, min: f64, max: f64, loaded: bool) -> Self {
        Self {
            path: path.into(),
            min,
            max,
            loaded,
        }
    }
}

/// Response body for the view operation (POST /view)
#[derive(Debug, Clone, Serialize)]
pub struct ViewResponse {
    pub path: String,
    /// Shape of the extracted sub-array
    pub shape: Vec<usize>,
    /// Row-major samples of the sub-array
    pub samples: Vec<f64>,
}

impl ViewResponse {
    /// Creates a new ViewResponse from extracted view data
    pub fn new(path: impl Into<String>, view: ViewData) -> Self {
        Self {
            path: path.into(),
            shape: view.shape,
            samples: view.samples,
        }
    }
}

/// Response body for the pixel operation (GET /pixel)
#[derive(Debug, Clone, Serialize)]
pub struct PixelResponse {
    pub path: String,
    pub x: usize,
    pub y: usize,
    pub value: f64,
}

impl PixelResponse {
    /// Creates a new PixelResponse
    pub fn new(path: impl Into<String>, x: usize, y: usize, value: f64) -> Self {
        Self {
            path: path.into(),
            x,
            y,
            value,
        }
    }
}

/// Response body for the line-profile operation (GET /line)
#[derive(Debug, Clone, Serialize)]
pub struct LineResponse {
    pub path: String,
    /// Number of sampled points
    pub count: usize,
    /// Samples ordered from the first endpoint to the second
    pub samples: Vec<f64>,
}

impl LineResponse {
    /// Creates a new LineResponse
    pub fn new(path: impl Into<String>, samples: Vec<f64>) -> Self {
        Self {
            path: path.into(),
            count: samples.len(),
            samples,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of evictions
    pub evictions: u64,
    /// Number of images decoded and inserted
    pub loads: u64,
    /// Current number of resident images
    pub resident: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(stats: &CacheStats) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            loads: stats.loads,
            resident: stats.resident,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
