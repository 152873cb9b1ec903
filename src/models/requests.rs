//! Request DTOs for the image server API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

use crate::image::AxisRange;

/// Request body for the load operation (POST /load)
///
/// # Fields
/// - `path`: filesystem path of the image, used verbatim as the cache key
/// - `unit`: optional sub-image index for container formats
/// - `axis_path`: optional leading-axis indices reducing n-d data to a plane
#[derive(Debug, Clone, Deserialize)]
pub struct LoadRequest {
    /// The image path
    pub path: String,
    /// Optional sub-image unit
    #[serde(default)]
    pub unit: Option<usize>,
    /// Optional axis path
    #[serde(default)]
    pub axis_path: Vec<usize>,
}

impl LoadRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.path.is_empty() {
            return Some("Path cannot be empty".to_string());
        }
        None
    }
}

/// Query parameters for the minmax operation (GET /minmax)
#[derive(Debug, Clone, Deserialize)]
pub struct MinMaxParams {
    /// The image path
    pub path: String,
    /// Exclude non-finite samples from the scan
    #[serde(default)]
    pub noinf: bool,
}

/// Request body for the view operation (POST /view)
#[derive(Debug, Clone, Deserialize)]
pub struct ViewRequest {
    /// The image path
    pub path: String,
    /// Per-axis ranges; omitted axes take their full extent
    #[serde(default)]
    pub region: Vec<AxisRange>,
}

/// Query parameters for the pixel operation (GET /pixel)
#[derive(Debug, Clone, Deserialize)]
pub struct PixelParams {
    /// The image path
    pub path: String,
    /// Column index
    pub x: usize,
    /// Row index
    pub y: usize,
}

/// Query parameters for the line-profile operation (GET /line)
#[derive(Debug, Clone, Deserialize)]
pub struct LineParams {
    /// The image path
    pub path: String,
    pub x1: usize,
    pub y1: usize,
    pub x2: usize,
    pub y2: usize,
}

/// Query parameters for the disabled whole-data operation (GET /data)
#[derive(Debug, Clone, Deserialize)]
pub struct DataParams {
    /// The image path
    pub path: String,
}
