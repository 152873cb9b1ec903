//! Image Accessor Module
//!
//! The facade between the HTTP layer and the cache: loads images through
//! the decoder and answers pixel-level queries against cached handles.

use std::path::PathBuf;
use std::sync::Arc;

use ndarray::ArrayD;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::cache::{CacheStats, ImageCache};
use crate::error::{RelayError, Result};
use crate::image::{AxisRange, Header, ImageDecoder, ImageHandle};

// == View Data ==
/// A materialized sub-array: its shape plus row-major samples.
#[derive(Debug, Clone, Serialize)]
pub struct ViewData {
    pub shape: Vec<usize>,
    pub samples: Vec<f64>,
}

impl From<ArrayD<f64>> for ViewData {
    fn from(arr: ArrayD<f64>) -> Self {
        Self {
            shape: arr.shape().to_vec(),
            samples: arr.iter().copied().collect(),
        }
    }
}

// == Image Accessor ==
/// Facade over the bounded image cache.
///
/// The cache is injected at construction and owned here; there is no
/// process-wide cache state. Decoding runs on the blocking thread pool
/// outside the cache lock, and the lock is held only for the duration of
/// the cache operation itself, so a slow decode never blocks queries on
/// other paths. Cached handles are immutable, so queries run lock-free
/// once the handle is fetched.
pub struct ImageAccessor {
    cache: Arc<RwLock<ImageCache>>,
    decoder: Arc<dyn ImageDecoder>,
}

impl ImageAccessor {
    // == Constructor ==
    /// Creates an accessor owning `cache` and decoding through `decoder`.
    pub fn new(cache: ImageCache, decoder: Arc<dyn ImageDecoder>) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            decoder,
        }
    }

    // == Load ==
    /// Decodes the image at `path` and caches it under that exact string.
    ///
    /// `unit` selects a sub-image for container formats; `axis_path`
    /// reduces data with more than two axes to a plane. Re-loading a
    /// cached path re-decodes unconditionally and replaces the entry.
    /// Returns the resulting shape and a copy of the header.
    pub async fn load(
        &self,
        path: &str,
        unit: Option<usize>,
        axis_path: &[usize],
    ) -> Result<(Vec<usize>, Header)> {
        let decoder = Arc::clone(&self.decoder);
        let file = PathBuf::from(path);
        let decoded = tokio::task::spawn_blocking(move || decoder.decode(&file, unit))
            .await
            .map_err(|e| RelayError::Internal(format!("Decode task failed: {e}")))??;

        let handle = ImageHandle::from_decoded(decoded, axis_path)?;
        let shape = handle.shape();
        let header = handle.header().clone();

        let mut cache = self.cache.write().await;
        cache.insert(path.to_string(), Arc::new(handle));
        drop(cache);

        info!(%path, ?shape, "image loaded");
        Ok((shape, header))
    }

    // == Min/Max ==
    /// Sample extrema for the cached image at `path`.
    ///
    /// An unloaded path reports `(0.0, 0.0)` with `loaded` false instead of
    /// failing; the flag lets callers tell that apart from a genuinely
    /// flat-zero image. `noinf` excludes non-finite samples from the scan.
    pub async fn get_minmax(&self, path: &str, noinf: bool) -> (f64, f64, bool) {
        match self.fetch(path).await {
            Ok(handle) => {
                let (lo, hi) = handle.minmax(noinf);
                (lo, hi, true)
            }
            Err(_) => {
                debug!(%path, "minmax on unloaded path, reporting zero range");
                (0.0, 0.0, false)
            }
        }
    }

    // == View ==
    /// Sub-array of the cached image selected by `region`.
    pub async fn get_view(&self, path: &str, region: &[AxisRange]) -> Result<ViewData> {
        let handle = self.fetch(path).await?;
        Ok(handle.view(region)?.into())
    }

    // == Pixel ==
    /// The sample at column `x`, row `y`.
    pub async fn get_data_xy(&self, path: &str, x: usize, y: usize) -> Result<f64> {
        let handle = self.fetch(path).await?;
        handle.pixel(x, y)
    }

    // == Line Profile ==
    /// Ordered samples along the segment from `(x1, y1)` to `(x2, y2)`.
    pub async fn get_pixels_on_line(
        &self,
        path: &str,
        x1: usize,
        y1: usize,
        x2: usize,
        y2: usize,
    ) -> Result<Vec<f64>> {
        let handle = self.fetch(path).await?;
        handle.pixels_on_line(x1, y1, x2, y2)
    }

    // == Whole-Image Data ==
    /// Whole-image transfer is disabled by policy and always fails,
    /// loaded or not. Clients are expected to pull views, pixels, or line
    /// profiles instead.
    pub fn get_data(&self, _path: &str) -> Result<ViewData> {
        Err(RelayError::Unsupported(
            "Whole-image data transfer is disabled; request a view instead".to_string(),
        ))
    }

    // == Stats ==
    /// Current cache statistics.
    pub async fn stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }

    // == Fetch ==
    /// Looks up `path`, recording a hit or miss.
    async fn fetch(&self, path: &str) -> Result<Arc<ImageHandle>> {
        let mut cache = self.cache.write().await;
        cache.get(path)
    }
}
