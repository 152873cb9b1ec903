//! Image Module
//!
//! Decoded-image handles, decoding behind a trait seam, headers, and view
//! region descriptors.

mod decode;
mod handle;
mod header;
mod region;

// Re-export public types
pub use decode::{DecodedImage, ImageDecoder, RasterDecoder};
pub use handle::ImageHandle;
pub use header::Header;
pub use region::AxisRange;
