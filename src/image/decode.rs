//! Image Decoding Module
//!
//! The decoder seam between the cache and on-disk formats. The built-in
//! `RasterDecoder` handles the common raster formats supported by the
//! `image` crate; other formats plug in behind the `ImageDecoder` trait.

use std::path::Path;

use image::{DynamicImage, ImageBuffer, ImageReader, Pixel};
use ndarray::{ArrayD, IxDyn};

use crate::error::{RelayError, Result};
use crate::image::header::Header;

// == Decoded Image ==
/// Raw output of a decoder: the sample array plus the header describing it.
///
/// Single-channel images decode to `[rows, cols]`; multi-channel images are
/// channels-first `[channels, rows, cols]` so a load-time axis path can
/// select one plane.
#[derive(Debug)]
pub struct DecodedImage {
    pub data: ArrayD<f64>,
    pub header: Header,
}

// == Decoder Trait ==
/// Turns a file into a `DecodedImage`.
///
/// `unit` selects a sub-image for container formats that hold several;
/// decoders reject units they cannot express.
pub trait ImageDecoder: Send + Sync {
    fn decode(&self, path: &Path, unit: Option<usize>) -> Result<DecodedImage>;
}

// == Raster Decoder ==
/// Decoder for common raster formats (PNG, JPEG, TIFF, ...).
///
/// Subpixel values are carried into `f64` unscaled, so an 8-bit sample of
/// 200 stays 200.0.
#[derive(Debug, Default)]
pub struct RasterDecoder;

impl RasterDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl ImageDecoder for RasterDecoder {
    fn decode(&self, path: &Path, unit: Option<usize>) -> Result<DecodedImage> {
        if let Some(u) = unit {
            if u != 0 {
                return Err(RelayError::InvalidRequest(format!(
                    "{} exposes a single image unit; unit {u} does not exist",
                    path.display()
                )));
            }
        }

        let reader = ImageReader::open(path)
            .map_err(|e| RelayError::Decode(format!("Cannot open {}: {e}", path.display())))?
            .with_guessed_format()
            .map_err(|e| RelayError::Decode(format!("Cannot probe {}: {e}", path.display())))?;
        let format = reader.format();
        let img = reader
            .decode()
            .map_err(|e| RelayError::Decode(format!("Cannot decode {}: {e}", path.display())))?;

        let (data, channels) = samples(&img);

        let mut header = Header::new();
        header.insert("width", img.width());
        header.insert("height", img.height());
        header.insert("channels", channels as u64);
        header.insert("color", format!("{:?}", img.color()));
        if let Some(format) = format {
            header.insert("format", format.to_mime_type());
        }

        Ok(DecodedImage { data, header })
    }
}

// == Sample Extraction ==
/// Copies a decoded buffer into an `f64` array: `[rows, cols]` for one
/// channel, channels-first `[channels, rows, cols]` otherwise.
fn samples(img: &DynamicImage) -> (ArrayD<f64>, usize) {
    match img {
        DynamicImage::ImageLuma8(buf) => grid(buf),
        DynamicImage::ImageLumaA8(buf) => grid(buf),
        DynamicImage::ImageRgb8(buf) => grid(buf),
        DynamicImage::ImageRgba8(buf) => grid(buf),
        DynamicImage::ImageLuma16(buf) => grid(buf),
        DynamicImage::ImageLumaA16(buf) => grid(buf),
        DynamicImage::ImageRgb16(buf) => grid(buf),
        DynamicImage::ImageRgba16(buf) => grid(buf),
        DynamicImage::ImageRgb32F(buf) => grid(buf),
        DynamicImage::ImageRgba32F(buf) => grid(buf),
        other => grid(&other.to_rgba32f()),
    }
}

fn grid<P>(buf: &ImageBuffer<P, Vec<P::Subpixel>>) -> (ArrayD<f64>, usize)
where
    P: Pixel,
    P::Subpixel: Into<f64>,
{
    let (width, height) = buf.dimensions();
    let (width, height) = (width as usize, height as usize);
    let channels = P::CHANNEL_COUNT as usize;
    let raw = buf.as_raw();

    if channels == 1 {
        let flat: Vec<f64> = raw.iter().map(|&s| s.into()).collect();
        let data = ArrayD::from_shape_vec(IxDyn(&[height, width]), flat)
            .expect("sample count matches dimensions");
        (data, 1)
    } else {
        // Interleaved subpixels re-packed channels-first
        let mut flat = Vec::with_capacity(channels * height * width);
        for ch in 0..channels {
            for y in 0..height {
                for x in 0..width {
                    flat.push(raw[(y * width + x) * channels + ch].into());
                }
            }
        }
        let data = ArrayD::from_shape_vec(IxDyn(&[channels, height, width]), flat)
            .expect("sample count matches dimensions");
        (data, channels)
    }
}
