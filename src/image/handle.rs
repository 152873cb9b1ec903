//! Image Handle Module
//!
//! The decoded image held by the cache: an n-dimensional sample array plus
//! the header recorded at decode time. Handles are immutable once built, so
//! they can be shared freely across concurrent requests.

use ndarray::{ArrayD, ArrayView2, Axis, Ix2};

use crate::error::{RelayError, Result};
use crate::image::decode::DecodedImage;
use crate::image::header::Header;
use crate::image::region::{to_slice_elems, AxisRange};

// == Image Handle ==
/// A decoded image: samples as `f64` plus metadata.
///
/// Two-dimensional data is addressed as `[row, col]`. Data with more axes
/// (e.g. channels-first color planes) supports `minmax` and `view`
/// directly; pixel and line queries require the handle to have been
/// reduced to a single plane with an axis path at load time.
#[derive(Debug)]
pub struct ImageHandle {
    data: ArrayD<f64>,
    header: Header,
}

impl ImageHandle {
    // == Constructor ==
    /// Wraps an already-shaped sample array.
    pub fn new(data: ArrayD<f64>, header: Header) -> Self {
        Self { data, header }
    }

    /// Builds a handle from freshly decoded data, applying `axis_path`.
    ///
    /// Each axis-path index selects one hyperplane along the current leading
    /// axis, so `[1]` on `[3, h, w]` data picks channel 1. Indexing is
    /// refused once only two axes remain.
    pub fn from_decoded(decoded: DecodedImage, axis_path: &[usize]) -> Result<Self> {
        let mut data = decoded.data;
        for &idx in axis_path {
            if data.ndim() <= 2 {
                return Err(RelayError::InvalidRequest(format!(
                    "Axis path is too deep: image reduced to {} axes",
                    data.ndim()
                )));
            }
            let extent = data.shape()[0];
            if idx >= extent {
                return Err(RelayError::InvalidRequest(format!(
                    "Axis path index {idx} exceeds leading axis length {extent}"
                )));
            }
            data = data.index_axis_move(Axis(0), idx);
        }
        Ok(Self {
            data,
            header: decoded.header,
        })
    }

    // == Shape ==
    /// Dimensions of the sample array, outermost axis first.
    pub fn shape(&self) -> Vec<usize> {
        self.data.shape().to_vec()
    }

    // == Header ==
    /// Metadata recorded at decode time.
    pub fn header(&self) -> &Header {
        &self.header
    }

    // == Min/Max ==
    /// Sample extrema as `(min, max)`.
    ///
    /// NaN samples are always skipped; with `noinf`, infinite samples are
    /// skipped as well. An image with no countable samples reports
    /// `(0.0, 0.0)`.
    pub fn minmax(&self, noinf: bool) -> (f64, f64) {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        let mut counted = false;

        for &v in self.data.iter() {
            if v.is_nan() || (noinf && v.is_infinite()) {
                continue;
            }
            lo = lo.min(v);
            hi = hi.max(v);
            counted = true;
        }

        if counted {
            (lo, hi)
        } else {
            (0.0, 0.0)
        }
    }

    // == Pixel ==
    /// The sample at column `x`, row `y` of the 2-D plane.
    pub fn pixel(&self, x: usize, y: usize) -> Result<f64> {
        let plane = self.plane()?;
        let (height, width) = plane.dim();
        if x >= width || y >= height {
            return Err(RelayError::OutOfBounds {
                x,
                y,
                width,
                height,
            });
        }
        Ok(plane[[y, x]])
    }

    // == Line Profile ==
    /// Ordered samples along the discrete segment from `(x1, y1)` to
    /// `(x2, y2)`, endpoints inclusive.
    ///
    /// The segment is walked with an integer Bresenham stepper covering all
    /// octants; both endpoints must lie inside the plane.
    pub fn pixels_on_line(&self, x1: usize, y1: usize, x2: usize, y2: usize) -> Result<Vec<f64>> {
        let plane = self.plane()?;
        let (height, width) = plane.dim();
        for &(x, y) in &[(x1, y1), (x2, y2)] {
            if x >= width || y >= height {
                return Err(RelayError::OutOfBounds {
                    x,
                    y,
                    width,
                    height,
                });
            }
        }

        let (x2i, y2i) = (x2 as i64, y2 as i64);
        let (mut x, mut y) = (x1 as i64, y1 as i64);
        let dx = (x2i - x).abs();
        let dy = -(y2i - y).abs();
        let sx = if x < x2i { 1 } else { -1 };
        let sy = if y < y2i { 1 } else { -1 };
        let mut err = dx + dy;

        let mut samples = Vec::with_capacity((dx.max(-dy) + 1) as usize);
        loop {
            samples.push(plane[[y as usize, x as usize]]);
            if x == x2i && y == y2i {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
        Ok(samples)
    }

    // == View ==
    /// Copies out the sub-array selected by `region`.
    pub fn view(&self, region: &[AxisRange]) -> Result<ArrayD<f64>> {
        let elems = to_slice_elems(region, self.data.shape())?;
        Ok(self.data.slice(elems.as_slice()).to_owned())
    }

    // == Plane ==
    /// The 2-D view backing pixel addressing.
    fn plane(&self) -> Result<ArrayView2<'_, f64>> {
        self.data
            .view()
            .into_dimensionality::<Ix2>()
            .map_err(|_| {
                RelayError::InvalidRequest(format!(
                    "Image has {} axes; pixel addressing needs 2 (load with an axis path)",
                    self.data.ndim()
                ))
            })
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    /// 3 rows x 4 cols ramp: sample at (x, y) is y * 10 + x.
    fn ramp() -> ImageHandle {
        let data = array![
            [0.0, 1.0, 2.0, 3.0],
            [10.0, 11.0, 12.0, 13.0],
            [20.0, 21.0, 22.0, 23.0]
        ]
        .into_dyn();
        ImageHandle::new(data, Header::new())
    }

    fn decoded(data: ArrayD<f64>) -> DecodedImage {
        DecodedImage {
            data,
            header: Header::new(),
        }
    }

    #[test]
    fn test_shape() {
        assert_eq!(ramp().shape(), vec![3, 4]);
    }

    #[test]
    fn test_minmax() {
        assert_eq!(ramp().minmax(false), (0.0, 23.0));
    }

    #[test]
    fn test_minmax_skips_nan() {
        let data = array![[f64::NAN, 5.0], [2.0, 7.0]].into_dyn();
        let handle = ImageHandle::new(data, Header::new());
        assert_eq!(handle.minmax(false), (2.0, 7.0));
    }

    #[test]
    fn test_minmax_noinf_excludes_infinite() {
        let data = array![[f64::INFINITY, 5.0], [f64::NEG_INFINITY, 7.0]].into_dyn();
        let handle = ImageHandle::new(data, Header::new());

        let (lo, hi) = handle.minmax(false);
        assert_eq!(lo, f64::NEG_INFINITY);
        assert_eq!(hi, f64::INFINITY);

        assert_eq!(handle.minmax(true), (5.0, 7.0));
    }

    #[test]
    fn test_minmax_empty_scan_reports_zero() {
        let data = array![[f64::NAN, f64::NAN]].into_dyn();
        let handle = ImageHandle::new(data, Header::new());
        assert_eq!(handle.minmax(false), (0.0, 0.0));
    }

    #[test]
    fn test_pixel_is_column_then_row() {
        let handle = ramp();
        // x = column, y = row
        assert_eq!(handle.pixel(3, 0).unwrap(), 3.0);
        assert_eq!(handle.pixel(0, 2).unwrap(), 20.0);
        assert_eq!(handle.pixel(1, 1).unwrap(), 11.0);
    }

    #[test]
    fn test_pixel_out_of_bounds() {
        let handle = ramp();
        assert!(matches!(
            handle.pixel(4, 0),
            Err(RelayError::OutOfBounds { .. })
        ));
        assert!(matches!(
            handle.pixel(0, 3),
            Err(RelayError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_pixel_requires_two_axes() {
        let data = ndarray::Array::zeros(ndarray::IxDyn(&[2, 3, 4]));
        let handle = ImageHandle::new(data, Header::new());
        assert!(matches!(
            handle.pixel(0, 0),
            Err(RelayError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_line_horizontal() {
        let samples = ramp().pixels_on_line(0, 1, 3, 1).unwrap();
        assert_eq!(samples, vec![10.0, 11.0, 12.0, 13.0]);
    }

    #[test]
    fn test_line_vertical() {
        let samples = ramp().pixels_on_line(2, 0, 2, 2).unwrap();
        assert_eq!(samples, vec![2.0, 12.0, 22.0]);
    }

    #[test]
    fn test_line_diagonal() {
        let samples = ramp().pixels_on_line(0, 0, 2, 2).unwrap();
        assert_eq!(samples, vec![0.0, 11.0, 22.0]);
    }

    #[test]
    fn test_line_reversed_direction() {
        let samples = ramp().pixels_on_line(3, 1, 0, 1).unwrap();
        assert_eq!(samples, vec![13.0, 12.0, 11.0, 10.0]);
    }

    #[test]
    fn test_line_single_point() {
        let samples = ramp().pixels_on_line(1, 1, 1, 1).unwrap();
        assert_eq!(samples, vec![11.0]);
    }

    #[test]
    fn test_line_endpoint_out_of_bounds() {
        assert!(matches!(
            ramp().pixels_on_line(0, 0, 9, 9),
            Err(RelayError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_view_sub_rectangle() {
        let region = [
            AxisRange {
                start: Some(1),
                stop: Some(3),
                step: None,
            },
            AxisRange {
                start: Some(1),
                stop: Some(3),
                step: None,
            },
        ];
        let view = ramp().view(&region).unwrap();
        assert_eq!(view.shape(), &[2, 2]);
        let flat: Vec<f64> = view.iter().copied().collect();
        assert_eq!(flat, vec![11.0, 12.0, 21.0, 22.0]);
    }

    #[test]
    fn test_view_with_step() {
        let region = [
            AxisRange::full(),
            AxisRange {
                start: None,
                stop: None,
                step: Some(2),
            },
        ];
        let view = ramp().view(&region).unwrap();
        assert_eq!(view.shape(), &[3, 2]);
        let flat: Vec<f64> = view.iter().copied().collect();
        assert_eq!(flat, vec![0.0, 2.0, 10.0, 12.0, 20.0, 22.0]);
    }

    #[test]
    fn test_from_decoded_axis_path_selects_plane() {
        // 2 channels of 2x2
        let data = array![[[1.0, 2.0], [3.0, 4.0]], [[5.0, 6.0], [7.0, 8.0]]].into_dyn();
        let handle = ImageHandle::from_decoded(decoded(data), &[1]).unwrap();
        assert_eq!(handle.shape(), vec![2, 2]);
        assert_eq!(handle.pixel(0, 0).unwrap(), 5.0);
        assert_eq!(handle.minmax(false), (5.0, 8.0));
    }

    #[test]
    fn test_from_decoded_axis_path_index_out_of_range() {
        let data = ndarray::Array::zeros(ndarray::IxDyn(&[2, 3, 4]));
        let result = ImageHandle::from_decoded(decoded(data), &[5]);
        assert!(matches!(result, Err(RelayError::InvalidRequest(_))));
    }

    #[test]
    fn test_from_decoded_axis_path_too_deep() {
        let data = ndarray::Array::zeros(ndarray::IxDyn(&[3, 4]));
        let result = ImageHandle::from_decoded(decoded(data), &[0]);
        assert!(matches!(result, Err(RelayError::InvalidRequest(_))));
    }
}
