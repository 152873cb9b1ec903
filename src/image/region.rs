//! View Region Module
//!
//! Wire-level slice descriptor for sub-array extraction: one optional
//! `{start, stop, step}` range per axis, interpreted against the image's
//! sample array.

use ndarray::SliceInfoElem;
use serde::{Deserialize, Serialize};

use crate::error::{RelayError, Result};

// == Axis Range ==
/// Half-open range along one axis.
///
/// Omitted bounds default to the full axis extent; an omitted step
/// defaults to 1. Steps are strictly positive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AxisRange {
    /// First index, inclusive (default 0)
    #[serde(default)]
    pub start: Option<usize>,
    /// Last index, exclusive (default: axis length)
    #[serde(default)]
    pub stop: Option<usize>,
    /// Stride (default 1)
    #[serde(default)]
    pub step: Option<usize>,
}

impl AxisRange {
    /// Full extent of an axis.
    pub fn full() -> Self {
        Self::default()
    }
}

// == Slice Element Conversion ==
/// Validates a region against an array shape and produces one slice element
/// per axis. Axes beyond the region's length take their full extent; a
/// region longer than the shape is rejected.
pub fn to_slice_elems(region: &[AxisRange], shape: &[usize]) -> Result<Vec<SliceInfoElem>> {
    if region.len() > shape.len() {
        return Err(RelayError::InvalidRequest(format!(
            "Region has {} axes but image has {}",
            region.len(),
            shape.len()
        )));
    }

    let mut elems = Vec::with_capacity(shape.len());
    for (axis, &dim) in shape.iter().enumerate() {
        let range = region.get(axis).cloned().unwrap_or_default();
        let start = range.start.unwrap_or(0);
        let stop = range.stop.unwrap_or(dim);
        let step = range.step.unwrap_or(1);

        if step == 0 {
            return Err(RelayError::InvalidRequest(format!(
                "Step must be positive on axis {axis}"
            )));
        }
        if start > stop {
            return Err(RelayError::InvalidRequest(format!(
                "Range start {start} exceeds stop {stop} on axis {axis}"
            )));
        }
        if stop > dim {
            return Err(RelayError::InvalidRequest(format!(
                "Range stop {stop} exceeds axis {axis} length {dim}"
            )));
        }

        elems.push(SliceInfoElem::Slice {
            start: start as isize,
            end: Some(stop as isize),
            step: step as isize,
        });
    }
    Ok(elems)
}
