//! Raster window resolution
//!
//! Converts a geographic region of interest into a pixel window on a raster.
//! Clipping never fails: any window that cannot be resolved (degenerate
//! transform, no intersection, all cells masked) degrades to the raster's
//! full extent, with the reason carried in the outcome so callers and logs
//! can tell the two apart.

use crate::config::Roi;
use terraflow_core::Raster;
use tracing::{debug, warn};

/// Why clipping fell back to the full raster extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The raster transform could not be inverted (zero-sized pixels)
    DegenerateTransform,
    /// The ROI window does not intersect the raster, or has zero size
    EmptyWindow,
    /// The window intersects the raster but contains no valid data
    AllMasked,
}

/// How the clipped grid was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipOutcome {
    /// The grid is the sub-window intersecting the ROI
    Window,
    /// The grid is the full raster extent
    FullExtent(FallbackReason),
}

/// Result of clipping: a grid (carrying its own shifted transform) plus the
/// outcome that produced it.
#[derive(Debug, Clone)]
pub struct ClippedRaster {
    pub grid: Raster<f64>,
    pub outcome: ClipOutcome,
}

/// Clip a raster to the region of interest.
///
/// Computes the pixel window spanned by the ROI bounds, intersects it with
/// the raster extent, and extracts it. Every failure path returns the full
/// raster instead of an error; this leniency favors availability over
/// precision when the ROI is malformed or lies outside the raster.
pub fn clip_raster_to_roi(raster: &Raster<f64>, roi: &Roi) -> ClippedRaster {
    match resolve_window(raster, roi) {
        Ok(grid) => {
            debug!(
                rows = grid.rows(),
                cols = grid.cols(),
                "clipped raster to ROI window"
            );
            ClippedRaster {
                grid,
                outcome: ClipOutcome::Window,
            }
        }
        Err(reason) => {
            warn!(?reason, "ROI clipping fell back to full raster extent");
            ClippedRaster {
                grid: raster.clone(),
                outcome: ClipOutcome::FullExtent(reason),
            }
        }
    }
}

/// Resolve the ROI to a sub-raster, or report why it cannot be done.
fn resolve_window(raster: &Raster<f64>, roi: &Roi) -> Result<Raster<f64>, FallbackReason> {
    // Upper-left and lower-right corners of the ROI in fractional pixels.
    // With a north-up transform, ymax maps to the smaller row index.
    let (col_start, row_start) = raster.geo_to_pixel(roi.xmin, roi.ymax);
    let (col_stop, row_stop) = raster.geo_to_pixel(roi.xmax, roi.ymin);

    if col_start.is_nan() || row_start.is_nan() || col_stop.is_nan() || row_stop.is_nan() {
        return Err(FallbackReason::DegenerateTransform);
    }

    let (rows, cols) = raster.shape();

    // Snap outward to whole pixels, then intersect with the raster extent.
    let row0 = row_start.floor().max(0.0) as usize;
    let col0 = col_start.floor().max(0.0) as usize;
    let row1 = (row_stop.ceil().min(rows as f64)).max(0.0) as usize;
    let col1 = (col_stop.ceil().min(cols as f64)).max(0.0) as usize;

    if row1 <= row0 || col1 <= col0 || row0 >= rows || col0 >= cols {
        return Err(FallbackReason::EmptyWindow);
    }

    let grid = raster
        .window(row0, col0, row1 - row0, col1 - col0)
        .map_err(|_| FallbackReason::EmptyWindow)?;

    if grid.valid_count() == 0 {
        return Err(FallbackReason::AllMasked);
    }

    Ok(grid)
}
