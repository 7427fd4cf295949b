//! Boolean selection masks derived from hand-annotated raster images
//!
//! Regions of interest are painted distinctly red on top of a map image. A pixel
//! counts as selected when red is high and both green and blue are low relative to
//! the raster's dynamic range. Single-channel rasters select every non-zero pixel.

use crate::io::configuration::MaskThresholds;
use crate::io::error::{AnalysisError, Result};
use crate::model::GridShape;
use crate::spatial::grid::GridCell;
use bitvec::prelude::*;
use ndarray::Array3;

/// Numeric depth of the raster samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleDepth {
    /// Integer samples; dynamic range is taken as 255
    Integer,
    /// Floating-point samples in [0, 1]
    Float,
}

impl SampleDepth {
    /// Full-scale value used for colour thresholds
    pub const fn dynamic_range(self) -> f64 {
        match self {
            Self::Integer => 255.0,
            Self::Float => 1.0,
        }
    }
}

/// Raster image as `(rows, cols, channels)` samples
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    data: Array3<f64>,
    depth: SampleDepth,
}

impl Raster {
    /// Wrap raw samples of a given depth
    pub const fn new(data: Array3<f64>, depth: SampleDepth) -> Self {
        Self { data, depth }
    }

    /// Sample array `(rows, cols, channels)`
    pub const fn data(&self) -> &Array3<f64> {
        &self.data
    }

    /// Sample depth
    pub const fn depth(&self) -> SampleDepth {
        self.depth
    }

    /// Shape `(rows, cols)`
    pub fn dim(&self) -> (usize, usize) {
        let (rows, cols, _) = self.data.dim();
        (rows, cols)
    }

    /// Number of channels per pixel
    pub fn channels(&self) -> usize {
        self.data.dim().2
    }
}

/// Boolean selection over a `(ny, nx)` grid, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    rows: usize,
    cols: usize,
    cells: BitVec,
}

impl Mask {
    /// Mask with nothing selected
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: bitvec![0; rows * cols],
        }
    }

    /// Build a mask by evaluating a predicate at every `(row, col)`
    pub fn from_fn(rows: usize, cols: usize, mut selected: impl FnMut(usize, usize) -> bool) -> Self {
        let mut mask = Self::empty(rows, cols);
        for row in 0..rows {
            for col in 0..cols {
                if selected(row, col) {
                    mask.set(row, col, true);
                }
            }
        }
        mask
    }

    /// Shape `(rows, cols)`
    pub const fn dim(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Selection state; out-of-range cells are unselected
    pub fn get(&self, row: usize, col: usize) -> bool {
        if row >= self.rows || col >= self.cols {
            return false;
        }
        self.cells.get(row * self.cols + col).as_deref() == Some(&true)
    }

    /// Whether a grid cell is selected
    pub fn contains(&self, cell: GridCell) -> bool {
        self.get(cell.y, cell.x)
    }

    /// Set the selection state of one cell; out-of-range writes are ignored
    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        if row < self.rows && col < self.cols {
            self.cells.set(row * self.cols + col, value);
        }
    }

    /// Number of selected cells
    pub fn count(&self) -> usize {
        self.cells.count_ones()
    }

    /// Whether nothing is selected
    pub fn is_empty(&self) -> bool {
        self.cells.not_any()
    }

    /// Require the mask to cover exactly the grid of a map
    ///
    /// # Errors
    ///
    /// Returns `MaskShapeMismatch` when the shapes differ
    pub fn validate_against(&self, shape: GridShape) -> Result<()> {
        if self.dim() == shape.dim() {
            Ok(())
        } else {
            Err(AnalysisError::MaskShapeMismatch {
                mask: self.dim(),
                grid: shape.dim(),
            })
        }
    }
}

/// Convert a raster to a selection mask of its 2-D shape
///
/// One channel selects values above zero; three or more channels select red
/// annotation; any other channel count selects nothing.
pub fn to_boolean_mask(raster: &Raster, thresholds: &MaskThresholds) -> Mask {
    let (rows, cols) = raster.dim();
    let data = raster.data();

    match raster.channels() {
        1 => Mask::from_fn(rows, cols, |row, col| {
            data.get((row, col, 0)).is_some_and(|&v| v > 0.0)
        }),
        channels if channels >= 3 => {
            let range = raster.depth().dynamic_range();
            let red_min = thresholds.red_min * range;
            let other_max = thresholds.green_blue_max * range;
            Mask::from_fn(rows, cols, |row, col| {
                let sample = |channel: usize| data.get((row, col, channel)).copied().unwrap_or(f64::NAN);
                sample(0) >= red_min && sample(1) <= other_max && sample(2) <= other_max
            })
        }
        _ => Mask::empty(rows, cols),
    }
}
