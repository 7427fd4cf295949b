//! Placement of curves on the spatial grid of a force map
//!
//! Instruments usually store explicit grid indices per curve. When they are missing
//! the curve index is unfolded row-major (x varies fastest). Indices reported by the
//! instrument are not trusted: trailing curves occasionally carry coordinates outside
//! the declared grid, and such curves are left unplaced rather than rejected.

use crate::io::configuration::GridFallback;
use crate::model::{ForceMap, GridShape, Metadata};

/// Validated grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GridCell {
    /// Column, `0 <= x < nx`
    pub x: usize,
    /// Row, `0 <= y < ny`
    pub y: usize,
}

impl GridCell {
    /// Create a cell from column and row
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Row-major array index `[row, col]`
    pub const fn index(&self) -> [usize; 2] {
        [self.y, self.x]
    }
}

/// Raw coordinates for a curve: explicit metadata indices, or the row-major fallback
///
/// Returns `None` only when the metadata lacks indices and the fallback is disabled.
/// A zero-width grid has no row-major layout and also yields `None`.
pub fn resolve(
    index: usize,
    metadata: &Metadata,
    shape: GridShape,
    fallback: GridFallback,
) -> Option<(i64, i64)> {
    if let Some(explicit) = metadata.grid_index() {
        return Some(explicit);
    }

    match fallback {
        GridFallback::RowMajor if shape.nx > 0 => {
            let x = i64::try_from(index % shape.nx).ok()?;
            let y = i64::try_from(index / shape.nx).ok()?;
            Some((x, y))
        }
        GridFallback::RowMajor | GridFallback::Exclude => None,
    }
}

/// Bounds check of raw coordinates against the grid
pub fn validate(coordinates: (i64, i64), shape: GridShape) -> Option<GridCell> {
    let x = usize::try_from(coordinates.0).ok()?;
    let y = usize::try_from(coordinates.1).ok()?;
    (x < shape.nx && y < shape.ny).then_some(GridCell::new(x, y))
}

/// Cell of every curve in a map, `None` where the curve cannot be placed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridPlacement {
    shape: GridShape,
    cells: Vec<Option<GridCell>>,
}

impl GridPlacement {
    /// Resolve and validate every curve of a map
    pub fn resolve_map(map: &ForceMap, shape: GridShape, fallback: GridFallback) -> Self {
        let cells = map
            .curves()
            .iter()
            .enumerate()
            .map(|(index, curve)| {
                resolve(index, curve.metadata(), shape, fallback)
                    .and_then(|coordinates| validate(coordinates, shape))
            })
            .collect();

        Self { shape, cells }
    }

    /// Grid the placement refers to
    pub const fn shape(&self) -> GridShape {
        self.shape
    }

    /// Cell of a curve
    pub fn cell(&self, index: usize) -> Option<GridCell> {
        self.cells.get(index).copied().flatten()
    }

    /// Placed curves as `(index, cell)` in curve order
    pub fn placed(&self) -> impl Iterator<Item = (usize, GridCell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(index, cell)| cell.map(|c| (index, c)))
    }

    /// Number of curves that could not be placed
    pub fn unplaced_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }
}
