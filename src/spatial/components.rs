//! Connected-component labeling of selection masks

use crate::spatial::grid::GridCell;
use crate::spatial::mask::Mask;
use ndarray::Array2;
use std::collections::VecDeque;

const NEIGHBORS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Partition of selected cells into 4-connected regions
///
/// Labels start at 1 and are assigned in raster-scan order of each region's first
/// cell. Unselected cells carry label 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentLabels {
    labels: Array2<u32>,
    count: u32,
}

impl ComponentLabels {
    /// Label array `(rows, cols)`
    pub const fn labels(&self) -> &Array2<u32> {
        &self.labels
    }

    /// Number of components
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Component ids in ascending order
    pub const fn ids(&self) -> std::ops::RangeInclusive<u32> {
        1..=self.count
    }

    /// Component of a grid cell, `None` for unselected or out-of-range cells
    pub fn component_of(&self, cell: GridCell) -> Option<u32> {
        self.labels
            .get(cell.index())
            .copied()
            .filter(|&label| label > 0)
    }

    /// Number of cells in each component, indexed by `id - 1`
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.count as usize];
        for &label in &self.labels {
            if let Some(size) = (label as usize)
                .checked_sub(1)
                .and_then(|slot| sizes.get_mut(slot))
            {
                *size += 1;
            }
        }
        sizes
    }
}

/// Label the 4-connected regions of a mask
///
/// Isolated selected cells each form their own component.
pub fn label_components(mask: &Mask) -> ComponentLabels {
    let (rows, cols) = mask.dim();
    let mut labels = Array2::<u32>::zeros((rows, cols));
    let mut count = 0;
    let mut queue = VecDeque::new();

    for row in 0..rows {
        for col in 0..cols {
            let unlabeled = labels.get([row, col]).is_some_and(|&label| label == 0);
            if !mask.get(row, col) || !unlabeled {
                continue;
            }

            count += 1;
            if let Some(label) = labels.get_mut([row, col]) {
                *label = count;
            }
            queue.push_back((row, col));

            while let Some((r, c)) = queue.pop_front() {
                for (dr, dc) in NEIGHBORS {
                    let (Some(nr), Some(nc)) = (r.checked_add_signed(dr), c.checked_add_signed(dc))
                    else {
                        continue;
                    };
                    if !mask.get(nr, nc) {
                        continue;
                    }
                    if let Some(label) = labels.get_mut([nr, nc]) {
                        if *label == 0 {
                            *label = count;
                            queue.push_back((nr, nc));
                        }
                    }
                }
            }
        }
    }

    ComponentLabels { labels, count }
}
