//! Placement of a map's curves on its grid and their selection by an annotation mask

use crate::io::configuration::AnalysisConfig;
use crate::io::error::{AnalysisError, Result};
use crate::io::image::load_raster;
use crate::model::ForceMap;
use crate::pipeline::discovery::find_mask;
use crate::spatial::{
    ComponentLabels, GridPlacement, Mask, label_components, to_boolean_mask,
};
use std::path::Path;

/// Which curves of a map fall inside the annotated region, and in which component
#[derive(Debug, Clone)]
pub struct MapSelection {
    placement: GridPlacement,
    mask: Mask,
    components: ComponentLabels,
}

impl MapSelection {
    /// Combine a map with an already decoded mask
    ///
    /// # Errors
    ///
    /// Returns an error if the map has no grid shape, the mask shape differs from
    /// the grid, or the mask selects no cell
    pub fn new(map: &ForceMap, mask: Mask, config: &AnalysisConfig) -> Result<Self> {
        let shape = map.grid_shape()?;
        mask.validate_against(shape)?;

        let components = label_components(&mask);
        if components.count() == 0 {
            return Err(AnalysisError::InvalidSourceData {
                reason: "mask selects no grid cells".to_string(),
            });
        }

        log::debug!(
            "{}: {} mask components with cell counts {:?}",
            map.name(),
            components.count(),
            components.sizes()
        );

        let placement = GridPlacement::resolve_map(map, shape, config.grid_fallback);
        let unplaced = placement.unplaced_count();
        if unplaced > 0 {
            log::debug!("{}: {unplaced} curves have no valid grid cell", map.name());
        }

        Ok(Self {
            placement,
            mask,
            components,
        })
    }

    /// Find, decode and apply the mask stored for a map in `mask_dir`
    ///
    /// # Errors
    ///
    /// Returns an error if no mask is found, it cannot be decoded, or it does not
    /// fit the map (see [`MapSelection::new`])
    pub fn load(map: &ForceMap, mask_dir: &Path, config: &AnalysisConfig) -> Result<Self> {
        let mask_path = find_mask(mask_dir, map.name())?;
        log::debug!("{}: using mask {}", map.name(), mask_path.display());
        let raster = load_raster(&mask_path)?;
        let mask = to_boolean_mask(&raster, &config.mask_thresholds);
        Self::new(map, mask, config)
    }

    /// Grid cell of every curve
    pub const fn placement(&self) -> &GridPlacement {
        &self.placement
    }

    /// Boolean selection mask
    pub const fn mask(&self) -> &Mask {
        &self.mask
    }

    /// Connected components of the mask
    pub const fn components(&self) -> &ComponentLabels {
        &self.components
    }

    /// Whether a curve lies on a selected cell
    pub fn is_selected(&self, index: usize) -> bool {
        self.placement
            .cell(index)
            .is_some_and(|cell| self.mask.contains(cell))
    }

    /// Indices of every selected curve in curve order
    pub fn selected(&self) -> Vec<usize> {
        self.placement
            .placed()
            .filter(|&(_, cell)| self.mask.contains(cell))
            .map(|(index, _)| index)
            .collect()
    }

    /// Component id of a curve, `None` when it is not selected
    pub fn component_of(&self, index: usize) -> Option<u32> {
        self.placement
            .cell(index)
            .and_then(|cell| self.components.component_of(cell))
    }

    /// Indices of the curves inside one component, in curve order
    pub fn component_members(&self, id: u32) -> Vec<usize> {
        self.placement
            .placed()
            .filter(|&(_, cell)| self.components.component_of(cell) == Some(id))
            .map(|(index, _)| index)
            .collect()
    }
}
