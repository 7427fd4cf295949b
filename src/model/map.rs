//! Force map: an ordered collection of curves sharing one spatial grid

use crate::io::configuration::GroupTokens;
use crate::io::error::{Result, invalid_parameter};
use crate::model::curve::{Channel, Curve};
use crate::model::metadata::{GridShape, Metadata};

/// Curves acquired on one grid, in acquisition order
#[derive(Debug, Clone, PartialEq)]
pub struct ForceMap {
    name: String,
    metadata: Metadata,
    curves: Vec<Curve>,
}

impl ForceMap {
    /// Create a map from its name, map-level metadata and curves
    pub const fn new(name: String, metadata: Metadata, curves: Vec<Curve>) -> Self {
        Self {
            name,
            metadata,
            curves,
        }
    }

    /// Map name, usually the file stem
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Map-level metadata
    pub const fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// All curves in acquisition order
    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    /// Curve by sequential index
    pub fn curve(&self, index: usize) -> Option<&Curve> {
        self.curves.get(index)
    }

    /// Number of curves
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// Whether the map holds no curves
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Metadata that describes the whole acquisition
    ///
    /// Instruments often attach experiment-level keys to every curve rather than
    /// to the map, so the first curve stands in when the map carries none.
    pub fn experiment_metadata(&self) -> &Metadata {
        if self.metadata.is_empty() {
            self.curves
                .first()
                .map_or(&self.metadata, Curve::metadata)
        } else {
            &self.metadata
        }
    }

    /// Spring constant (N/m) for a curve: its own metadata first, then the acquisition's
    pub fn spring_constant(&self, curve: &Curve) -> Option<f64> {
        curve
            .metadata()
            .spring_constant()
            .or_else(|| self.experiment_metadata().spring_constant())
    }

    /// One channel of the curve at `index`, with the map's spring constant applied
    pub fn channel(&self, index: usize, channel: Channel) -> Option<Vec<f64>> {
        let curve = self.curve(index)?;
        Some(curve.channel(channel, self.spring_constant(curve)))
    }

    /// Declared grid shape
    ///
    /// # Errors
    ///
    /// Returns `MissingMetadata` if neither the map nor its first curve declares it
    pub fn grid_shape(&self) -> Result<GridShape> {
        self.metadata.grid_shape().or_else(|err| {
            self.curves
                .first()
                .map_or(Err(err), |curve| curve.metadata().grid_shape())
        })
    }

    /// Sequential curve index of a row-major grid cell
    ///
    /// # Errors
    ///
    /// Returns an error if the grid shape is unknown or the cell lies outside it
    pub fn index_of_cell(&self, row: usize, col: usize) -> Result<usize> {
        let shape = self.grid_shape()?;
        if col >= shape.nx || row >= shape.ny {
            return Err(invalid_parameter(
                "row/col",
                &format!("{row}/{col}"),
                &format!("grid is {} rows x {} cols", shape.ny, shape.nx),
            ));
        }
        Ok(row * shape.nx + col)
    }

    /// Experimental group label derived from the map name
    pub fn group_label(&self, tokens: &GroupTokens) -> String {
        group_from_name(&self.name, tokens)
    }
}

/// Build `condition-dish` from the first matching tokens in a name
///
/// Matching is case-insensitive; a missing token becomes `unknown`.
pub fn group_from_name(name: &str, tokens: &GroupTokens) -> String {
    let lower = name.to_lowercase();
    let find = |candidates: &[String]| {
        candidates
            .iter()
            .find(|token| lower.contains(&token.to_lowercase()))
            .map_or_else(|| "unknown".to_string(), |token| token.to_lowercase())
    };
    format!("{}-{}", find(&tokens.conditions), find(&tokens.dishes))
}
