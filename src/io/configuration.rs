//! Default constants and the explicit configuration passed into every analysis component

use crate::io::error::{Result, invalid_parameter};
use crate::model::Phase;
use serde::Deserialize;
use std::path::Path;

// Index-normalized output lengths per acquisition phase
/// Samples on the normalized approach axis
pub const APPROACH_RESAMPLE_LENGTH: usize = 200;
/// Samples on the normalized hold axis
pub const HOLD_RESAMPLE_LENGTH: usize = 60;
/// Samples on the normalized retract axis
pub const RETRACT_RESAMPLE_LENGTH: usize = 200;

/// Points on the absolute-time axis shared by an ensemble
pub const TIME_AXIS_POINTS: usize = 200;

// Red annotation thresholds as fractions of the raster dynamic range
/// Minimum red level for a selected pixel
pub const MASK_RED_MIN: f64 = 0.7;
/// Maximum green and blue level for a selected pixel
pub const MASK_GREEN_BLUE_MAX: f64 = 0.2;

/// Minimum phase samples before a window can be resampled
pub const MIN_RESAMPLE_SAMPLES: usize = 2;
/// Minimum hold samples before a slope fit is attempted
pub const MIN_FIT_WINDOW_SAMPLES: usize = 4;
/// Minimum finite points remaining in the fitted half-window
pub const MIN_FIT_POINTS: usize = 3;

/// Conversion from metres to micrometres used for height outputs
pub const METRES_TO_MICROMETRES: f64 = 1e6;

// Output naming
/// Suffix for the colormapped setpoint image
pub const SETPOINT_COLORMAP_SUFFIX: &str = "_setpoint_height_afmhot.png";
/// Suffix for the grayscale setpoint image
pub const SETPOINT_GRAY_SUFFIX: &str = "_setpoint_height_gray.png";
/// Suffix for the setpoint value table
pub const SETPOINT_TABLE_SUFFIX: &str = "_setpoint_height.csv";
/// File extension of force-map files
pub const MAP_EXTENSION: &str = "json";
/// Raster extensions accepted when searching for masks, in lookup order
pub const MASK_EXTENSIONS: [&str; 5] = ["tif", "tiff", "png", "jpg", "jpeg"];

/// How a curve without explicit grid indices is placed on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GridFallback {
    /// Derive the cell from the curve index in row-major order
    #[default]
    RowMajor,
    /// Leave the curve unplaced
    Exclude,
}

/// Index-normalized axis length for each acquisition phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResampleLengths {
    /// Approach phase axis length
    pub approach: usize,
    /// Hold phase axis length
    pub hold: usize,
    /// Retract phase axis length
    pub retract: usize,
}

impl Default for ResampleLengths {
    fn default() -> Self {
        Self {
            approach: APPROACH_RESAMPLE_LENGTH,
            hold: HOLD_RESAMPLE_LENGTH,
            retract: RETRACT_RESAMPLE_LENGTH,
        }
    }
}

impl ResampleLengths {
    /// Axis length used for a phase
    pub const fn for_phase(&self, phase: Phase) -> usize {
        match phase {
            Phase::Approach => self.approach,
            Phase::Hold => self.hold,
            Phase::Retract => self.retract,
        }
    }
}

/// Colour thresholds used to decide whether a raster pixel is annotated
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MaskThresholds {
    /// Red must be at least this fraction of the dynamic range
    pub red_min: f64,
    /// Green and blue must be at most this fraction of the dynamic range
    pub green_blue_max: f64,
}

impl Default for MaskThresholds {
    fn default() -> Self {
        Self {
            red_min: MASK_RED_MIN,
            green_blue_max: MASK_GREEN_BLUE_MAX,
        }
    }
}

/// Sample-count policy below which a phase counts as absent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SampleMinimums {
    /// Required phase samples for resampling
    pub resample: usize,
    /// Required hold samples before fitting
    pub fit_window: usize,
    /// Required finite points inside the fitted half-window
    pub fit_points: usize,
}

impl Default for SampleMinimums {
    fn default() -> Self {
        Self {
            resample: MIN_RESAMPLE_SAMPLES,
            fit_window: MIN_FIT_WINDOW_SAMPLES,
            fit_points: MIN_FIT_POINTS,
        }
    }
}

/// Tokens searched in a map name to build its experimental group label
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GroupTokens {
    /// Experimental conditions, first match wins
    pub conditions: Vec<String>,
    /// Sample dishes, first match wins
    pub dishes: Vec<String>,
}

impl Default for GroupTokens {
    fn default() -> Self {
        Self {
            conditions: vec!["ctrl".to_string(), "bleb".to_string()],
            dishes: vec!["dish1".to_string(), "dish2".to_string()],
        }
    }
}

/// Complete analysis configuration shared by all components
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Placement of curves lacking explicit grid indices
    pub grid_fallback: GridFallback,
    /// Index-normalized axis lengths
    pub resample_lengths: ResampleLengths,
    /// Absolute-time axis length
    pub time_points: usize,
    /// Mask colour thresholds
    pub mask_thresholds: MaskThresholds,
    /// Minimum sample counts
    pub minimums: SampleMinimums,
    /// Group label tokens
    pub group_tokens: GroupTokens,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            grid_fallback: GridFallback::default(),
            resample_lengths: ResampleLengths::default(),
            time_points: TIME_AXIS_POINTS,
            mask_thresholds: MaskThresholds::default(),
            minimums: SampleMinimums::default(),
            group_tokens: GroupTokens::default(),
        }
    }
}

impl AnalysisConfig {
    /// Read a JSON configuration file; absent keys keep their defaults
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file cannot be read or parsed, or if the
    /// resulting values fail validation
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| invalid_parameter("config", &path.display(), &e))?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| invalid_parameter("config", &path.display(), &e))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable before processing starts
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid parameter
    pub fn validate(&self) -> Result<()> {
        let lengths = [
            ("resample_lengths.approach", self.resample_lengths.approach),
            ("resample_lengths.hold", self.resample_lengths.hold),
            ("resample_lengths.retract", self.resample_lengths.retract),
            ("time_points", self.time_points),
        ];
        for (name, value) in lengths {
            if value < 2 {
                return Err(invalid_parameter(name, &value, &"axis needs at least 2 samples"));
            }
        }

        let thresholds = [
            ("mask_thresholds.red_min", self.mask_thresholds.red_min),
            (
                "mask_thresholds.green_blue_max",
                self.mask_thresholds.green_blue_max,
            ),
        ];
        for (name, value) in thresholds {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid_parameter(name, &value, &"must lie within [0, 1]"));
            }
        }

        let minimums = [
            ("minimums.resample", self.minimums.resample),
            ("minimums.fit_window", self.minimums.fit_window),
            ("minimums.fit_points", self.minimums.fit_points),
        ];
        for (name, value) in minimums {
            if value < 2 {
                return Err(invalid_parameter(name, &value, &"must be at least 2"));
            }
        }

        Ok(())
    }
}
