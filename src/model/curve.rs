//! Single force–distance curve with typed column access

use crate::io::error::{AnalysisError, Result};
use crate::model::metadata::Metadata;
use std::fmt;

/// Acquisition phase of one indentation cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    /// Tip moving towards the sample
    Approach,
    /// Tip held at the setpoint
    Hold,
    /// Tip moving away from the sample
    Retract,
}

impl Phase {
    /// All phases in acquisition order
    pub const ALL: [Self; 3] = [Self::Approach, Self::Hold, Self::Retract];

    /// Segment label used by the instrument for this phase
    pub const fn label(self) -> i64 {
        match self {
            Self::Approach => 0,
            Self::Hold => 1,
            Self::Retract => 2,
        }
    }

    /// Phase for a segment label, if it is one of the known phases
    pub const fn from_label(label: i64) -> Option<Self> {
        match label {
            0 => Some(Self::Approach),
            1 => Some(Self::Hold),
            2 => Some(Self::Retract),
            _ => None,
        }
    }

    /// Lowercase phase name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Approach => "approach",
            Self::Hold => "hold",
            Self::Retract => "retract",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Curve quantity that can be extracted as a value series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Channel {
    /// Measured height (m)
    #[default]
    HeightMeasured,
    /// Piezo-commanded height (m)
    HeightPiezo,
    /// Force (N)
    Force,
    /// Cantilever deflection (m), from force when a spring constant is known
    Deflection,
    /// Indentation, piezo height minus deflection (m)
    Indentation,
    /// Indentation relative to the first hold sample (m)
    ContactIndentation,
}

impl Channel {
    /// Column name used in output tables
    pub const fn column_name(self) -> &'static str {
        match self {
            Self::HeightMeasured => "height_measured",
            Self::HeightPiezo => "height_piezo",
            Self::Force => "force",
            Self::Deflection => "deflection",
            Self::Indentation => "indentation",
            Self::ContactIndentation => "contact_indentation",
        }
    }
}

/// Ordered samples of one curve
///
/// All columns have the same length; this is checked once at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    time: Vec<f64>,
    force: Vec<f64>,
    height_measured: Vec<f64>,
    height_piezo: Vec<f64>,
    segment: Vec<i64>,
    metadata: Metadata,
}

impl Curve {
    /// Build a curve from its columns
    ///
    /// # Errors
    ///
    /// Returns `InvalidSourceData` if the columns differ in length
    pub fn new(
        time: Vec<f64>,
        force: Vec<f64>,
        height_measured: Vec<f64>,
        height_piezo: Vec<f64>,
        segment: Vec<i64>,
        metadata: Metadata,
    ) -> Result<Self> {
        let n = time.len();
        let lengths = [
            ("force", force.len()),
            ("height (measured)", height_measured.len()),
            ("height (piezo)", height_piezo.len()),
            ("segment", segment.len()),
        ];
        if let Some((name, len)) = lengths.iter().find(|(_, len)| *len != n) {
            return Err(AnalysisError::InvalidSourceData {
                reason: format!("column '{name}' has {len} samples but 'time' has {n}"),
            });
        }

        Ok(Self {
            time,
            force,
            height_measured,
            height_piezo,
            segment,
            metadata,
        })
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Whether the curve has no samples
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Sample times in seconds
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// Force in newtons
    pub fn force(&self) -> &[f64] {
        &self.force
    }

    /// Measured height in metres
    pub fn height_measured(&self) -> &[f64] {
        &self.height_measured
    }

    /// Piezo height in metres
    pub fn height_piezo(&self) -> &[f64] {
        &self.height_piezo
    }

    /// Segment label per sample
    pub fn segment(&self) -> &[i64] {
        &self.segment
    }

    /// Per-curve metadata
    pub const fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Cantilever deflection per sample
    ///
    /// With a usable spring constant (N/m) this is `force / k`; otherwise the
    /// height difference `measured - piezo`.
    pub fn deflection(&self, spring_constant: Option<f64>) -> Vec<f64> {
        match spring_constant.filter(|k| k.is_finite() && *k != 0.0) {
            Some(k) => self.force.iter().map(|f| f / k).collect(),
            None => self
                .height_measured
                .iter()
                .zip(&self.height_piezo)
                .map(|(measured, piezo)| measured - piezo)
                .collect(),
        }
    }

    /// Indentation `piezo - deflection` with deflection taken from the heights
    pub fn indentation(&self) -> Vec<f64> {
        self.height_piezo
            .iter()
            .zip(self.deflection(None))
            .map(|(piezo, deflection)| piezo - deflection)
            .collect()
    }

    /// First sample of the hold phase, where the tip reaches the setpoint
    pub fn contact_index(&self) -> Option<usize> {
        let hold = Phase::Hold.label();
        self.segment.iter().position(|&label| label == hold)
    }

    /// Indentation relative to the contact point
    ///
    /// `(z - z_c) + (d - d_c)` with piezo height `z`, deflection `d` and both
    /// referenced to [`Curve::contact_index`]. Returns `None` without a hold phase.
    pub fn contact_indentation(&self, spring_constant: Option<f64>) -> Option<Vec<f64>> {
        let contact = self.contact_index()?;
        let deflection = self.deflection(spring_constant);
        let z_c = *self.height_piezo.get(contact)?;
        let d_c = *deflection.get(contact)?;
        Some(
            self.height_piezo
                .iter()
                .zip(&deflection)
                .map(|(z, d)| (z - z_c) + (d - d_c))
                .collect(),
        )
    }

    /// Values of the requested channel
    ///
    /// The spring constant only affects deflection-based channels. A curve without a
    /// hold phase yields an all-NaN contact indentation.
    pub fn channel(&self, channel: Channel, spring_constant: Option<f64>) -> Vec<f64> {
        match channel {
            Channel::HeightMeasured => self.height_measured.clone(),
            Channel::HeightPiezo => self.height_piezo.clone(),
            Channel::Force => self.force.clone(),
            Channel::Deflection => self.deflection(spring_constant),
            Channel::Indentation => self.indentation(),
            Channel::ContactIndentation => self
                .contact_indentation(spring_constant)
                .unwrap_or_else(|| vec![f64::NAN; self.len()]),
        }
    }
}
