//! Curve analysis: phase extraction, alignment, ensemble statistics and scalar features

/// Ensemble mean/std/count per group
pub mod ensemble;
/// Scalar per-curve features
pub mod features;
/// Alignment of phase windows onto shared axes
pub mod resampling;
/// Phase extraction from segment labels
pub mod segments;

pub use ensemble::{EnsembleAggregator, EnsembleStatistic, aggregate};
pub use resampling::{AlignedEnsemble, Alignment, AxisKind, SharedAxis, WindowSamples};
pub use segments::PhaseWindow;
