//! Numerical helpers shared by the analysis components

/// Linear interpolation, evenly spaced axes and NaN filling
pub mod interpolation;
/// Least-squares line fitting
pub mod regression;
/// NaN-aware mean, deviation and quantiles
pub mod statistics;
