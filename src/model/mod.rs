//! Curve, map and metadata types supplied by the curve-collection provider

/// Single force–distance curve and its acquisition phases
pub mod curve;
/// Ordered curve collection sharing one grid
pub mod map;
/// Typed metadata lookups
pub mod metadata;

pub use curve::{Channel, Curve, Phase};
pub use map::ForceMap;
pub use metadata::{GridShape, Metadata};
