//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from upstream/API errors.

/// A latitude/longitude pair that failed plausibility checks.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("invalid coordinate: latitude {latitude}, longitude {longitude}")]
pub struct InvalidCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}
