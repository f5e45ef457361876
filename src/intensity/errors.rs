//! Errors for spatial intensity estimation (input validation, parameter
//! transforms, likelihood invariants, and optimizer failures).
//!
//! This module defines [`IntensityError`], the unified error type for the
//! intensity stack. It implements `Display`/`Error` and is convertible to
//! and from the optimizer-layer [`OptError`](crate::optimization::errors::OptError).
//!
//! ## Conventions
//! - **Indices are 0-based**.
//! - Coordinates must be **finite**; a pattern needs **at least two points**
//!   (the leave-one-out sum over a single point is empty, and `log(0)` would
//!   poison the optimizer).
//! - Optimizer/backend errors are normalized to
//!   [`IntensityError::OptimizationFailed`] with a human-readable status.
use crate::optimization::errors::OptError;

/// Crate-wide result alias for intensity operations that may produce
/// [`IntensityError`].
pub type IntensityResult<T> = Result<T, IntensityError>;

/// Unified error type for intensity modeling.
///
/// Covers input/data validation, kernel argument checks, the log-scale
/// parameter transform, estimation failures, and optimizer pass-through.
#[derive(Debug, Clone, PartialEq)]
pub enum IntensityError {
    // ---- Input/data validation ----
    /// Pattern has fewer than two points; the leave-one-out likelihood is
    /// undefined for N < 2.
    TooFewPoints { found: usize },

    /// Coordinate vectors must all have the same length.
    CoordinateLengthMismatch { axis: &'static str, expected: usize, actual: usize },

    /// A coordinate is NaN/±inf.
    NonFiniteCoordinate { axis: &'static str, index: usize, value: f64 },

    /// The observation window bound must have exactly three entries.
    WindowLengthMismatch { expected: usize, actual: usize },

    /// A window bound entry is NaN/±inf.
    NonFiniteWindow { index: usize, value: f64 },

    // ---- Kernel arguments ----
    /// Elementwise kernel inputs must have equal lengths.
    KernelLengthMismatch { axis: &'static str, expected: usize, actual: usize },

    // ---- Parameter transform ----
    /// Theta must have exactly four entries (log a, log bx, log by, log bz).
    ThetaLengthMismatch { expected: usize, actual: usize },

    /// Theta entries must be finite.
    NonFiniteTheta { index: usize, value: f64 },

    /// Exponentiating a log-scale parameter over/underflowed out of (0, inf).
    NonFiniteParam { name: &'static str, value: f64, reason: &'static str },

    // ---- Likelihood invariants ----
    /// A conditional intensity term collapsed to zero or a non-finite value.
    NonPositiveIntensity { index: usize, value: f64 },

    // ---- Estimation / optimizer ----
    /// Optimizer failed; includes a human-readable status/reason.
    OptimizationFailed { status: String },
}

impl std::error::Error for IntensityError {}

impl std::fmt::Display for IntensityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input/data validation ----
            IntensityError::TooFewPoints { found } => {
                write!(f, "Point pattern needs at least 2 points; got {found}.")
            }
            IntensityError::CoordinateLengthMismatch { axis, expected, actual } => {
                write!(
                    f,
                    "Coordinate vector {axis} has length {actual}, expected {expected} to match x."
                )
            }
            IntensityError::NonFiniteCoordinate { axis, index, value } => {
                write!(f, "Coordinate {axis}[{index}] is non-finite: {value}")
            }
            IntensityError::WindowLengthMismatch { expected, actual } => {
                write!(f, "Window bound must have {expected} entries; got {actual}.")
            }
            IntensityError::NonFiniteWindow { index, value } => {
                write!(f, "Window bound entry at index {index} is non-finite: {value}")
            }
            // ---- Kernel arguments ----
            IntensityError::KernelLengthMismatch { axis, expected, actual } => {
                write!(
                    f,
                    "Kernel input {axis} has length {actual}, expected {expected} to match x."
                )
            }
            // ---- Parameter transform ----
            IntensityError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Parameter vector must have length {expected}; got {actual}.")
            }
            IntensityError::NonFiniteTheta { index, value } => {
                write!(f, "Parameter entry at index {index} is non-finite: {value}")
            }
            IntensityError::NonFiniteParam { name, value, reason } => {
                write!(f, "Model parameter {name} must be finite and > 0; got {value}. {reason}")
            }
            // ---- Likelihood invariants ----
            IntensityError::NonPositiveIntensity { index, value } => {
                write!(
                    f,
                    "Conditional intensity at point {index} is not strictly positive: {value}"
                )
            }
            // ---- Estimation / optimizer ----
            IntensityError::OptimizationFailed { status } => {
                write!(f, "Optimizer failed with status: {status}")
            }
        }
    }
}

/// Fold optimizer-layer failures back into the intensity error surface.
///
/// Domain errors that originated here and round-tripped through the
/// optimizer are recovered as themselves; everything else becomes
/// [`IntensityError::OptimizationFailed`] with the optimizer's message.
impl From<OptError> for IntensityError {
    fn from(err: OptError) -> Self {
        match err {
            OptError::ThetaLengthMismatch { expected, actual } => {
                IntensityError::ThetaLengthMismatch { expected, actual }
            }
            OptError::NonFiniteTheta { index, value } => {
                IntensityError::NonFiniteTheta { index, value }
            }
            OptError::NonPositiveIntensity { index, value } => {
                IntensityError::NonPositiveIntensity { index, value }
            }
            OptError::NonFiniteParam { name, value } => IntensityError::NonFiniteParam {
                name,
                value,
                reason: "exp(theta) left (0, inf).",
            },
            other => IntensityError::OptimizationFailed { status: other.to_string() },
        }
    }
}
