//! Point-pattern containers for spatial intensity models.
//!
//! Purpose
//! -------
//! Provide small, validated containers for a 3D point pattern and its
//! observation-window bound. This module centralizes input validation so the
//! likelihood and gradient code can assume clean, index-aligned coordinates.
//!
//! Key behaviors
//! -------------
//! - [`PointPattern`] enforces equal-length, finite coordinate vectors with
//!   at least two points (the leave-one-out likelihood is undefined below
//!   that).
//! - [`ObservationWindow`] enforces a finite, length-3 boundary point.
//! - [`IntensityData`] bundles both into the payload threaded through the
//!   optimizer's `LogLikelihood::Data`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `x`, `y`, `z` are index-aligned: point `i` is `(x[i], y[i], z[i])`.
//! - All coordinates and window entries are finite.
//! - `len() >= 2` always holds after construction.
//! - Data is immutable for the duration of one estimation call; nothing in
//!   this crate mutates a constructed pattern.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based.
//! - The window bound is a per-axis *upper* bound `(tau_x, tau_y, tau_z)`
//!   entering only the normalization term of the likelihood.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the happy path plus each rejection: too few points,
//!   length mismatches, non-finite coordinates, and bad window bounds.
use crate::intensity::errors::{IntensityError, IntensityResult};
use ndarray::Array1;

/// `PointPattern` — validated, index-aligned 3D coordinates.
///
/// Stores one coordinate vector per axis; point `i` is
/// `(x[i], y[i], z[i])`. Construction via [`PointPattern::new`] rejects
/// mismatched lengths, non-finite entries, and patterns with fewer than two
/// points, so downstream code never has to re-check.
#[derive(Debug, Clone, PartialEq)]
pub struct PointPattern {
    /// X coordinates (finite).
    pub x: Array1<f64>,
    /// Y coordinates (finite, same length as `x`).
    pub y: Array1<f64>,
    /// Z coordinates (finite, same length as `x`).
    pub z: Array1<f64>,
}

impl PointPattern {
    /// Construct a validated [`PointPattern`] from raw coordinate vectors.
    ///
    /// Parameters
    /// ----------
    /// - `x`, `y`, `z`: per-axis coordinates; must be index-aligned, all the
    ///   same length `N >= 2`, and finite.
    ///
    /// Errors
    /// ------
    /// - [`IntensityError::CoordinateLengthMismatch`] when `y` or `z` does
    ///   not match `x` in length.
    /// - [`IntensityError::TooFewPoints`] when `N < 2`; with a single point
    ///   the leave-one-out sum is empty and the log-likelihood is `-inf`, so
    ///   this is rejected before any computation.
    /// - [`IntensityError::NonFiniteCoordinate`] for the first NaN/±inf
    ///   entry, scanning axis by axis.
    pub fn new(x: Array1<f64>, y: Array1<f64>, z: Array1<f64>) -> IntensityResult<PointPattern> {
        let n = x.len();
        if y.len() != n {
            return Err(IntensityError::CoordinateLengthMismatch {
                axis: "y",
                expected: n,
                actual: y.len(),
            });
        }
        if z.len() != n {
            return Err(IntensityError::CoordinateLengthMismatch {
                axis: "z",
                expected: n,
                actual: z.len(),
            });
        }
        if n < 2 {
            return Err(IntensityError::TooFewPoints { found: n });
        }
        for (axis, coords) in [("x", &x), ("y", &y), ("z", &z)] {
            if let Some((index, &value)) =
                coords.iter().enumerate().find(|(_, v)| !v.is_finite())
            {
                return Err(IntensityError::NonFiniteCoordinate { axis, index, value });
            }
        }
        Ok(PointPattern { x, y, z })
    }

    /// Number of points in the pattern.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Always `false` for a constructed pattern (`len() >= 2`), provided for
    /// API completeness.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// `ObservationWindow` — per-axis upper bound of the observation domain.
///
/// A single boundary point `(tau_x, tau_y, tau_z)` used in the
/// normalization term, which approximates the integral of the intensity
/// over the domain by evaluating the separable kernel CDF at this bound.
/// How well that approximation holds depends on the window geometry; this
/// type records the bound, it does not validate the geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationWindow {
    /// Boundary point, length 3, finite.
    pub tau: Array1<f64>,
}

impl ObservationWindow {
    /// Construct a validated [`ObservationWindow`].
    ///
    /// Errors
    /// ------
    /// - [`IntensityError::WindowLengthMismatch`] when `tau.len() != 3`.
    /// - [`IntensityError::NonFiniteWindow`] for the first NaN/±inf entry.
    pub fn new(tau: Array1<f64>) -> IntensityResult<ObservationWindow> {
        if tau.len() != 3 {
            return Err(IntensityError::WindowLengthMismatch { expected: 3, actual: tau.len() });
        }
        if let Some((index, &value)) = tau.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(IntensityError::NonFiniteWindow { index, value });
        }
        Ok(ObservationWindow { tau })
    }

    /// Upper bound on the x axis.
    pub fn tx(&self) -> f64 {
        self.tau[0]
    }

    /// Upper bound on the y axis.
    pub fn ty(&self) -> f64 {
        self.tau[1]
    }

    /// Upper bound on the z axis.
    pub fn tz(&self) -> f64 {
        self.tau[2]
    }
}

/// `IntensityData` — the estimation payload: a pattern plus its window.
///
/// Both components are validated at construction, so this is a plain
/// bundle with no further checks of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityData {
    /// Observed point pattern.
    pub pattern: PointPattern,
    /// Observation-window bound entering the normalization term.
    pub window: ObservationWindow,
}

impl IntensityData {
    /// Bundle a validated pattern and window.
    pub fn new(pattern: PointPattern, window: ObservationWindow) -> IntensityData {
        IntensityData { pattern, window }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover construction-time validation of `PointPattern` and
    // `ObservationWindow`: the happy path and each documented rejection.
    // Likelihood behavior on valid data is tested in the model layer.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // A well-formed three-point pattern constructs and reports its length.
    fn point_pattern_accepts_aligned_finite_coordinates() {
        let pattern = PointPattern::new(
            array![0.1, 0.4, 0.9],
            array![0.2, 0.5, 0.8],
            array![0.3, 0.6, 0.7],
        )
        .expect("aligned finite coordinates should be accepted");
        assert_eq!(pattern.len(), 3);
        assert!(!pattern.is_empty());
    }

    #[test]
    // Purpose
    // -------
    // A single point must be rejected: the leave-one-out sum over the
    // remaining points would be empty and log(0) would reach the optimizer.
    fn point_pattern_rejects_single_point() {
        let result = PointPattern::new(array![0.5], array![0.5], array![0.5]);
        assert_eq!(result, Err(IntensityError::TooFewPoints { found: 1 }));
    }

    #[test]
    fn point_pattern_rejects_empty_input() {
        let result = PointPattern::new(array![], array![], array![]);
        assert_eq!(result, Err(IntensityError::TooFewPoints { found: 0 }));
    }

    #[test]
    // Purpose
    // -------
    // Length mismatches are reported with the offending axis before any
    // finiteness scan happens.
    fn point_pattern_rejects_mismatched_lengths() {
        let result = PointPattern::new(array![0.0, 1.0], array![0.0, 1.0, 2.0], array![0.0, 1.0]);
        assert_eq!(
            result,
            Err(IntensityError::CoordinateLengthMismatch { axis: "y", expected: 2, actual: 3 })
        );
        let result = PointPattern::new(array![0.0, 1.0], array![0.0, 1.0], array![0.0]);
        assert_eq!(
            result,
            Err(IntensityError::CoordinateLengthMismatch { axis: "z", expected: 2, actual: 1 })
        );
    }

    #[test]
    fn point_pattern_rejects_non_finite_coordinates() {
        let result =
            PointPattern::new(array![0.0, 1.0], array![0.0, f64::NAN], array![0.0, 1.0]);
        assert!(matches!(
            result,
            Err(IntensityError::NonFiniteCoordinate { axis: "y", index: 1, .. })
        ));
    }

    #[test]
    fn observation_window_accepts_three_finite_bounds() {
        let window = ObservationWindow::new(array![1.0, 2.0, 3.0])
            .expect("a finite length-3 bound should be accepted");
        assert_eq!((window.tx(), window.ty(), window.tz()), (1.0, 2.0, 3.0));
    }

    #[test]
    fn observation_window_rejects_wrong_length_and_non_finite() {
        assert_eq!(
            ObservationWindow::new(array![1.0, 2.0]),
            Err(IntensityError::WindowLengthMismatch { expected: 3, actual: 2 })
        );
        assert!(matches!(
            ObservationWindow::new(array![1.0, f64::INFINITY, 3.0]),
            Err(IntensityError::NonFiniteWindow { index: 1, .. })
        ));
    }
}
