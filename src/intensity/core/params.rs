//! Log-scale parameter transform for the logistic intensity model.
//!
//! The optimizer works in an unconstrained space
//! `theta = (log a, log bx, log by, log bz)`; exponentiation maps it into
//! the strictly positive model space `(a, bx, by, bz)`. That transform is
//! the model's only reparameterization and lives here together with the
//! theta validation used by the optimizer's `check` hook.
//!
//! Overflow in the exp transform (|log param| beyond roughly 709 in `f64`)
//! is reported as an error rather than clamped; see the error docs.
use crate::intensity::errors::{IntensityError, IntensityResult};
use ndarray::ArrayView1;

/// Number of free parameters: log-amplitude plus three log-bandwidths.
pub const THETA_DIM: usize = 4;

/// Model-space parameters of the separable logistic intensity kernel.
///
/// All four values are finite and strictly positive by construction; the
/// log-scale optimizer parametrization guarantees positivity and
/// [`InteractionParams::from_theta`] rejects the over/underflow edge cases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionParams {
    /// Interaction amplitude `a = exp(theta[0])`.
    pub a: f64,
    /// X-axis kernel rate `bx = exp(theta[1])`.
    pub bx: f64,
    /// Y-axis kernel rate `by = exp(theta[2])`.
    pub by: f64,
    /// Z-axis kernel rate `bz = exp(theta[3])`.
    pub bz: f64,
}

impl InteractionParams {
    /// Map a validated log-scale `theta` into model space.
    ///
    /// Parameters
    /// ----------
    /// - `theta`: unconstrained vector `(log a, log bx, log by, log bz)`;
    ///   must have length [`THETA_DIM`] with finite entries.
    ///
    /// Errors
    /// ------
    /// - [`IntensityError::ThetaLengthMismatch`] / `NonFiniteTheta` from
    ///   [`validate_theta`].
    /// - [`IntensityError::NonFiniteParam`] when `exp` overflows to `inf`
    ///   or underflows to `0.0`. No clamping is applied: silently capping
    ///   a bandwidth would change the model being estimated.
    pub fn from_theta(theta: ArrayView1<f64>) -> IntensityResult<InteractionParams> {
        validate_theta(theta)?;
        let names: [&'static str; THETA_DIM] = ["a", "bx", "by", "bz"];
        let mut out = [0.0; THETA_DIM];
        for (slot, (&log_value, name)) in out.iter_mut().zip(theta.iter().zip(names)) {
            let value = log_value.exp();
            if !value.is_finite() {
                return Err(IntensityError::NonFiniteParam {
                    name,
                    value,
                    reason: "exp(theta) overflowed; rescale the problem instead of clamping.",
                });
            }
            if value <= 0.0 {
                return Err(IntensityError::NonFiniteParam {
                    name,
                    value,
                    reason: "exp(theta) underflowed to zero.",
                });
            }
            *slot = value;
        }
        Ok(InteractionParams { a: out[0], bx: out[1], by: out[2], bz: out[3] })
    }
}

/// Validate an unconstrained parameter vector before any transform.
///
/// Checks the length is [`THETA_DIM`] and every entry is finite. Called by
/// [`InteractionParams::from_theta`] and by the optimizer's pre-flight
/// `check` hook.
pub fn validate_theta(theta: ArrayView1<f64>) -> IntensityResult<()> {
    if theta.len() != THETA_DIM {
        return Err(IntensityError::ThetaLengthMismatch {
            expected: THETA_DIM,
            actual: theta.len(),
        });
    }
    for (index, &value) in theta.iter().enumerate() {
        if !value.is_finite() {
            return Err(IntensityError::NonFiniteTheta { index, value });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // The exp transform recovers the intended model-space values and all
    // four components are strictly positive.
    fn from_theta_exponentiates_each_component() {
        let theta = array![1.6094379124341003, 0.0, -0.693147180559945, 2.0];
        let params = InteractionParams::from_theta(theta.view()).expect("finite theta");
        assert_relative_eq!(params.a, 5.0, max_relative = 1e-12);
        assert_relative_eq!(params.bx, 1.0, max_relative = 1e-12);
        assert_relative_eq!(params.by, 0.5, max_relative = 1e-12);
        assert_relative_eq!(params.bz, 2.0f64.exp(), max_relative = 1e-12);
    }

    #[test]
    fn from_theta_rejects_wrong_length_and_non_finite() {
        assert_eq!(
            InteractionParams::from_theta(array![0.0, 0.0, 0.0].view()),
            Err(IntensityError::ThetaLengthMismatch { expected: 4, actual: 3 })
        );
        assert!(matches!(
            InteractionParams::from_theta(array![0.0, f64::NAN, 0.0, 0.0].view()),
            Err(IntensityError::NonFiniteTheta { index: 1, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Overflow/underflow of the exp transform is an error, not a clamp:
    // theta = 710 overflows to inf, theta = -800 underflows to zero.
    fn from_theta_rejects_exp_overflow_and_underflow() {
        assert!(matches!(
            InteractionParams::from_theta(array![710.0, 0.0, 0.0, 0.0].view()),
            Err(IntensityError::NonFiniteParam { name: "a", .. })
        ));
        assert!(matches!(
            InteractionParams::from_theta(array![0.0, 0.0, -800.0, 0.0].view()),
            Err(IntensityError::NonFiniteParam { name: "by", .. })
        ));
    }
}
