//! Logistic kernel primitives for separable 3D intensity models.
//!
//! Purpose
//! -------
//! Provide the scalar logistic CDF/density/density-derivative primitives and
//! the separable three-dimensional kernels (`d3logis`, `p3logis`) built from
//! them. The scalar functions are the building blocks of the pairwise
//! likelihood; the 3D kernels are also exposed standalone for diagnostics.
//!
//! Conventions
//! -----------
//! - `dlogistic(x, b)` omits the rate Jacobian: the true density of the
//!   logistic kernel with rate `b` is `b * dlogistic(x, b)`, and likewise
//!   `d/dx logistic(x, b) = b * dlogistic(x, b)`. The likelihood carries the
//!   `a * bx * by * bz` prefactor explicitly, so the product normalizes.
//! - `ddlogis` is the derivative of the *unscaled* density `dlogistic(., 1)`
//!   and is applied to pre-scaled arguments `b * x` in chain-rule terms.
//!
//! Known limitation
//! ----------------
//! `exp(-b * x)` overflows to `inf` for strongly negative `b * x` (around
//! `b * x < -709` in `f64`), after which the quotients degrade to 0/NaN. No
//! clamping is applied here; callers working at extreme bandwidth/coordinate
//! scales should rescale their inputs.
//!
//! Suspect formula, kept deliberately
//! ----------------------------------
//! Both [`d3logis`] and [`p3logis`] apply their third factor to the *y*
//! input, not `z` — see the function docs. This looks like a transcription
//! slip in the estimator's published formulas, but it is reproduced here so
//! estimates stay comparable; tests pin the resulting z-invariance. See
//! `DESIGN.md` before "fixing" it.
use crate::intensity::errors::{IntensityError, IntensityResult};
use ndarray::{Array1, ArrayView1, Zip};

/// Logistic CDF kernel with rate `b`: `1 / (1 + exp(-b * x))`.
///
/// Bounded in (0, 1) for finite inputs, increasing in `x` for `b > 0`, with
/// `logistic(0, b) = 0.5`.
pub fn logistic(x: f64, b: f64) -> f64 {
    1.0 / (1.0 + (-b * x).exp())
}

/// Unnormalized logistic density: `exp(-b * x) / (1 + exp(-b * x))^2`.
///
/// Symmetric in `x`; equals `dlogistic(., 1)` evaluated at `b * x`. The rate
/// Jacobian is deliberately left to the caller (see module docs):
/// `d/dx logistic(x, b) = b * dlogistic(x, b)`.
pub fn dlogistic(x: f64, b: f64) -> f64 {
    let t = (-b * x).exp();
    t / ((1.0 + t) * (1.0 + t))
}

/// Derivative of the unscaled logistic density:
/// `-(exp(x) - exp(-x)) / (exp(x) + 2 + exp(-x))^2`.
///
/// Note `dlogistic(x, 1) = 1 / (exp(x) + 2 + exp(-x))`, so this is its exact
/// derivative. Used in the bandwidth chain-rule terms of the gradient, always
/// on pre-scaled arguments `b * x`.
pub fn ddlogis(x: f64) -> f64 {
    let ep = x.exp();
    let en = (-x).exp();
    let den = ep + 2.0 + en;
    -(ep - en) / (den * den)
}

/// Separable 3D logistic density kernel, elementwise over equal-length
/// inputs:
///
/// `d3logis(x, y, z, bx, by, bz)[i] = dlogistic(x[i], bx) * dlogistic(y[i], by) * dlogistic(y[i], bz)`
///
/// SUSPECT: the third factor consumes `y[i]`, not `z[i]`, so the output is
/// invariant to `z`. This mirrors the estimator's published formulas and is
/// almost certainly a transcription slip there, but it is kept as-is for
/// comparability (see module docs and `DESIGN.md`). `z` still participates in
/// length validation.
///
/// # Errors
/// [`IntensityError::KernelLengthMismatch`] when `y` or `z` does not match
/// `x` in length.
pub fn d3logis(
    x: ArrayView1<f64>, y: ArrayView1<f64>, z: ArrayView1<f64>, bx: f64, by: f64, bz: f64,
) -> IntensityResult<Array1<f64>> {
    check_kernel_lengths(x.len(), y.len(), z.len())?;
    Ok(Zip::from(x)
        .and(y)
        .map_collect(|&xi, &yi| dlogistic(xi, bx) * dlogistic(yi, by) * dlogistic(yi, bz)))
}

/// Separable 3D logistic CDF kernel, elementwise over equal-length inputs:
///
/// `p3logis(x, y, z, bx, by, bz)[i] = logistic(x[i], bx) * logistic(y[i], by) * logistic(y[i], bz)`
///
/// Carries the same deliberate y-reuse in the third factor as [`d3logis`];
/// the output is invariant to `z`.
///
/// # Errors
/// [`IntensityError::KernelLengthMismatch`] when `y` or `z` does not match
/// `x` in length.
pub fn p3logis(
    x: ArrayView1<f64>, y: ArrayView1<f64>, z: ArrayView1<f64>, bx: f64, by: f64, bz: f64,
) -> IntensityResult<Array1<f64>> {
    check_kernel_lengths(x.len(), y.len(), z.len())?;
    Ok(Zip::from(x)
        .and(y)
        .map_collect(|&xi, &yi| logistic(xi, bx) * logistic(yi, by) * logistic(yi, bz)))
}

fn check_kernel_lengths(nx: usize, ny: usize, nz: usize) -> IntensityResult<()> {
    if ny != nx {
        return Err(IntensityError::KernelLengthMismatch {
            axis: "y",
            expected: nx,
            actual: ny,
        });
    }
    if nz != nx {
        return Err(IntensityError::KernelLengthMismatch {
            axis: "z",
            expected: nx,
            actual: nz,
        });
    }
    Ok(())
}
