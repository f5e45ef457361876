//! Logistic intensity model: analytic log-likelihood and gradient.
//!
//! This module wires the separable 3D logistic-kernel intensity model to the
//! `LogLikelihood` trait. Parameters live in unconstrained log space,
//! `theta = (log a, log bx, log by, log bz)`, mapped through
//! [`InteractionParams::from_theta`]; the likelihood combines a pairwise
//! leave-one-out conditional-intensity term with a boundary normalization
//! evaluated at the observation-window bound.
//!
//! Key ideas:
//! - For each point `i`, the conditional intensity is the kernel sum over the
//!   other `N - 1` points:
//!   `lambda_i = sum_j a*bx*by*bz * dlogistic(dx, bx) * dlogistic(dy, by) * dlogistic(dy, bz)`
//!   (the third factor reuses the y displacement, the deliberate quirk
//!   documented in [`crate::intensity::core::kernels`]; as a consequence the
//!   z coordinates never enter the likelihood numerically).
//! - `l(theta) = sum_i log lambda_i - a * sum_i p3logis(tau - point_i)`.
//! - The gradient is the exact differential of `l` w.r.t. the log-scale
//!   parameters: each bandwidth term substitutes `ddlogis` for its density
//!   factor (product rule), plus the boundary-term derivative. Analytic and
//!   finite-difference gradients agree to optimizer precision; the unit tests
//!   enforce this.
//! - The leave-one-out double loop is O(N^2) by design; exact exclusion of
//!   point `i` is part of the estimator, not an inefficiency to optimize away.
//!
//! Evaluation is single-threaded and allocation-free in the inner loops;
//! each outer iteration accumulates into per-iteration scalars only.
use crate::{
    intensity::{
        core::{
            data::{IntensityData, ObservationWindow, PointPattern},
            kernels::{ddlogis, dlogistic, logistic},
            params::{validate_theta, InteractionParams, THETA_DIM},
        },
        errors::{IntensityError, IntensityResult},
    },
    optimization::{
        errors::OptResult,
        loglik_optimizer::{maximize, Cost, Grad, LogLikelihood, MLEOptions, OptimOutcome, Theta},
    },
};
use ndarray::Array1;

/// Estimation summary returned to callers.
///
/// - `par`: estimated parameter vector on the **log scale** (the optimizer's
///   internal representation).
/// - `value`: the minimized objective, i.e. the negative log-likelihood at
///   `par`.
/// - `convergence`: integer code passed through from the optimizer —
///   0 = converged by the solver's own criteria, 1 = iteration limit
///   reached, 10 = any other termination. Non-convergence is not an error;
///   the caller decides how to react.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityFit {
    /// Log-scale parameter estimates `(log a, log bx, log by, log bz)`.
    pub par: Array1<f64>,
    /// Negative log-likelihood at `par`.
    pub value: f64,
    /// Optimizer convergence code (0 = success).
    pub convergence: i32,
}

/// Logistic intensity model with analytic log-likelihood and gradient.
///
/// Holds the optimizer configuration and, after [`fit`](Self::fit), caches
/// the full optimization outcome and the fitted model-space parameters.
/// Implements [`LogLikelihood`], so it plugs directly into the BFGS layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticIntensityModel {
    /// Optimizer options (tolerances, line search, verbosity).
    pub options: MLEOptions,
    /// Fit results (populated after `fit`).
    pub results: Option<OptimOutcome>,
    /// Fitted model-space parameters (populated after `fit`).
    pub fitted_params: Option<InteractionParams>,
}

impl LogisticIntensityModel {
    /// Construct an unfitted model with the given optimizer options.
    pub fn new(options: MLEOptions) -> LogisticIntensityModel {
        LogisticIntensityModel { options, results: None, fitted_params: None }
    }

    /// Fit by maximum likelihood with BFGS (consumes `theta0`) and cache
    /// results.
    ///
    /// ## Steps
    /// 1. `maximize` validates `theta0` via [`LogLikelihood::check`] and runs
    ///    BFGS with the analytic value/gradient pair.
    /// 2. The best parameters are mapped into model space and cached in
    ///    `self.fitted_params`; the full [`OptimOutcome`] lands in
    ///    `self.results`.
    /// 3. The returned [`IntensityFit`] reports the log-scale estimates, the
    ///    minimized objective (`-l(theta_hat)`), and the convergence code.
    ///
    /// ## Errors
    /// Propagates optimizer and model errors; a fit that merely fails to
    /// converge is **not** an error (inspect `convergence`).
    pub fn fit(&mut self, theta0: Array1<f64>, data: &IntensityData) -> OptResult<IntensityFit> {
        let outcome = maximize(self, theta0, data, &self.options)?;
        let params = InteractionParams::from_theta(outcome.theta_hat.view())?;
        let fit = IntensityFit {
            par: outcome.theta_hat.clone(),
            value: -outcome.value,
            convergence: outcome.code,
        };
        self.fitted_params = Some(params);
        self.results = Some(outcome);
        Ok(fit)
    }

    /// Conditional pairwise intensity at point `i`, excluding point `i`.
    ///
    /// `lambda_i = a*bx*by*bz * sum_{j != i} dlogistic(dx, bx) *
    /// dlogistic(dy, by) * dlogistic(dy, bz)` with `dx = x_i - x_j`,
    /// `dy = y_i - y_j`.
    fn conditional_intensity(pattern: &PointPattern, p: &InteractionParams, i: usize) -> f64 {
        let (xi, yi) = (pattern.x[i], pattern.y[i]);
        let mut sum = 0.0;
        for j in 0..pattern.len() {
            if j == i {
                continue;
            }
            let dx = xi - pattern.x[j];
            let dy = yi - pattern.y[j];
            sum += dlogistic(dx, p.bx) * dlogistic(dy, p.by) * dlogistic(dy, p.bz);
        }
        p.a * p.bx * p.by * p.bz * sum
    }

    /// Leave-one-out sums for the gradient at point `i`.
    ///
    /// Returns `(lambda_i, cx, cy, cz)` where each `ck` is the product-rule
    /// correction for log-bandwidth `k`: the density factor for axis `k` is
    /// replaced by `(b_k * d_k) * ddlogis(b_k * d_k)`, with `d_k` the
    /// displacement that factor actually consumes (`dx`, `dy`, `dy`). Then
    /// `d lambda_i / d log b_k = lambda_i + ck`.
    fn leave_one_out_terms(
        pattern: &PointPattern, p: &InteractionParams, i: usize,
    ) -> (f64, f64, f64, f64) {
        let (xi, yi) = (pattern.x[i], pattern.y[i]);
        let (mut s, mut sx, mut sy, mut sz) = (0.0, 0.0, 0.0, 0.0);
        for j in 0..pattern.len() {
            if j == i {
                continue;
            }
            let dx = xi - pattern.x[j];
            let dy = yi - pattern.y[j];
            let gx = dlogistic(dx, p.bx);
            let gy = dlogistic(dy, p.by);
            let gz = dlogistic(dy, p.bz);
            s += gx * gy * gz;
            sx += (p.bx * dx) * ddlogis(p.bx * dx) * gy * gz;
            sy += (p.by * dy) * gx * ddlogis(p.by * dy) * gz;
            sz += (p.bz * dy) * gx * gy * ddlogis(p.bz * dy);
        }
        let scale = p.a * p.bx * p.by * p.bz;
        (scale * s, scale * sx, scale * sy, scale * sz)
    }

    /// Per-point boundary factors at the window bound.
    ///
    /// Returns the three CDF factors of `p3logis(tau - point_i)`; the third
    /// factor consumes the y displacement (kernel quirk), so `tau_z` and the
    /// z coordinate are unused here.
    fn boundary_factors(
        pattern: &PointPattern, window: &ObservationWindow, p: &InteractionParams, i: usize,
    ) -> (f64, f64, f64, f64, f64) {
        let u = window.tx() - pattern.x[i];
        let v = window.ty() - pattern.y[i];
        (u, v, logistic(u, p.bx), logistic(v, p.by), logistic(v, p.bz))
    }
}

impl LogLikelihood for LogisticIntensityModel {
    type Data = IntensityData;

    /// Log-likelihood `l(theta)` of the pattern under the intensity model.
    ///
    /// `l = sum_i log lambda_i - a * sum_i p3logis(tau - point_i)`; the
    /// optimization layer minimizes `-l`, which is exactly the estimator's
    /// objective.
    ///
    /// # Errors
    /// - Parameter transform failures from [`InteractionParams::from_theta`].
    /// - [`IntensityError::NonPositiveIntensity`] when a `lambda_i`
    ///   underflows to zero (points too dispersed for the bandwidths); this
    ///   fails fast instead of sending `log(0) = -inf` into the optimizer.
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost> {
        let p = InteractionParams::from_theta(theta.view())?;
        let pattern = &data.pattern;
        let n = pattern.len();
        let mut loglik = 0.0;
        for i in 0..n {
            let lambda = Self::conditional_intensity(pattern, &p, i);
            if !lambda.is_finite() || lambda <= 0.0 {
                return Err(IntensityError::NonPositiveIntensity { index: i, value: lambda }.into());
            }
            loglik += lambda.ln();
        }
        let mut boundary_mass = 0.0;
        for i in 0..n {
            let (_, _, lx, ly, lz) = Self::boundary_factors(pattern, &data.window, &p, i);
            boundary_mass += lx * ly * lz;
        }
        Ok(loglik - p.a * boundary_mass)
    }

    /// Validate the unconstrained parameter vector (length 4, finite).
    fn check(&self, theta: &Theta, _data: &Self::Data) -> OptResult<()> {
        validate_theta(theta.view())?;
        Ok(())
    }

    /// Analytic gradient of `l(theta)` w.r.t. the log-scale parameters.
    ///
    /// # Steps
    /// 1. Recompute each `lambda_i` together with the three product-rule
    ///    corrections from [`Self::leave_one_out_terms`]; accumulate
    ///    `(lambda_i + ck) / lambda_i` per bandwidth.
    /// 2. Accumulate the boundary-term derivatives at the window bound.
    /// 3. Assemble:
    ///    - `d l / d log a   = N - a * sum_i p3logis(...)`,
    ///    - `d l / d log b_k = sum_i (lambda_i + ck_i)/lambda_i
    ///       - a * sum_i (b_k * w_i) * dlogistic(w_i, b_k) * (other two
    ///       logistic factors)`.
    ///
    /// Consistent with [`Self::value`] by construction; the unit tests check
    /// it against central finite differences of the objective.
    fn grad(&self, theta: &Theta, data: &Self::Data) -> OptResult<Grad> {
        let p = InteractionParams::from_theta(theta.view())?;
        let pattern = &data.pattern;
        let n = pattern.len();
        let (mut g_bx, mut g_by, mut g_bz) = (0.0, 0.0, 0.0);
        let mut sum_q = 0.0;
        let (mut bnd_x, mut bnd_y, mut bnd_z) = (0.0, 0.0, 0.0);
        for i in 0..n {
            let (lambda, cx, cy, cz) = Self::leave_one_out_terms(pattern, &p, i);
            if !lambda.is_finite() || lambda <= 0.0 {
                return Err(IntensityError::NonPositiveIntensity { index: i, value: lambda }.into());
            }
            g_bx += (lambda + cx) / lambda;
            g_by += (lambda + cy) / lambda;
            g_bz += (lambda + cz) / lambda;
            let (u, v, lx, ly, lz) = Self::boundary_factors(pattern, &data.window, &p, i);
            sum_q += lx * ly * lz;
            bnd_x += (p.bx * u) * dlogistic(u, p.bx) * ly * lz;
            bnd_y += (p.by * v) * dlogistic(v, p.by) * lx * lz;
            bnd_z += (p.bz * v) * dlogistic(v, p.bz) * lx * ly;
        }
        let mut grad = Array1::zeros(THETA_DIM);
        grad[0] = n as f64 - p.a * sum_q;
        grad[1] = g_bx - p.a * bnd_x;
        grad[2] = g_by - p.a * bnd_y;
        grad[3] = g_bz - p.a * bnd_z;
        Ok(grad)
    }
}

/// Estimate the intensity parameters by BFGS from raw inputs.
///
/// The single estimation entry point: validates and packs the coordinate
/// vectors, window bound, and log-scale starting guess, fits a
/// [`LogisticIntensityModel`] under default [`MLEOptions`], and returns the
/// `{par, value, convergence}` summary. The surface is non-convex; the
/// starting guess is the caller's responsibility.
///
/// # Errors
/// - Input validation failures from [`PointPattern::new`] /
///   [`ObservationWindow::new`] / the theta checks (all reported before any
///   likelihood computation).
/// - Hard optimizer failures, folded into
///   [`IntensityError::OptimizationFailed`]. Mere non-convergence is
///   reported through the `convergence` code instead.
pub fn intensity_est_logis_bfgs(
    x: Array1<f64>, y: Array1<f64>, z: Array1<f64>, tau: Array1<f64>, par: Array1<f64>,
) -> IntensityResult<IntensityFit> {
    let pattern = PointPattern::new(x, y, z)?;
    let window = ObservationWindow::new(tau)?;
    let data = IntensityData::new(pattern, window);
    let mut model = LogisticIntensityModel::new(MLEOptions::default());
    Ok(model.fit(par, &data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Likelihood-level correctness: a hand-computed N = 2 objective, analytic
    // vs finite-difference gradients, determinism, propagation of the
    // z-invariance quirk, and the degenerate-intensity error path. End-to-end
    // BFGS behavior lives in the integration tests.
    // -------------------------------------------------------------------------

    fn small_pattern() -> IntensityData {
        // Five fixed points in the unit cube; z values deliberately spread to
        // exercise the documented z-invariance.
        let pattern = PointPattern::new(
            array![0.12, 0.47, 0.81, 0.33, 0.66],
            array![0.55, 0.21, 0.74, 0.90, 0.08],
            array![0.39, 0.83, 0.17, 0.52, 0.95],
        )
        .expect("valid pattern");
        let window = ObservationWindow::new(array![1.0, 1.0, 1.0]).expect("valid window");
        IntensityData::new(pattern, window)
    }

    /// Central finite-difference gradient of the log-likelihood.
    fn numerical_grad(
        model: &LogisticIntensityModel, theta: &Array1<f64>, data: &IntensityData, h: f64,
    ) -> Array1<f64> {
        let mut out = Array1::zeros(theta.len());
        for k in 0..theta.len() {
            let mut up = theta.clone();
            let mut down = theta.clone();
            up[k] += h;
            down[k] -= h;
            let f_up = model.value(&up, data).expect("value at theta + h");
            let f_down = model.value(&down, data).expect("value at theta - h");
            out[k] = (f_up - f_down) / (2.0 * h);
        }
        out
    }

    #[test]
    // Purpose
    // -------
    // Hand-computed objective for N = 2: both leave-one-out sums have a
    // single term, and the kernel factors can be written out with raw exp
    // calls, independent of the production kernel code.
    //
    // Given
    // -----
    // - Points (0, 0, 0) and (0.5, 0.2, 0.8), tau = (1, 1, 1).
    // - theta = (log 2, log 1, log 1.5, log 0.7).
    //
    // Expect
    // ------
    // - `value` matches the explicit formula
    //   l = log(lam_0) + log(lam_1) - a * (q_0 + q_1)
    //   with the third kernel factor applied to the y displacement.
    fn value_matches_hand_computed_two_point_objective() {
        let data = IntensityData::new(
            PointPattern::new(array![0.0, 0.5], array![0.0, 0.2], array![0.0, 0.8])
                .expect("valid pattern"),
            ObservationWindow::new(array![1.0, 1.0, 1.0]).expect("valid window"),
        );
        let (a, bx, by, bz): (f64, f64, f64, f64) = (2.0, 1.0, 1.5, 0.7);
        let theta = array![a.ln(), bx.ln(), by.ln(), bz.ln()];

        let dens = |d: f64, b: f64| {
            let t = (-b * d).exp();
            t / ((1.0 + t) * (1.0 + t))
        };
        let cdf = |d: f64, b: f64| 1.0 / (1.0 + (-b * d).exp());
        let scale = a * bx * by * bz;
        // lam_0: displacement to the other point is (-0.5, -0.2); the third
        // density factor reuses dy = -0.2.
        let lam0 = scale * dens(-0.5, bx) * dens(-0.2, by) * dens(-0.2, bz);
        let lam1 = scale * dens(0.5, bx) * dens(0.2, by) * dens(0.2, bz);
        let q0 = cdf(1.0, bx) * cdf(1.0, by) * cdf(1.0, bz);
        let q1 = cdf(0.5, bx) * cdf(0.8, by) * cdf(0.8, bz);
        let expected = lam0.ln() + lam1.ln() - a * (q0 + q1);

        let model = LogisticIntensityModel::new(MLEOptions::default());
        let got = model.value(&theta, &data).expect("finite objective");
        assert_relative_eq!(got, expected, max_relative = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // The analytic gradient is the exact differential of the objective:
    // compare against central finite differences at several theta on a fixed
    // five-point pattern, to 1e-4.
    fn analytic_gradient_matches_finite_differences() {
        let data = small_pattern();
        let model = LogisticIntensityModel::new(MLEOptions::default());
        let thetas = [
            array![1.6094379124341003, 0.6931471805599453, 0.6931471805599453, 0.6931471805599453],
            array![0.0, 0.0, 0.0, 0.0],
            array![1.0, -0.3, 0.5, 0.2],
        ];
        for theta in thetas {
            let analytic = model.grad(&theta, &data).expect("analytic gradient");
            let numeric = numerical_grad(&model, &theta, &data, 1e-6);
            for k in 0..4 {
                assert_relative_eq!(
                    analytic[k],
                    numeric[k],
                    epsilon = 1e-6,
                    max_relative = 1e-4
                );
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // The y-reuse quirk propagates: the objective and gradient never read the
    // z coordinates, so replacing them leaves both unchanged. This pins the
    // behavior at the model level, mirroring the kernel-level test.
    fn objective_and_gradient_ignore_z_coordinates() {
        let data = small_pattern();
        let mut shuffled = data.clone();
        shuffled.pattern.z = array![5.0, -3.0, 0.0, 12.5, 0.001];
        let model = LogisticIntensityModel::new(MLEOptions::default());
        let theta = array![0.5, 0.1, -0.2, 0.3];
        let v = model.value(&theta, &data).unwrap();
        let v_shuffled = model.value(&theta, &shuffled).unwrap();
        assert_eq!(v.to_bits(), v_shuffled.to_bits());
        let g = model.grad(&theta, &data).unwrap();
        let g_shuffled = model.grad(&theta, &shuffled).unwrap();
        assert_eq!(g, g_shuffled);
    }

    #[test]
    // Purpose
    // -------
    // Two evaluations with identical inputs are bit-identical; the objective
    // has no hidden nondeterminism.
    fn objective_is_deterministic() {
        let data = small_pattern();
        let model = LogisticIntensityModel::new(MLEOptions::default());
        let theta = array![1.2, 0.4, 0.4, 0.4];
        let first = model.value(&theta, &data).unwrap();
        let second = model.value(&theta, &data).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    // Purpose
    // -------
    // When the kernel factors degenerate for points far apart relative to
    // the bandwidths (exp over/underflow collapses lambda to 0 or NaN), the
    // model fails fast instead of handing log(0) or NaN to the optimizer.
    fn degenerate_intensity_is_rejected() {
        let data = IntensityData::new(
            PointPattern::new(
                array![0.0, 5000.0],
                array![0.0, 5000.0],
                array![0.0, 5000.0],
            )
            .expect("valid pattern"),
            ObservationWindow::new(array![1.0, 1.0, 1.0]).expect("valid window"),
        );
        let model = LogisticIntensityModel::new(MLEOptions::default());
        let theta = array![0.0, 1.0, 1.0, 1.0];
        let result = model.value(&theta, &data);
        assert!(matches!(
            result,
            Err(crate::optimization::errors::OptError::NonPositiveIntensity { index: 0, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // `check` rejects malformed theta before any likelihood work.
    fn check_rejects_bad_theta() {
        let data = small_pattern();
        let model = LogisticIntensityModel::new(MLEOptions::default());
        assert!(model.check(&array![0.0, 0.0, 0.0], &data).is_err());
        assert!(model.check(&array![0.0, f64::NAN, 0.0, 0.0], &data).is_err());
        assert!(model.check(&array![0.1, 0.2, 0.3, 0.4], &data).is_ok());
    }
}
