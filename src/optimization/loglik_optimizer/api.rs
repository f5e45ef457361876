//! High-level entry point for maximizing a user-provided `LogLikelihood`.
//!
//! This selects a dense BFGS solver with either Hager–Zhang or More–Thuente
//! line search, wraps the model in an `ArgMinAdapter` (which *minimizes*
//! `-ℓ(θ)`), and delegates the run to `run_bfgs`.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        adapter::ArgMinAdapter,
        builders::{build_bfgs_hager_zhang, build_bfgs_more_thuente},
        run::run_bfgs,
        traits::{LineSearcher, LogLikelihood, MLEOptions},
        OptimOutcome, Theta,
    },
};

/// Maximize a log-likelihood `ℓ(θ)` using BFGS with the chosen line search.
///
/// # Behavior
/// - Validates the initial guess via `f.check(theta0, data)`.
/// - Wraps `(f, data)` in an `ArgMinAdapter` that exposes a *minimization*
///   problem `c(θ) = -ℓ(θ)` to `argmin`.
/// - Builds a BFGS solver with either **Hager–Zhang** or **More–Thuente**
///   line search based on `opts.line_searcher`.
/// - Calls `run_bfgs`, which configures the executor (initial params,
///   identity inverse Hessian, max iters, optional observers) and returns an
///   `OptimOutcome`.
///
/// # Parameters
/// - `f`: Your model implementing [`LogLikelihood`].
/// - `theta0`: Initial parameter vector (consumed).
/// - `data`: Model data passed through to `value`/`grad`.
/// - `opts`: Optimizer options (tolerances, line search choice, verbosity).
///
/// # Errors
/// - Propagates any error from `f.check`.
/// - Propagates builder errors from `build_bfgs_*`.
/// - Propagates runtime errors from `run_bfgs` (e.g., line search failures).
///
/// # Returns
/// An [`OptimOutcome`] containing `theta_hat`, best value `ℓ(θ̂)`,
/// termination status and convergence code, iteration counts, function
/// evaluation counts, and optionally the gradient norm.
///
/// # Example
/// ```no_run
/// use ndarray::array;
/// use rust_pointprocess::optimization::{
///     errors::OptResult,
///     loglik_optimizer::{maximize, LogLikelihood, MLEOptions},
/// };
///
/// struct MyLL;
/// impl LogLikelihood for MyLL {
///     type Data = ();
///     fn value(&self, theta: &ndarray::Array1<f64>, _: &()) -> OptResult<f64> {
///         // Simple concave log-likelihood: -(θ·θ)
///         Ok(-theta.dot(theta))
///     }
///     fn check(&self, _: &ndarray::Array1<f64>, _: &()) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let f = MyLL;
/// let theta0 = array![0.1, -0.2, 0.3];
/// let opts = MLEOptions::default();
/// let out = maximize(&f, theta0, &(), &opts)?;
/// println!("theta_hat = {:?}", out.theta_hat);
/// # Ok::<(), rust_pointprocess::optimization::errors::OptError>(())
/// ```
pub fn maximize<F: LogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let problem = ArgMinAdapter::new(f, data);
    match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_bfgs_more_thuente(opts)?;
            run_bfgs(theta0, opts, problem, solver)
        }
        LineSearcher::HagerZhang => {
            let solver = build_bfgs_hager_zhang(opts)?;
            run_bfgs(theta0, opts, problem, solver)
        }
    }
}
