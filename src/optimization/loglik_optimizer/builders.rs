//! loglik_optimizer::builders — BFGS solver construction helpers.
//!
//! Purpose
//! -------
//! Provide small, focused builders for the dense BFGS solvers used by the
//! log-likelihood optimizer. These helpers hide Argmin’s generic wiring
//! and apply crate-level options (tolerances) so that higher-level code can
//! request a configured solver without touching Argmin-specific types.
//!
//! Key behaviors
//! -------------
//! - Construct BFGS solvers with either Hager–Zhang or More–Thuente line
//!   search based on crate-level aliases.
//! - Apply optional gradient and cost-change tolerances from
//!   [`MLEOptions`] via a shared configuration helper.
//! - Leave the initial parameter vector, the initial inverse Hessian, and
//!   maximum iterations to the runner/executor layer, keeping these
//!   builders side-effect free.
//!
//! Conventions
//! -----------
//! - [`HagerZhangLS`] and [`MoreThuenteLS`] are the crate’s canonical
//!   line-search aliases; [`BfgsHagerZhang`] and [`BfgsMoreThuente`] pair
//!   them with the standard `Cost` float type.
//! - Errors are always reported via [`OptResult`]; the underlying
//!   `argmin::core::Error` values never leak directly across module
//!   boundaries.
//!
//! Testing notes
//! -------------
//! - Unit tests verify construction and tolerance propagation; full solver
//!   runs are exercised by the runner layer and integration tests.
use argmin::solver::quasinewton::BFGS;

use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        traits::MLEOptions,
        types::{BfgsHagerZhang, BfgsMoreThuente, Cost, HagerZhangLS, MoreThuenteLS},
    },
};

/// Construct a dense BFGS solver with Hager–Zhang line search.
///
/// Consults `opts.tols.tol_grad` and `opts.tols.tol_cost`; when absent,
/// Argmin’s defaults remain in effect. The initial parameter vector,
/// inverse Hessian, and `max_iters` are runtime concerns applied by the
/// runner (`run_bfgs`), not here.
///
/// # Errors
/// `OptError` (via `From<argmin::core::Error>`) when Argmin rejects a
/// tolerance setting.
pub fn build_bfgs_hager_zhang(opts: &MLEOptions) -> OptResult<BfgsHagerZhang> {
    let hager_zhang = HagerZhangLS::new();
    let bfgs = BfgsHagerZhang::new(hager_zhang);
    configure_bfgs(bfgs, opts)
}

/// Construct a dense BFGS solver with More–Thuente line search.
///
/// Same contract as [`build_bfgs_hager_zhang`], with the More–Thuente
/// line-search strategy.
///
/// # Errors
/// `OptError` (via `From<argmin::core::Error>`) when Argmin rejects a
/// tolerance setting.
pub fn build_bfgs_more_thuente(opts: &MLEOptions) -> OptResult<BfgsMoreThuente> {
    let more_thuente = MoreThuenteLS::new();
    let bfgs = BfgsMoreThuente::new(more_thuente);
    configure_bfgs(bfgs, opts)
}

/// Apply optional tolerances to a BFGS solver.
///
/// Generic over the line-search type `L` so both builders share one wiring
/// function. When a tolerance is `None`, the corresponding
/// `with_tolerance_*` method is not called and Argmin’s default applies.
///
/// # Errors
/// `OptError` (via `From<argmin::core::Error>`) when `with_tolerance_grad`
/// or `with_tolerance_cost` rejects a value (e.g., non-finite or negative).
pub fn configure_bfgs<L>(mut solver: BFGS<L, Cost>, opts: &MLEOptions) -> OptResult<BFGS<L, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::loglik_optimizer::traits::{LineSearcher, MLEOptions, Tolerances};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Basic construction of BFGS solvers with Hager–Zhang and
    //   More–Thuente line searches.
    // - Application of gradient and cost tolerances via `configure_bfgs`.
    //
    // They intentionally DO NOT cover:
    // - End-to-end executor behavior (e.g., `run_bfgs`), which is tested
    //   in the optimizer runner layer and integration tests.
    // - Any specific `LogLikelihood` implementation or real data models.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Both builders succeed under a typical options set with both
    // tolerances present.
    //
    // Given
    // -----
    // - Valid `Tolerances` with tol_grad, tol_cost, and max_iter.
    //
    // Expect
    // ------
    // - `build_bfgs_hager_zhang` and `build_bfgs_more_thuente` return `Ok(_)`.
    fn builders_succeed_with_valid_tolerances() {
        let tols =
            Tolerances::new(Some(1e-6), Some(1e-8), Some(50)).expect("Tolerances should be valid");
        let opts = MLEOptions::new(tols, LineSearcher::HagerZhang, false);
        assert!(build_bfgs_hager_zhang(&opts).is_ok());
        assert!(build_bfgs_more_thuente(&opts).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Verify that `configure_bfgs` leaves the solver constructible when
    // both gradient and cost tolerances are `None`, relying on Argmin
    // defaults (the iteration cap is the only stopping rule).
    //
    // Given
    // -----
    // - `MLEOptions` whose `tols` have `tol_grad = None`, `tol_cost = None`.
    //
    // Expect
    // ------
    // - Both builders return `Ok(_)`.
    fn builders_respect_absent_tolerances() {
        let tols = Tolerances::new(None, None, Some(50)).expect("Tolerances should be valid");
        let opts = MLEOptions::new(tols, LineSearcher::MoreThuente, false);
        assert!(build_bfgs_more_thuente(&opts).is_ok());
        assert!(build_bfgs_hager_zhang(&opts).is_ok());
    }
}
