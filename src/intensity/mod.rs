//! intensity — spatial point-process intensity stack: kernels, model, errors.
//!
//! Purpose
//! -------
//! Provide the full intensity-estimation layer for 3D point patterns under a
//! separable logistic interaction kernel: validated data containers, the
//! kernel primitives, the log-likelihood model with analytic gradients, and
//! a shared error surface. This is the module most consumers should depend
//! on; the `optimization` layer underneath is generic over any
//! log-likelihood.
//!
//! Key behaviors
//! -------------
//! - Collect the numerical building blocks in [`core`]: point-pattern and
//!   window containers, logistic kernel primitives (including the standalone
//!   diagnostics [`d3logis`](core::kernels::d3logis) /
//!   [`p3logis`](core::kernels::p3logis)), and the log-scale parameter
//!   transform.
//! - Expose the user-facing model API in [`models`]:
//!   [`LogisticIntensityModel`], the [`IntensityFit`] summary, and the
//!   one-call estimation entry point
//!   [`intensity_est_logis_bfgs`](models::logistic::intensity_est_logis_bfgs).
//! - Centralize intensity-specific errors in [`errors`]
//!   ([`IntensityError`], [`IntensityResult`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - Patterns are validated at the boundary ([`PointPattern`]): equal-length,
//!   finite, index-aligned coordinates with at least two points.
//! - Parameters are estimated on the log scale; positivity in model space is
//!   structural, not enforced by constrained optimization.
//! - Evaluation is single-threaded, synchronous, and stateless across calls;
//!   each leave-one-out pass accumulates into per-iteration scalars only.
//! - The third kernel factor deliberately consumes the y displacement (see
//!   [`core::kernels`]); the z coordinates are validated and carried but do
//!   not enter the likelihood numerically.
//!
//! Downstream usage
//! ----------------
//! 1. Build a [`PointPattern`] and [`ObservationWindow`], bundle them into an
//!    [`IntensityData`].
//! 2. Construct a [`LogisticIntensityModel`] with
//!    [`MLEOptions`](crate::optimization::loglik_optimizer::MLEOptions)
//!    (or take the defaults) and call `fit` with a log-scale starting guess.
//! 3. Read the [`IntensityFit`] summary; fuller diagnostics stay on
//!    `model.results`.
//!
//! Or call `intensity_est_logis_bfgs` with raw vectors for the whole flow in
//! one step.

pub mod core;
pub mod errors;
pub mod models;

pub use self::core::data::{IntensityData, ObservationWindow, PointPattern};
pub use self::errors::{IntensityError, IntensityResult};
pub use self::models::logistic::{IntensityFit, LogisticIntensityModel};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::core::data::{IntensityData, ObservationWindow, PointPattern};
    pub use super::core::kernels::{d3logis, p3logis};
    pub use super::core::params::InteractionParams;
    pub use super::errors::{IntensityError, IntensityResult};
    pub use super::models::logistic::{
        intensity_est_logis_bfgs, IntensityFit, LogisticIntensityModel,
    };
}
