//! rust_pointprocess — spatial point-process intensity estimation.
//!
//! Purpose
//! -------
//! Estimate the parameters of a 3D spatial point-process intensity model by
//! maximum likelihood. The model couples a separable logistic interaction
//! kernel (one rate per axis, plus an amplitude) with a leave-one-out
//! conditional-intensity likelihood and a boundary normalization term; a
//! dense BFGS solver with analytic gradients does the fitting.
//!
//! Key behaviors
//! -------------
//! - Validated data containers for point patterns and observation windows
//!   (`intensity::core::data`).
//! - Logistic kernel primitives, including the standalone diagnostic
//!   kernels `d3logis` / `p3logis` (`intensity::core::kernels`).
//! - A `LogisticIntensityModel` implementing the generic `LogLikelihood`
//!   trait with analytic value and gradient, plus the one-call entry point
//!   `intensity_est_logis_bfgs` (`intensity::models`).
//! - A reusable Argmin-backed BFGS optimization layer (`optimization`).
//!
//! Invariants & assumptions
//! ------------------------
//! - Parameters are estimated on the log scale; positivity of the amplitude
//!   and rates is structural.
//! - Evaluation is single-threaded, synchronous, and stateless across
//!   calls; the leave-one-out pass is O(N²) by design.
//! - All heavy numerics live in the inner modules; errors surface as
//!   structured enums, never panics, on invalid input.
//!
//! Downstream usage
//! ----------------
//! ```no_run
//! use ndarray::array;
//! use rust_pointprocess::intensity::prelude::*;
//!
//! let fit = intensity_est_logis_bfgs(
//!     array![0.1, 0.6, 0.3],          // x
//!     array![0.2, 0.4, 0.9],          // y
//!     array![0.5, 0.1, 0.7],          // z
//!     array![1.0, 1.0, 1.0],          // window bound tau
//!     array![1.6, 0.7, 0.7, 0.7],     // log-scale starting guess
//! )?;
//! println!("par = {:?}, value = {}, convergence = {}", fit.par, fit.value, fit.convergence);
//! # Ok::<(), rust_pointprocess::intensity::IntensityError>(())
//! ```
//!
//! Testing notes
//! -------------
//! - Kernel identities, gradient/objective consistency, and validation
//!   behavior are covered by unit tests in the inner modules.
//! - The full fit pipeline is exercised by the integration tests.

pub mod intensity;
pub mod optimization;

pub use crate::intensity::core::kernels::{d3logis, p3logis};
pub use crate::intensity::models::logistic::{
    intensity_est_logis_bfgs, IntensityFit, LogisticIntensityModel,
};
pub use crate::intensity::{
    IntensityData, IntensityError, IntensityResult, ObservationWindow, PointPattern,
};
