//! models — user-facing intensity model APIs.
//!
//! Purpose
//! -------
//! Expose the logistic intensity model surface: [`LogisticIntensityModel`]
//! (a [`LogLikelihood`](crate::optimization::loglik_optimizer::LogLikelihood)
//! implementation with analytic value/gradient and a `fit` method), the
//! [`IntensityFit`] summary, and the one-call estimation entry point
//! [`intensity_est_logis_bfgs`]. This layer wires `intensity::core`
//! primitives into the generic BFGS optimization stack.

pub mod logistic;

pub use self::logistic::{intensity_est_logis_bfgs, IntensityFit, LogisticIntensityModel};
