//! optimization — MLE stack and unified error surface.
//!
//! Purpose
//! -------
//! Provide a cohesive optimization layer for model fitting: an Argmin-backed
//! log-likelihood optimizer with a single error/result surface. Callers
//! implement a log-likelihood, choose tolerances, and obtain fitted
//! parameters and diagnostics without touching backend solver details.
//!
//! Key behaviors
//! -------------
//! - Expose a high-level API for **maximizing log-likelihoods** `ℓ(θ)`
//!   (`loglik_optimizer`), including configuration of the BFGS solver and
//!   stopping criteria.
//! - Normalize configuration issues, numerical failures, and backend solver
//!   errors into a single enum (`errors::OptError`) with a common result
//!   alias (`OptResult<T>`).
//!
//! Conventions
//! -----------
//! - All solvers conceptually maximize a log-likelihood `ℓ(θ)` by minimizing
//!   an internal cost `c(θ) = -ℓ(θ)`; user-facing APIs and outcomes are
//!   expressed in terms of `ℓ`.
//! - Parameters and gradients are represented using `ndarray`-based aliases
//!   (`Theta`, `Grad`, `Hessian`); any mapping between unconstrained θ-space
//!   and structured model parameters is handled by the model layer.
//! - Public optimization entrypoints that can fail return `OptResult<T>`;
//!   callers never see raw Argmin errors.
//! - This module avoids I/O; optional progress logging is feature-gated
//!   (`obs_slog`) and off by default.
//!
//! Downstream usage
//! ----------------
//! - Model code implements `LogLikelihood` for its types and calls
//!   `maximize` with a parameter guess, data payload, and `MLEOptions` to
//!   obtain an `OptimOutcome` (via `loglik_optimizer`).
//! - Front-ends typically import the curated surface via
//!   `optimization::prelude::*`.

pub mod errors;
pub mod loglik_optimizer;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_pointprocess::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
}
