//! core — shared intensity-model data, kernels, and parameter transforms.
//!
//! Purpose
//! -------
//! Collect the building blocks the logistic intensity model is assembled
//! from: validated containers for point patterns and observation windows
//! ([`data`]), the scalar and separable-3D logistic kernel primitives
//! ([`kernels`]), and the log-scale parameter transform with its validation
//! ([`params`]). The model layer builds on these; nothing here depends on
//! the optimizer.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based; point `i` is `(x[i], y[i], z[i])`.
//! - All numerics are `f64`; containers are `ndarray` arrays.
//! - Validation happens in constructors; downstream code assumes the
//!   documented invariants and never re-checks.
//! - No I/O and no logging; errors surface as
//!   [`IntensityResult`](crate::intensity::errors::IntensityResult).

pub mod data;
pub mod kernels;
pub mod params;
