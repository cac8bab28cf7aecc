//! Fit module orchestrator.
//!
//! The fit calculator lives in the private `core` module; callers import
//! `compute_fit` from here.

mod core;

pub use core::compute_fit;
