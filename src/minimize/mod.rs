//! Equality-constrained, box-bounded minimization.
//!
//! The transportation refinement only needs a narrow capability: minimize
//! a scalar function subject to equality constraints and bounds, from a
//! given starting point. This module defines that contract as the
//! [`ConstrainedMinimizer`] trait and ships two implementations: a
//! simplex backend for linear problems (the default) and a log-barrier
//! method that also accepts smooth nonlinear objectives.
//!
//! # Core Traits
//!
//! - [`ScalarFunction`]: objective or constraint, with optional analytic
//!   derivatives
//! - [`ConstrainedMinimizer`]: the solver contract; inject a custom
//!   implementation (or a test double) wherever a minimizer is accepted
//!
//! # Key Types
//!
//! - [`ConstrainedProblem`]: objective, equality constraints and [`Bound`]s
//! - [`Minimum`]: returned point, objective value and diagnostics
//! - [`SimplexMinimizer`] / [`SimplexConfig`]: `microlp` simplex for
//!   linear objectives and constraints
//! - [`BarrierMinimizer`] / [`BarrierConfig`]: primal log-barrier solver
//!
//! # References
//!
//! - Fiacco & McCormick (1968), *Nonlinear Programming: Sequential
//!   Unconstrained Minimization Techniques*
//! - Boyd & Vandenberghe (2004), *Convex Optimization*, ch. 10–11

mod config;
mod linalg;
mod runner;
mod simplex;
mod types;

pub use config::{BarrierConfig, SimplexConfig};
pub use runner::BarrierMinimizer;
pub use simplex::SimplexMinimizer;
pub use types::{
    Bound, ConstrainedMinimizer, ConstrainedProblem, FnFunction, LinearFunction, Minimum,
    ScalarFunction,
};
