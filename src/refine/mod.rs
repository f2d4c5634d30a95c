//! Refinement engine.
//!
//! Takes a starting plan from one of the [`ibfs`](crate::ibfs) heuristics
//! and hands it, as a flattened vector, to a
//! [`ConstrainedMinimizer`](crate::minimize::ConstrainedMinimizer) that
//! lowers the total cost while keeping every row and column total. The
//! minimizer's answer is reshaped and values below
//! [`RefineConfig::zero_tolerance`] are snapped to zero.

mod config;
mod runner;

pub use config::RefineConfig;
pub use runner::{OptimizationResult, Refiner};
