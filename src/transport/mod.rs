//! Transportation problem orchestrator.
//!
//! Validates the problem, builds a starting plan with the selected
//! [`Heuristic`](crate::ibfs::Heuristic) and refines it through the
//! [`refine`](crate::refine) engine.
//!
//! # Key Types
//!
//! - [`TransportOptimizer`]: entry point; generic over the injected
//!   [`ConstrainedMinimizer`](crate::minimize::ConstrainedMinimizer)
//! - [`OptimizerConfig`]: balance check, refinement and solver settings
//! - [`TransportSolution`]: starting and refined plans with their costs
//!
//! # References
//!
//! - Hitchcock (1941), "The distribution of a product from several sources
//!   to numerous localities"
//! - Taha, *Operations Research: An Introduction*, ch. 5

mod config;
mod runner;
mod types;

pub use config::OptimizerConfig;
pub use runner::TransportOptimizer;
pub use types::TransportSolution;
