//! Solution type returned by the orchestrator.

use crate::ibfs::Heuristic;
use crate::problem::Allocation;

/// Outcome of solving one transportation problem.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportSolution {
    /// Heuristic that produced the starting plan.
    pub heuristic: Heuristic,

    /// Starting plan, before refinement.
    pub initial: Allocation,

    /// Cost of the starting plan.
    pub initial_cost: f64,

    /// Refined plan.
    pub allocation: Allocation,

    /// Objective value of the refined plan, as reported by the minimizer.
    pub total_cost: f64,

    /// Minimizer iterations spent on refinement.
    pub iterations: usize,

    /// Whether the minimizer converged.
    pub converged: bool,
}

impl TransportSolution {
    /// Cost saved by refinement (never negative for a converged solve
    /// from a feasible start).
    pub fn improvement(&self) -> f64 {
        self.initial_cost - self.total_cost
    }

    /// Refined plan as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.allocation.to_rows()
    }
}
