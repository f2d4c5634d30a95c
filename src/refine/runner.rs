//! Refinement of a starting plan through a constrained minimizer.

use log::{debug, warn};

use super::config::RefineConfig;
use crate::minimize::{Bound, ConstrainedMinimizer, ConstrainedProblem, LinearFunction};
use crate::problem::{Allocation, TransportProblem};

/// Result of refining a starting plan.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationResult {
    /// Refined plan with solver noise snapped to zero.
    pub allocation: Allocation,

    /// Objective value reported by the minimizer.
    pub total_cost: f64,

    /// Minimizer iterations.
    pub iterations: usize,

    /// Whether the minimizer reported convergence.
    pub converged: bool,
}

/// Improves a starting plan under the supply/demand equalities.
///
/// The plan is flattened row-major into `m·n` unknowns. The objective is
/// `Σ cost·x`; there is one equality per origin (row total = supply) and
/// one per destination (column total = demand); every unknown is bounded
/// below by 0. Cells in a row with zero supply or a column with zero
/// demand are fixed at 0.
pub struct Refiner;

impl Refiner {
    /// Builds the constrained problem for `problem`.
    pub fn formulate(problem: &TransportProblem) -> ConstrainedProblem {
        let (m, n) = (problem.rows(), problem.cols());
        let bounds = (0..m * n)
            .map(|k| {
                let (i, j) = (k / n, k % n);
                if problem.supply()[i] == 0.0 || problem.demand()[j] == 0.0 {
                    Bound::fixed(0.0)
                } else {
                    Bound::non_negative()
                }
            })
            .collect();

        let mut formulation = ConstrainedProblem::new(
            LinearFunction::from_dense(problem.costs(), 0.0),
            bounds,
        );
        for (i, &s) in problem.supply().iter().enumerate() {
            let row = (0..n).fold(LinearFunction::new(-s), |f, j| f.with_term(i * n + j, 1.0));
            formulation = formulation.with_equality(row);
        }
        for (j, &d) in problem.demand().iter().enumerate() {
            let column = (0..m).fold(LinearFunction::new(-d), |f, i| f.with_term(i * n + j, 1.0));
            formulation = formulation.with_equality(column);
        }
        formulation
    }

    /// Refines `initial` with `minimizer`.
    ///
    /// Never fails: when the minimizer does not converge, its best iterate
    /// is still returned (with `converged == false`). Output of the wrong
    /// length is logged and discarded in favour of `initial`, also with
    /// `converged == false`.
    pub fn run<M: ConstrainedMinimizer + ?Sized>(
        problem: &TransportProblem,
        initial: &Allocation,
        minimizer: &M,
        config: &RefineConfig,
    ) -> OptimizationResult {
        let (m, n) = (problem.rows(), problem.cols());
        let formulation = Self::formulate(problem);
        let minimum = minimizer.minimize(&formulation, initial.as_slice());

        if minimum.converged {
            debug!(
                "refine: converged after {} iterations, cost {}",
                minimum.iterations, minimum.value
            );
        } else {
            warn!(
                "refine: minimizer did not converge after {} iterations (violation {:.3e}); returning best iterate",
                minimum.iterations, minimum.max_violation
            );
        }

        let values = minimum
            .x
            .into_iter()
            .map(|v| if v.abs() < config.zero_tolerance { 0.0 } else { v })
            .collect();
        match Allocation::from_flat(m, n, values) {
            Ok(allocation) => OptimizationResult {
                allocation,
                total_cost: minimum.value,
                iterations: minimum.iterations,
                converged: minimum.converged,
            },
            Err(e) => {
                warn!("refine: discarding minimizer output ({e}); keeping the starting plan");
                OptimizationResult {
                    allocation: initial.clone(),
                    total_cost: initial.total_cost(problem),
                    iterations: minimum.iterations,
                    converged: false,
                }
            }
        }
    }
}
