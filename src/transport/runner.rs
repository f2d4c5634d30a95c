//! Orchestration: heuristic, then refinement.

use log::{debug, info};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::config::OptimizerConfig;
use super::types::TransportSolution;
use crate::ibfs::Heuristic;
use crate::minimize::{ConstrainedMinimizer, SimplexMinimizer};
use crate::problem::{TransportError, TransportProblem};
use crate::refine::Refiner;

/// Solves transportation problems: builds a starting plan with the chosen
/// heuristic and refines it with a [`ConstrainedMinimizer`].
///
/// # Examples
///
/// ```
/// use u_transport::ibfs::Heuristic;
/// use u_transport::problem::TransportProblem;
/// use u_transport::transport::TransportOptimizer;
///
/// let problem = TransportProblem::new(
///     vec![vec![8.0, 6.0], vec![4.0, 9.0]],
///     vec![10.0, 10.0],
///     vec![10.0, 10.0],
/// )
/// .unwrap();
///
/// let optimizer = TransportOptimizer::default();
/// let solution = optimizer.solve(&problem, Heuristic::NorthwestCorner).unwrap();
/// assert!((solution.initial_cost - 170.0).abs() < 1e-9);
/// assert!((solution.total_cost - 100.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct TransportOptimizer<M = SimplexMinimizer> {
    config: OptimizerConfig,
    minimizer: M,
}

impl Default for TransportOptimizer {
    fn default() -> Self {
        Self {
            config: OptimizerConfig::default(),
            minimizer: SimplexMinimizer::default(),
        }
    }
}

impl TransportOptimizer {
    /// Creates an optimizer backed by a [`SimplexMinimizer`] configured
    /// from `config.simplex`.
    pub fn new(config: OptimizerConfig) -> Result<Self, TransportError> {
        config.validate().map_err(TransportError::InvalidConfig)?;
        let minimizer =
            SimplexMinimizer::new(config.simplex.clone()).map_err(TransportError::InvalidConfig)?;
        Ok(Self { config, minimizer })
    }
}

impl<M: ConstrainedMinimizer> TransportOptimizer<M> {
    /// Replaces the minimizer used for refinement.
    pub fn with_minimizer<N: ConstrainedMinimizer>(self, minimizer: N) -> TransportOptimizer<N> {
        TransportOptimizer {
            config: self.config,
            minimizer,
        }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    pub fn minimizer(&self) -> &M {
        &self.minimizer
    }

    /// Solves `problem` starting from `heuristic`.
    ///
    /// # Errors
    ///
    /// [`TransportError::Unbalanced`] when `require_balanced` is set and the
    /// supply and demand totals differ beyond `balance_tolerance`.
    pub fn solve(
        &self,
        problem: &TransportProblem,
        heuristic: Heuristic,
    ) -> Result<TransportSolution, TransportError> {
        if self.config.require_balanced {
            problem.check_balanced(self.config.balance_tolerance)?;
        }

        let initial = heuristic.build(problem);
        let initial_cost = initial.total_cost(problem);
        debug!(
            "{}: starting plan for {}x{} problem costs {}",
            heuristic,
            problem.rows(),
            problem.cols(),
            initial_cost
        );

        let refined = Refiner::run(problem, &initial, &self.minimizer, &self.config.refine);
        info!(
            "{}: cost {} -> {} ({} iterations, converged: {})",
            heuristic, initial_cost, refined.total_cost, refined.iterations, refined.converged
        );

        Ok(TransportSolution {
            heuristic,
            initial,
            initial_cost,
            allocation: refined.allocation,
            total_cost: refined.total_cost,
            iterations: refined.iterations,
            converged: refined.converged,
        })
    }

    /// Like [`solve`](Self::solve), selecting the heuristic by identifier.
    ///
    /// # Errors
    ///
    /// [`TransportError::UnknownMethod`] for an unrecognised identifier, in
    /// addition to the errors of [`solve`](Self::solve).
    pub fn solve_named(
        &self,
        problem: &TransportProblem,
        method: &str,
    ) -> Result<TransportSolution, TransportError> {
        let heuristic: Heuristic = method.parse()?;
        self.solve(problem, heuristic)
    }

    /// Solves independent problems, in parallel when the `parallel` feature
    /// is enabled and [`OptimizerConfig::parallel`] is set.
    ///
    /// Results are returned in input order.
    pub fn solve_batch(
        &self,
        problems: &[TransportProblem],
        heuristic: Heuristic,
    ) -> Vec<Result<TransportSolution, TransportError>> {
        #[cfg(feature = "parallel")]
        {
            if self.config.parallel {
                return problems
                    .par_iter()
                    .map(|problem| self.solve(problem, heuristic))
                    .collect();
            }
        }

        problems
            .iter()
            .map(|problem| self.solve(problem, heuristic))
            .collect()
    }
}
