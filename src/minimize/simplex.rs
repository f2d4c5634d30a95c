//! Linear-programming backend on `microlp`.

use std::collections::BTreeMap;

use log::{debug, warn};
use microlp::{ComparisonOp, OptimizationDirection, Problem, Variable};

use super::config::SimplexConfig;
use super::types::{ConstrainedMinimizer, ConstrainedProblem, LinearFunction, Minimum};

/// Default [`ConstrainedMinimizer`]: hands a linear problem to the `microlp`
/// simplex solver.
///
/// The objective and every equality must be [`LinearFunction`]s (see
/// [`ScalarFunction::linear_form`](super::ScalarFunction::linear_form)).
/// Anything else, or an LP the solver rejects as infeasible or unbounded,
/// returns the start with `converged == false`.
///
/// The simplex ignores the starting point. A feasible start is nevertheless
/// returned unchanged unless the LP optimum beats it by more than
/// `feasibility_tolerance · (1 + |f(start)|)`, so a feasible start is never
/// made worse. [`Minimum::iterations`] counts LP solves (0 or 1).
///
/// # Examples
///
/// ```
/// use u_transport::minimize::{
///     Bound, ConstrainedMinimizer, ConstrainedProblem, LinearFunction, SimplexMinimizer,
/// };
///
/// // min x0 + 2·x1  s.t.  x0 + x1 = 1,  x >= 0
/// let problem = ConstrainedProblem::new(
///     LinearFunction::from_dense(&[1.0, 2.0], 0.0),
///     vec![Bound::non_negative(); 2],
/// )
/// .with_equality(LinearFunction::new(-1.0).with_term(0, 1.0).with_term(1, 1.0));
///
/// let minimum = SimplexMinimizer::default().minimize(&problem, &[0.5, 0.5]);
/// assert!(minimum.converged);
/// assert!((minimum.value - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SimplexMinimizer {
    config: SimplexConfig,
}

impl SimplexMinimizer {
    /// Creates a minimizer after validating `config`.
    pub fn new(config: SimplexConfig) -> Result<Self, String> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimplexConfig {
        &self.config
    }
}

impl ConstrainedMinimizer for SimplexMinimizer {
    fn minimize(&self, problem: &ConstrainedProblem, start: &[f64]) -> Minimum {
        let tol = self.config.feasibility_tolerance;
        let n = problem.dimension();
        let start: Vec<f64> = (0..n).map(|k| start.get(k).copied().unwrap_or(0.0)).collect();
        let start_value = problem.objective().value(&start);
        let start_feasible = problem.max_violation(&start) <= tol;

        let (x, iterations, converged) = match solve_lp(problem) {
            Ok(x) => {
                let violation = problem.max_violation(&x);
                let value = problem.objective().value(&x);
                debug!("simplex: optimum {value}, violation {violation:.3e}");
                let margin = tol * (1.0 + start_value.abs());
                if start_feasible && (violation > tol || start_value <= value + margin) {
                    (start, 1, true)
                } else {
                    (x, 1, violation <= tol)
                }
            }
            Err(reason) => {
                warn!("simplex: {reason}; returning the start");
                (start, 0, false)
            }
        };

        Minimum {
            value: problem.objective().value(&x),
            max_violation: problem.max_violation(&x),
            x,
            iterations,
            converged,
        }
    }
}

/// Builds and solves the LP; returns the optimal point.
fn solve_lp(problem: &ConstrainedProblem) -> Result<Vec<f64>, String> {
    let n = problem.dimension();
    let objective = problem
        .objective()
        .linear_form()
        .ok_or("objective is not linear")?;

    let mut costs = vec![0.0; n];
    for (k, a) in merged_terms(objective, n)? {
        costs[k] = a;
    }

    let mut lp = Problem::new(OptimizationDirection::Minimize);
    let mut vars: Vec<Variable> = Vec::with_capacity(n);
    for (k, (bound, &cost)) in problem.bounds().iter().zip(&costs).enumerate() {
        let lower = bound.lower.unwrap_or(f64::NEG_INFINITY);
        let upper = bound.upper.unwrap_or(f64::INFINITY);
        if lower > upper {
            return Err(format!("variable {k} has lower bound {lower} above upper bound {upper}"));
        }
        vars.push(lp.add_var(cost, (lower, upper)));
    }

    for (a, constraint) in problem.equalities().iter().enumerate() {
        let linear = constraint
            .linear_form()
            .ok_or_else(|| format!("equality {a} is not linear"))?;
        let terms = merged_terms(linear, n)?;
        if terms.is_empty() {
            if linear.constant() != 0.0 {
                return Err(format!("equality {a} has no terms and cannot hold"));
            }
            continue;
        }
        lp.add_constraint(
            terms.into_iter().map(|(k, coeff)| (vars[k], coeff)),
            ComparisonOp::Eq,
            -linear.constant(),
        );
    }

    let solution = lp.solve().map_err(|e| format!("LP solve failed: {e}"))?;
    Ok(vars.iter().map(|&v| *solution.var_value(v)).collect())
}

/// Terms with repeated indices summed and zero coefficients dropped,
/// ordered by index.
fn merged_terms(f: &LinearFunction, n: usize) -> Result<BTreeMap<usize, f64>, String> {
    let mut merged = BTreeMap::new();
    for &(k, a) in f.terms() {
        if k >= n {
            return Err(format!("term index {k} out of range for {n} variables"));
        }
        *merged.entry(k).or_insert(0.0) += a;
    }
    merged.retain(|_, a| *a != 0.0);
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minimize::{Bound, FnFunction};

    fn sum_equals(indices: &[usize], total: f64) -> LinearFunction {
        indices
            .iter()
            .fold(LinearFunction::new(-total), |f, &k| f.with_term(k, 1.0))
    }

    /// 2×2 transport: supply [10, 10], demand [10, 10], costs [[8,6],[4,9]].
    fn transport_2x2() -> ConstrainedProblem {
        ConstrainedProblem::new(
            LinearFunction::from_dense(&[8.0, 6.0, 4.0, 9.0], 0.0),
            vec![Bound::non_negative(); 4],
        )
        .with_equality(sum_equals(&[0, 1], 10.0))
        .with_equality(sum_equals(&[2, 3], 10.0))
        .with_equality(sum_equals(&[0, 2], 10.0))
        .with_equality(sum_equals(&[1, 3], 10.0))
    }

    #[test]
    fn test_redundant_balance_equation() {
        let minimum = SimplexMinimizer::default().minimize(&transport_2x2(), &[0.0; 4]);
        assert!(minimum.converged);
        assert!((minimum.value - 100.0).abs() < 1e-9, "got {}", minimum.value);
        assert!(minimum.max_violation < 1e-9);
        assert!((minimum.x[1] - 10.0).abs() < 1e-9);
        assert!((minimum.x[2] - 10.0).abs() < 1e-9);
        assert_eq!(minimum.iterations, 1);
    }

    #[test]
    fn test_improves_feasible_start() {
        let start = [10.0, 0.0, 0.0, 10.0];
        let minimum = SimplexMinimizer::default().minimize(&transport_2x2(), &start);
        assert!(minimum.converged);
        assert!(minimum.value < 170.0);
        assert!((minimum.value - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_optimal_start_kept_exactly() {
        let start = [0.0, 10.0, 10.0, 0.0];
        let minimum = SimplexMinimizer::default().minimize(&transport_2x2(), &start);
        assert_eq!(minimum.x, start.to_vec());
        assert_eq!(minimum.value, 100.0);
        assert!(minimum.converged);
    }

    #[test]
    fn test_bounds_and_repeated_terms() {
        // min -x0 - 2·x1  s.t.  x0 + x1 = 1 (written as 0.5·x0 + 0.5·x0 + x1),  0 <= x <= 0.7
        let problem = ConstrainedProblem::new(
            LinearFunction::from_dense(&[-1.0, -2.0], 0.0),
            vec![Bound::new(Some(0.0), Some(0.7)); 2],
        )
        .with_equality(
            LinearFunction::new(-1.0)
                .with_term(0, 0.5)
                .with_term(0, 0.5)
                .with_term(1, 1.0),
        );
        let minimum = SimplexMinimizer::default().minimize(&problem, &[0.5, 0.5]);
        assert!(minimum.converged);
        assert!((minimum.x[0] - 0.3).abs() < 1e-9, "{:?}", minimum.x);
        assert!((minimum.x[1] - 0.7).abs() < 1e-9, "{:?}", minimum.x);
    }

    #[test]
    fn test_fixed_variable() {
        let problem = ConstrainedProblem::new(
            LinearFunction::from_dense(&[1.0, 1.0, -5.0], 0.0),
            vec![Bound::non_negative(), Bound::non_negative(), Bound::fixed(0.0)],
        )
        .with_equality(sum_equals(&[0, 1, 2], 4.0));
        let minimum = SimplexMinimizer::default().minimize(&problem, &[1.0, 1.0, 2.0]);
        assert!(minimum.converged);
        assert_eq!(minimum.x[2], 0.0);
        assert!((minimum.value - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_infeasible_returns_start() {
        // Rows ship 20 in total, columns only receive 10.
        let problem = ConstrainedProblem::new(
            LinearFunction::from_dense(&[1.0, 1.0], 0.0),
            vec![Bound::non_negative(); 2],
        )
        .with_equality(sum_equals(&[0, 1], 20.0))
        .with_equality(sum_equals(&[0, 1], 10.0));
        let minimum = SimplexMinimizer::default().minimize(&problem, &[5.0, 5.0]);
        assert!(!minimum.converged);
        assert_eq!(minimum.x, vec![5.0, 5.0]);
        assert_eq!(minimum.iterations, 0);
    }

    #[test]
    fn test_nonlinear_objective_rejected() {
        let problem = ConstrainedProblem::new(
            FnFunction(|x: &[f64]| x[0] * x[0]),
            vec![Bound::non_negative()],
        );
        let minimum = SimplexMinimizer::default().minimize(&problem, &[3.0]);
        assert!(!minimum.converged);
        assert_eq!(minimum.x, vec![3.0]);
    }

    #[test]
    fn test_merged_terms() {
        let f = LinearFunction::new(0.0)
            .with_term(2, 1.0)
            .with_term(0, 3.0)
            .with_term(2, -1.0);
        let merged = merged_terms(&f, 3).unwrap();
        assert_eq!(merged.into_iter().collect::<Vec<_>>(), vec![(0, 3.0)]);
        assert!(merged_terms(&f, 2).is_err());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimplexConfig::default().with_feasibility_tolerance(-1.0);
        assert!(SimplexMinimizer::new(config).is_err());
    }
}
