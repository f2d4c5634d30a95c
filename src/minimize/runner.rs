//! Primal log-barrier execution loop.
//!
//! # Algorithm
//!
//! 1. Push the starting point strictly inside its bounds
//! 2. For a barrier weight `t`, minimize `t·f(x) − Σ log(distance to bound)`
//!    subject to the equality constraints with Newton's method:
//!    a. linearise the constraints through their gradients
//!    b. use `t·diag(∇²f) + ∇²barrier` as the metric
//!    c. solve the KKT system through its Schur complement
//!    d. stay a fixed fraction away from the bounds and backtrack
//!       (Armijo) once the iterate is feasible
//! 3. Multiply `t` and repeat until the duality-gap bound is small
//!
//! Equality residuals are part of every Newton step, so an infeasible
//! start is driven onto the constraints within a few steps (in one full
//! step for linear constraints).
//!
//! # Reference
//!
//! Boyd & Vandenberghe (2004), *Convex Optimization*, §10.3 and §11.3.

use log::{debug, trace};
use nalgebra::{DMatrix, DVector};

use super::config::BarrierConfig;
use super::linalg::SemidefiniteSolver;
use super::types::{Bound, ConstrainedMinimizer, ConstrainedProblem, Minimum};

/// Steps shorter than this end the current centering round.
const MIN_STEP: f64 = 1e-12;

/// [`ConstrainedMinimizer`] for smooth problems: a primal log-barrier method.
///
/// Deterministic for a given problem and start. Among all feasible points
/// it visits (the start included) it returns the one with the lowest
/// objective, so a feasible start is never made worse.
///
/// # Examples
///
/// ```
/// use u_transport::minimize::{
///     BarrierMinimizer, Bound, ConstrainedMinimizer, ConstrainedProblem, LinearFunction,
/// };
///
/// // min x0 + 2·x1  s.t.  x0 + x1 = 1,  x >= 0
/// let problem = ConstrainedProblem::new(
///     LinearFunction::from_dense(&[1.0, 2.0], 0.0),
///     vec![Bound::non_negative(); 2],
/// )
/// .with_equality(LinearFunction::new(-1.0).with_term(0, 1.0).with_term(1, 1.0));
///
/// let minimum = BarrierMinimizer::default().minimize(&problem, &[0.5, 0.5]);
/// assert!(minimum.converged);
/// assert!((minimum.value - 1.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BarrierMinimizer {
    config: BarrierConfig,
}

/// One Newton direction and its diagnostics.
struct NewtonStep {
    direction: Vec<f64>,
    /// `dxᵀ·H·dx` in the barrier metric.
    decrement: f64,
    /// Directional derivative of the merit function along `direction`.
    slope: f64,
}

impl BarrierMinimizer {
    /// Creates a minimizer after validating `config`.
    pub fn new(config: BarrierConfig) -> Result<Self, String> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BarrierConfig {
        &self.config
    }
}

impl ConstrainedMinimizer for BarrierMinimizer {
    fn minimize(&self, problem: &ConstrainedProblem, start: &[f64]) -> Minimum {
        let cfg = &self.config;
        let n = problem.dimension();
        let bounds = problem.bounds();
        let start: Vec<f64> = (0..n).map(|k| start.get(k).copied().unwrap_or(0.0)).collect();

        let start_feasible = problem.max_violation(&start) <= cfg.feasibility_tolerance;
        let mut best = Incumbent::default();

        let mut x = interior_point(&start, bounds, cfg.interior_margin);
        let barrier_terms: usize = bounds
            .iter()
            .filter(|b| !b.is_fixed())
            .map(|b| usize::from(b.lower.is_some()) + usize::from(b.upper.is_some()))
            .sum();

        let mut t = cfg.initial_weight;
        let mut iterations = 0usize;
        let mut converged = false;

        'rounds: loop {
            for _ in 0..cfg.max_newton_steps {
                if iterations >= cfg.max_iterations {
                    break 'rounds;
                }
                let residual = problem.max_violation(&x);
                let feasible = residual <= cfg.feasibility_tolerance;
                let step = newton_step(problem, &x, t);
                if feasible && step.decrement / 2.0 <= cfg.newton_tolerance {
                    break;
                }

                let mut s =
                    max_step(&x, &step.direction, bounds, cfg.boundary_fraction).min(1.0);
                if feasible {
                    let current = merit(problem, &x, t);
                    let slack = 10.0 * f64::EPSILON * (1.0 + current.abs());
                    loop {
                        let trial = advance(&x, &step.direction, s);
                        let value = merit(problem, &trial, t);
                        if value.is_finite()
                            && value <= current + cfg.armijo * s * step.slope + slack
                        {
                            break;
                        }
                        s *= cfg.backtrack;
                        if s < MIN_STEP {
                            break;
                        }
                    }
                    if s < MIN_STEP {
                        trace!("barrier: line search stalled at weight {t:.3e}");
                        break;
                    }
                }

                x = advance(&x, &step.direction, s);
                iterations += 1;
                trace!(
                    "barrier: step {iterations}, length {s:.3e}, decrement {:.3e}, residual {residual:.3e}",
                    step.decrement
                );
                best.offer(problem, &x, cfg.feasibility_tolerance);
            }

            let value = problem.objective().value(&x);
            let violation = problem.max_violation(&x);
            debug!(
                "barrier: weight {t:.3e}, objective {value}, violation {violation:.3e}, iterations {iterations}"
            );
            let gap = barrier_terms as f64 / t;
            if barrier_terms == 0 || gap <= cfg.gap_tolerance * (1.0 + value.abs()) {
                converged = violation <= cfg.feasibility_tolerance;
                break;
            }
            t *= cfg.weight_growth;
        }

        let mut x = best.point.unwrap_or(x);
        if start_feasible {
            // An improvement below the feasibility tolerance may come from
            // constraint slack alone; keep the exact start instead.
            let start_value = problem.objective().value(&start);
            let margin = cfg.feasibility_tolerance * (1.0 + start_value.abs());
            let value = problem.objective().value(&x);
            if problem.max_violation(&x) > cfg.feasibility_tolerance
                || start_value <= value + margin
            {
                x = start;
            }
        }

        Minimum {
            value: problem.objective().value(&x),
            max_violation: problem.max_violation(&x),
            x,
            iterations,
            converged,
        }
    }
}

/// Lowest-objective feasible point seen so far.
#[derive(Default)]
struct Incumbent {
    point: Option<Vec<f64>>,
    value: f64,
}

impl Incumbent {
    fn offer(&mut self, problem: &ConstrainedProblem, x: &[f64], tolerance: f64) {
        if problem.max_violation(x) > tolerance {
            return;
        }
        let value = problem.objective().value(x);
        if self.point.is_none() || value < self.value {
            self.point = Some(x.to_vec());
            self.value = value;
        }
    }
}

/// Moves every free coordinate of `start` strictly inside its bounds.
fn interior_point(start: &[f64], bounds: &[Bound], margin: f64) -> Vec<f64> {
    let scale = start.iter().fold(1.0f64, |m, v| m.max(v.abs()));
    let delta = margin * scale;
    start
        .iter()
        .zip(bounds)
        .map(|(&v, b)| match (b.lower, b.upper) {
            _ if b.is_fixed() => b.lower.unwrap_or(v),
            (Some(lo), Some(hi)) if hi - lo <= 2.0 * delta => 0.5 * (lo + hi),
            (Some(lo), Some(hi)) => v.clamp(lo + delta, hi - delta),
            (Some(lo), None) => v.max(lo + delta),
            (None, Some(hi)) => v.min(hi - delta),
            (None, None) => v,
        })
        .collect()
}

/// `t·f(x) + barrier(x)`; infinite outside the open box.
fn merit(problem: &ConstrainedProblem, x: &[f64], t: f64) -> f64 {
    let mut barrier = 0.0;
    for (&v, b) in x.iter().zip(problem.bounds()) {
        if b.is_fixed() {
            continue;
        }
        if let Some(lo) = b.lower {
            if v <= lo {
                return f64::INFINITY;
            }
            barrier -= (v - lo).ln();
        }
        if let Some(hi) = b.upper {
            if v >= hi {
                return f64::INFINITY;
            }
            barrier -= (hi - v).ln();
        }
    }
    t * problem.objective().value(x) + barrier
}

/// Newton direction for the barrier subproblem at weight `t`.
///
/// With metric `H` (diagonal), constraint Jacobian `A` and residual `r`,
/// solves `H·dx + Aᵀ·w = −g`, `A·dx = −r` via `(A H⁻¹ Aᵀ) w = r − A H⁻¹ g`.
/// Fixed variables keep `dx = 0`.
fn newton_step(problem: &ConstrainedProblem, x: &[f64], t: f64) -> NewtonStep {
    let n = x.len();
    let bounds = problem.bounds();
    let free: Vec<bool> = bounds.iter().map(|b| !b.is_fixed()).collect();

    let mut gradient = vec![0.0; n];
    problem.objective().gradient(x, &mut gradient);
    let mut curvature = vec![0.0; n];
    problem.objective().hessian_diagonal(x, &mut curvature);

    let mut g = vec![0.0; n];
    let mut h = vec![1.0; n];
    for k in (0..n).filter(|&k| free[k]) {
        let b = &bounds[k];
        let mut grad = t * gradient[k];
        let mut hess = t * curvature[k].max(0.0);
        if let Some(lo) = b.lower {
            let d = x[k] - lo;
            grad -= 1.0 / d;
            hess += 1.0 / (d * d);
        }
        if let Some(hi) = b.upper {
            let d = hi - x[k];
            grad += 1.0 / d;
            hess += 1.0 / (d * d);
        }
        g[k] = grad;
        // Unbounded coordinates with no curvature fall back to a unit metric.
        h[k] = if hess > 0.0 { hess } else { 1.0 };
    }

    let jacobian = SparseJacobian::at(problem, x, &free);
    let residual = DVector::from_iterator(
        jacobian.rows(),
        problem.equalities().iter().map(|c| c.value(x)),
    );

    let mut schur = DMatrix::<f64>::zeros(jacobian.rows(), jacobian.rows());
    for (k, column) in jacobian.columns.iter().enumerate() {
        for &(a, va) in column {
            for &(b, vb) in column {
                schur[(a, b)] += va * vb / h[k];
            }
        }
    }
    let solver = SemidefiniteSolver::new(&schur);

    let scaled_gradient: Vec<f64> = g.iter().zip(&h).map(|(gk, hk)| gk / hk).collect();
    let w = solver.solve(&(&residual - jacobian.apply(&scaled_gradient)));

    let mut direction = vec![0.0; n];
    for k in (0..n).filter(|&k| free[k]) {
        direction[k] = -(g[k] + jacobian.transpose_apply(k, &w)) / h[k];
    }

    // One round of iterative refinement on A·dx = −r. For large t the
    // right-hand side above cancels terms of size t·f, and the resulting
    // error lies entirely in range(H⁻¹Aᵀ), which this projection removes.
    let error = &residual + jacobian.apply(&direction);
    let z = solver.solve(&error);
    for k in (0..n).filter(|&k| free[k]) {
        direction[k] -= jacobian.transpose_apply(k, &z) / h[k];
    }

    let mut decrement = 0.0;
    let mut slope = 0.0;
    for k in (0..n).filter(|&k| free[k]) {
        decrement += h[k] * direction[k] * direction[k];
        slope += g[k] * direction[k];
    }

    NewtonStep {
        direction,
        decrement,
        slope,
    }
}

/// Equality-constraint Jacobian restricted to free variables, stored by
/// row and by column. Each transportation equality touches only one row
/// or column of the plan, so both views stay short.
struct SparseJacobian {
    rows: Vec<Vec<(usize, f64)>>,
    columns: Vec<Vec<(usize, f64)>>,
}

impl SparseJacobian {
    fn at(problem: &ConstrainedProblem, x: &[f64], free: &[bool]) -> Self {
        let n = x.len();
        let mut dense = vec![0.0; n];
        let mut rows = Vec::with_capacity(problem.equalities().len());
        let mut columns = vec![Vec::new(); n];
        for (a, constraint) in problem.equalities().iter().enumerate() {
            constraint.gradient(x, &mut dense);
            let row: Vec<(usize, f64)> = dense
                .iter()
                .enumerate()
                .filter(|&(k, &v)| free[k] && v != 0.0)
                .map(|(k, &v)| (k, v))
                .collect();
            for &(k, v) in &row {
                columns[k].push((a, v));
            }
            rows.push(row);
        }
        Self { rows, columns }
    }

    fn rows(&self) -> usize {
        self.rows.len()
    }

    /// `A·v`.
    fn apply(&self, v: &[f64]) -> DVector<f64> {
        DVector::from_iterator(
            self.rows.len(),
            self.rows
                .iter()
                .map(|row| row.iter().map(|&(k, a)| a * v[k]).sum::<f64>()),
        )
    }

    /// `(Aᵀ·w)[k]`.
    fn transpose_apply(&self, k: usize, w: &DVector<f64>) -> f64 {
        self.columns[k].iter().map(|&(a, v)| v * w[a]).sum()
    }
}

/// Largest step along `direction` that keeps `boundary_fraction` of the
/// distance to every finite bound.
fn max_step(x: &[f64], direction: &[f64], bounds: &[Bound], boundary_fraction: f64) -> f64 {
    let mut step = f64::INFINITY;
    for ((&v, &d), b) in x.iter().zip(direction).zip(bounds) {
        if b.is_fixed() {
            continue;
        }
        if d < 0.0 {
            if let Some(lo) = b.lower {
                step = step.min(boundary_fraction * (v - lo) / -d);
            }
        } else if d > 0.0 {
            if let Some(hi) = b.upper {
                step = step.min(boundary_fraction * (hi - v) / d);
            }
        }
    }
    step
}

fn advance(x: &[f64], direction: &[f64], s: f64) -> Vec<f64> {
    x.iter().zip(direction).map(|(v, d)| v + s * d).collect()
}
