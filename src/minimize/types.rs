//! Problem description and solver contract.

/// A scalar function of a real vector.
///
/// Only [`value`](Self::value) is required. The derivative methods default
/// to central finite differences; closed-form functions such as
/// [`LinearFunction`] override them.
pub trait ScalarFunction: Send + Sync {
    /// Evaluates the function at `x`.
    fn value(&self, x: &[f64]) -> f64;

    /// Writes ∇f(x) into `grad` (same length as `x`).
    fn gradient(&self, x: &[f64], grad: &mut [f64]) {
        let step = f64::EPSILON.cbrt();
        let mut probe = x.to_vec();
        for k in 0..x.len() {
            let h = step * x[k].abs().max(1.0);
            probe[k] = x[k] + h;
            let up = self.value(&probe);
            probe[k] = x[k] - h;
            let down = self.value(&probe);
            probe[k] = x[k];
            grad[k] = (up - down) / (2.0 * h);
        }
    }

    /// Writes the diagonal of ∇²f(x) into `diag`.
    fn hessian_diagonal(&self, x: &[f64], diag: &mut [f64]) {
        let step = f64::EPSILON.sqrt().sqrt();
        let center = self.value(x);
        let mut probe = x.to_vec();
        for k in 0..x.len() {
            let h = step * x[k].abs().max(1.0);
            probe[k] = x[k] + h;
            let up = self.value(&probe);
            probe[k] = x[k] - h;
            let down = self.value(&probe);
            probe[k] = x[k];
            diag[k] = (up - 2.0 * center + down) / (h * h);
        }
    }

    /// This function as a [`LinearFunction`], when it is one.
    ///
    /// Linear-programming backends such as
    /// [`SimplexMinimizer`](super::SimplexMinimizer) read coefficients
    /// through this.
    fn linear_form(&self) -> Option<&LinearFunction> {
        None
    }
}

/// `constant + Σ coefficient·x[index]`, stored sparsely.
///
/// # Examples
///
/// ```
/// use u_transport::minimize::{LinearFunction, ScalarFunction};
///
/// // x0 + x2 - 5
/// let f = LinearFunction::new(-5.0).with_term(0, 1.0).with_term(2, 1.0);
/// assert_eq!(f.value(&[2.0, 9.0, 3.0]), 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinearFunction {
    terms: Vec<(usize, f64)>,
    constant: f64,
}

impl LinearFunction {
    pub fn new(constant: f64) -> Self {
        Self {
            terms: Vec::new(),
            constant,
        }
    }

    /// Dense coefficients, one per variable.
    pub fn from_dense(coefficients: &[f64], constant: f64) -> Self {
        Self {
            terms: coefficients.iter().copied().enumerate().collect(),
            constant,
        }
    }

    /// Adds `coefficient·x[index]`.
    pub fn with_term(mut self, index: usize, coefficient: f64) -> Self {
        self.terms.push((index, coefficient));
        self
    }

    pub fn terms(&self) -> &[(usize, f64)] {
        &self.terms
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }
}

impl ScalarFunction for LinearFunction {
    fn value(&self, x: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|&(k, a)| a * x[k])
            .sum::<f64>()
            + self.constant
    }

    fn gradient(&self, _x: &[f64], grad: &mut [f64]) {
        grad.fill(0.0);
        for &(k, a) in &self.terms {
            grad[k] += a;
        }
    }

    fn hessian_diagonal(&self, _x: &[f64], diag: &mut [f64]) {
        diag.fill(0.0);
    }

    fn linear_form(&self) -> Option<&LinearFunction> {
        Some(self)
    }
}

/// Adapts a closure to [`ScalarFunction`] with finite-difference
/// derivatives.
pub struct FnFunction<F>(pub F);

impl<F> ScalarFunction for FnFunction<F>
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    fn value(&self, x: &[f64]) -> f64 {
        (self.0)(x)
    }
}

/// Box bounds for one variable. `None` means unbounded on that side.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bound {
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

impl Bound {
    pub fn new(lower: Option<f64>, upper: Option<f64>) -> Self {
        Self { lower, upper }
    }

    /// No bounds at all.
    pub fn free() -> Self {
        Self::default()
    }

    /// `x >= 0`.
    pub fn non_negative() -> Self {
        Self::new(Some(0.0), None)
    }

    /// `x == value`.
    pub fn fixed(value: f64) -> Self {
        Self::new(Some(value), Some(value))
    }

    /// Whether the lower and upper bounds coincide.
    pub fn is_fixed(&self) -> bool {
        matches!((self.lower, self.upper), (Some(lo), Some(hi)) if lo >= hi)
    }

    /// How far `x` lies outside the bounds (0 when inside).
    pub fn violation(&self, x: f64) -> f64 {
        let below = self.lower.map_or(0.0, |lo| (lo - x).max(0.0));
        let above = self.upper.map_or(0.0, |hi| (x - hi).max(0.0));
        below.max(above)
    }
}

/// Minimize `objective(x)` subject to `equalities[k](x) == 0` and box
/// bounds on every variable.
///
/// The number of variables is the number of bounds.
pub struct ConstrainedProblem {
    objective: Box<dyn ScalarFunction>,
    equalities: Vec<Box<dyn ScalarFunction>>,
    bounds: Vec<Bound>,
}

impl ConstrainedProblem {
    pub fn new(objective: impl ScalarFunction + 'static, bounds: Vec<Bound>) -> Self {
        Self {
            objective: Box::new(objective),
            equalities: Vec::new(),
            bounds,
        }
    }

    /// Adds the constraint `constraint(x) == 0`.
    pub fn with_equality(mut self, constraint: impl ScalarFunction + 'static) -> Self {
        self.equalities.push(Box::new(constraint));
        self
    }

    /// Number of variables.
    pub fn dimension(&self) -> usize {
        self.bounds.len()
    }

    pub fn objective(&self) -> &dyn ScalarFunction {
        self.objective.as_ref()
    }

    pub fn equalities(&self) -> &[Box<dyn ScalarFunction>] {
        &self.equalities
    }

    pub fn bounds(&self) -> &[Bound] {
        &self.bounds
    }

    /// Largest absolute equality residual or bound violation at `x`.
    pub fn max_violation(&self, x: &[f64]) -> f64 {
        let equality = self
            .equalities
            .iter()
            .map(|c| c.value(x).abs())
            .fold(0.0, f64::max);
        let bounds = self
            .bounds
            .iter()
            .zip(x)
            .map(|(b, &v)| b.violation(v))
            .fold(0.0, f64::max);
        equality.max(bounds)
    }
}

/// Outcome of a constrained minimization.
#[derive(Debug, Clone, PartialEq)]
pub struct Minimum {
    /// Best point found.
    pub x: Vec<f64>,
    /// Objective value at `x`.
    pub value: f64,
    /// Number of solver iterations performed.
    pub iterations: usize,
    /// Whether the solver met its optimality and feasibility tolerances.
    pub converged: bool,
    /// [`ConstrainedProblem::max_violation`] at `x`.
    pub max_violation: f64,
}

/// A local minimizer for equality-constrained, box-bounded problems.
///
/// Implementations always return a point, even when they fail to converge;
/// in that case [`Minimum::converged`] is `false` and the point is the best
/// iterate available.
pub trait ConstrainedMinimizer: Send + Sync {
    /// Minimizes `problem` starting from `start`.
    ///
    /// `start` should have [`ConstrainedProblem::dimension`] entries.
    fn minimize(&self, problem: &ConstrainedProblem, start: &[f64]) -> Minimum;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_function() {
        let f = LinearFunction::from_dense(&[1.0, -2.0, 0.5], 3.0);
        assert!((f.value(&[1.0, 1.0, 2.0]) - 3.0).abs() < 1e-12);

        let mut g = vec![9.0; 3];
        f.gradient(&[0.0; 3], &mut g);
        assert_eq!(g, vec![1.0, -2.0, 0.5]);

        let mut h = vec![9.0; 3];
        f.hessian_diagonal(&[0.0; 3], &mut h);
        assert_eq!(h, vec![0.0; 3]);
    }

    #[test]
    fn test_repeated_terms_accumulate() {
        let f = LinearFunction::new(0.0).with_term(1, 2.0).with_term(1, 3.0);
        let mut g = vec![0.0; 2];
        f.gradient(&[0.0, 0.0], &mut g);
        assert_eq!(g, vec![0.0, 5.0]);
        assert_eq!(f.terms().len(), 2);
        assert_eq!(f.constant(), 0.0);
    }

    #[test]
    fn test_linear_form() {
        let f = LinearFunction::new(1.0).with_term(0, 2.0);
        assert_eq!(f.linear_form(), Some(&f));
        assert!(FnFunction(|x: &[f64]| x[0]).linear_form().is_none());
    }

    #[test]
    fn test_finite_difference_derivatives() {
        let f = FnFunction(|x: &[f64]| x[0] * x[0] + 3.0 * x[0] * x[1]);
        let mut g = vec![0.0; 2];
        f.gradient(&[2.0, -1.0], &mut g);
        assert!((g[0] - 1.0).abs() < 1e-6, "got {}", g[0]);
        assert!((g[1] - 6.0).abs() < 1e-6, "got {}", g[1]);

        let mut h = vec![0.0; 2];
        f.hessian_diagonal(&[2.0, -1.0], &mut h);
        assert!((h[0] - 2.0).abs() < 1e-3, "got {}", h[0]);
        assert!(h[1].abs() < 1e-3, "got {}", h[1]);
    }

    #[test]
    fn test_bounds() {
        assert!(Bound::fixed(2.0).is_fixed());
        assert!(!Bound::non_negative().is_fixed());
        assert!(!Bound::free().is_fixed());
        assert_eq!(Bound::non_negative().violation(-0.5), 0.5);
        assert_eq!(Bound::new(None, Some(1.0)).violation(3.0), 2.0);
        assert_eq!(Bound::free().violation(-1e9), 0.0);
    }

    #[test]
    fn test_problem_violation() {
        let problem = ConstrainedProblem::new(
            LinearFunction::from_dense(&[1.0, 1.0], 0.0),
            vec![Bound::non_negative(); 2],
        )
        .with_equality(LinearFunction::new(-1.0).with_term(0, 1.0).with_term(1, 1.0));
        assert_eq!(problem.dimension(), 2);
        assert_eq!(problem.equalities().len(), 1);
        assert!(problem.max_violation(&[0.25, 0.75]) < 1e-15);
        assert!((problem.max_violation(&[1.0, 1.0]) - 1.0).abs() < 1e-15);
        assert!((problem.max_violation(&[1.5, -0.5]) - 0.5).abs() < 1e-15);
        assert_eq!(problem.objective().value(&[2.0, 3.0]), 5.0);
    }
}
