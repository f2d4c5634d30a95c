//! Minimizer configuration.

/// Parameters of the [`BarrierMinimizer`](super::BarrierMinimizer).
///
/// # Examples
///
/// ```
/// use u_transport::minimize::BarrierConfig;
///
/// let config = BarrierConfig::default()
///     .with_max_iterations(500)
///     .with_gap_tolerance(1e-8);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct BarrierConfig {
    /// Hard cap on Newton steps across all barrier rounds.
    pub max_iterations: usize,

    /// Newton steps allowed per barrier weight before moving on.
    pub max_newton_steps: usize,

    /// Objective weight `t` of the first round.
    pub initial_weight: f64,

    /// Factor applied to `t` after each round (> 1).
    pub weight_growth: f64,

    /// Stop once `barrier_terms / t <= gap_tolerance * (1 + |f(x)|)`.
    pub gap_tolerance: f64,

    /// Centering stops when half the squared Newton decrement drops below this.
    pub newton_tolerance: f64,

    /// Largest equality residual or bound violation accepted as feasible.
    pub feasibility_tolerance: f64,

    /// Distance (relative to the start's magnitude) by which a starting
    /// point on a bound is pushed inside.
    pub interior_margin: f64,

    /// Fraction of the distance to the nearest bound a step may cover.
    pub boundary_fraction: f64,

    /// Sufficient-decrease constant of the backtracking line search.
    pub armijo: f64,

    /// Step shrink factor of the backtracking line search.
    pub backtrack: f64,
}

impl Default for BarrierConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            max_newton_steps: 50,
            initial_weight: 1.0,
            weight_growth: 10.0,
            gap_tolerance: 1e-10,
            newton_tolerance: 1e-10,
            feasibility_tolerance: 1e-8,
            interior_margin: 1e-3,
            boundary_fraction: 0.99,
            armijo: 1e-4,
            backtrack: 0.5,
        }
    }
}

impl BarrierConfig {
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_max_newton_steps(mut self, n: usize) -> Self {
        self.max_newton_steps = n;
        self
    }

    pub fn with_initial_weight(mut self, t: f64) -> Self {
        self.initial_weight = t;
        self
    }

    pub fn with_weight_growth(mut self, mu: f64) -> Self {
        self.weight_growth = mu;
        self
    }

    pub fn with_gap_tolerance(mut self, tol: f64) -> Self {
        self.gap_tolerance = tol;
        self
    }

    pub fn with_newton_tolerance(mut self, tol: f64) -> Self {
        self.newton_tolerance = tol;
        self
    }

    pub fn with_feasibility_tolerance(mut self, tol: f64) -> Self {
        self.feasibility_tolerance = tol;
        self
    }

    pub fn with_interior_margin(mut self, margin: f64) -> Self {
        self.interior_margin = margin;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_iterations == 0 {
            return Err("max_iterations must be positive".into());
        }
        if self.max_newton_steps == 0 {
            return Err("max_newton_steps must be positive".into());
        }
        if !(self.initial_weight > 0.0) {
            return Err(format!(
                "initial_weight must be positive, got {}",
                self.initial_weight
            ));
        }
        if !(self.weight_growth > 1.0) {
            return Err(format!(
                "weight_growth must be greater than 1, got {}",
                self.weight_growth
            ));
        }
        for (name, value) in [
            ("gap_tolerance", self.gap_tolerance),
            ("newton_tolerance", self.newton_tolerance),
            ("feasibility_tolerance", self.feasibility_tolerance),
            ("interior_margin", self.interior_margin),
        ] {
            if !(value > 0.0) {
                return Err(format!("{name} must be positive, got {value}"));
            }
        }
        if !(self.boundary_fraction > 0.0 && self.boundary_fraction < 1.0) {
            return Err(format!(
                "boundary_fraction must be in (0, 1), got {}",
                self.boundary_fraction
            ));
        }
        if !(self.armijo > 0.0 && self.armijo < 0.5) {
            return Err(format!("armijo must be in (0, 0.5), got {}", self.armijo));
        }
        if !(self.backtrack > 0.0 && self.backtrack < 1.0) {
            return Err(format!(
                "backtrack must be in (0, 1), got {}",
                self.backtrack
            ));
        }
        Ok(())
    }
}

/// Parameters of the [`SimplexMinimizer`](super::SimplexMinimizer).
///
/// # Examples
///
/// ```
/// use u_transport::minimize::SimplexConfig;
///
/// let config = SimplexConfig::default().with_feasibility_tolerance(1e-6);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SimplexConfig {
    /// Largest equality residual or bound violation accepted as feasible,
    /// both for the LP answer and for keeping the starting point.
    pub feasibility_tolerance: f64,
}

impl Default for SimplexConfig {
    fn default() -> Self {
        Self {
            feasibility_tolerance: 1e-8,
        }
    }
}

impl SimplexConfig {
    pub fn with_feasibility_tolerance(mut self, tol: f64) -> Self {
        self.feasibility_tolerance = tol;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.feasibility_tolerance > 0.0) || !self.feasibility_tolerance.is_finite() {
            return Err(format!(
                "feasibility_tolerance must be finite and positive, got {}",
                self.feasibility_tolerance
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BarrierConfig::default();
        assert_eq!(config.max_iterations, 1000);
        assert!((config.weight_growth - 10.0).abs() < 1e-12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_iterations() {
        assert!(BarrierConfig::default()
            .with_max_iterations(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_growth() {
        let err = BarrierConfig::default()
            .with_weight_growth(1.0)
            .validate()
            .unwrap_err();
        assert!(err.contains("weight_growth"));
    }

    #[test]
    fn test_validate_nan_tolerance() {
        let err = BarrierConfig::default()
            .with_gap_tolerance(f64::NAN)
            .validate()
            .unwrap_err();
        assert!(err.contains("gap_tolerance"));
    }

    #[test]
    fn test_validate_line_search() {
        let mut config = BarrierConfig::default();
        config.armijo = 0.7;
        assert!(config.validate().is_err());

        let mut config = BarrierConfig::default();
        config.backtrack = 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_simplex_config() {
        assert!(SimplexConfig::default().validate().is_ok());
        let err = SimplexConfig::default()
            .with_feasibility_tolerance(0.0)
            .validate()
            .unwrap_err();
        assert!(err.contains("feasibility_tolerance"));
        assert!(SimplexConfig::default()
            .with_feasibility_tolerance(f64::NAN)
            .validate()
            .is_err());
    }
}
