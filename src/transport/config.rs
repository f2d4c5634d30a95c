//! Orchestrator configuration.

use crate::minimize::SimplexConfig;
use crate::refine::RefineConfig;

/// Configuration for [`TransportOptimizer`](super::TransportOptimizer).
///
/// # Examples
///
/// ```
/// use u_transport::minimize::SimplexConfig;
/// use u_transport::transport::OptimizerConfig;
///
/// let config = OptimizerConfig::default()
///     .with_require_balanced(false)
///     .with_simplex(SimplexConfig::default().with_feasibility_tolerance(1e-6));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    /// Reject problems whose supply and demand totals differ.
    pub require_balanced: bool,

    /// Relative tolerance for the balance check, scaled by
    /// `max(1, Σsupply, Σdemand)`.
    pub balance_tolerance: f64,

    /// Refinement settings.
    pub refine: RefineConfig,

    /// Settings of the default simplex minimizer.
    ///
    /// Ignored when a custom minimizer is injected.
    pub simplex: SimplexConfig,

    /// Solve batches in parallel using rayon (requires the `parallel` feature).
    pub parallel: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            require_balanced: true,
            balance_tolerance: 1e-9,
            refine: RefineConfig::default(),
            simplex: SimplexConfig::default(),
            parallel: true,
        }
    }
}

impl OptimizerConfig {
    pub fn with_require_balanced(mut self, require: bool) -> Self {
        self.require_balanced = require;
        self
    }

    pub fn with_balance_tolerance(mut self, tol: f64) -> Self {
        self.balance_tolerance = tol;
        self
    }

    pub fn with_refine(mut self, refine: RefineConfig) -> Self {
        self.refine = refine;
        self
    }

    pub fn with_simplex(mut self, simplex: SimplexConfig) -> Self {
        self.simplex = simplex;
        self
    }

    /// Enables or disables parallel batch solving.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates this configuration and the nested engine configurations.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.balance_tolerance >= 0.0) || !self.balance_tolerance.is_finite() {
            return Err(format!(
                "balance_tolerance must be finite and non-negative, got {}",
                self.balance_tolerance
            ));
        }
        self.refine.validate()?;
        self.simplex.validate()?;
        Ok(())
    }
}
