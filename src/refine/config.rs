//! Refinement configuration.

/// Configuration for [`Refiner`](super::Refiner).
///
/// # Examples
///
/// ```
/// use u_transport::refine::RefineConfig;
///
/// let config = RefineConfig::default().with_zero_tolerance(1e-8);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct RefineConfig {
    /// Refined quantities with absolute value below this are snapped to 0.
    pub zero_tolerance: f64,
}

impl Default for RefineConfig {
    fn default() -> Self {
        Self {
            zero_tolerance: 1e-10,
        }
    }
}

impl RefineConfig {
    pub fn with_zero_tolerance(mut self, tol: f64) -> Self {
        self.zero_tolerance = tol;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.zero_tolerance >= 0.0) || !self.zero_tolerance.is_finite() {
            return Err(format!(
                "zero_tolerance must be finite and non-negative, got {}",
                self.zero_tolerance
            ));
        }
        Ok(())
    }
}
