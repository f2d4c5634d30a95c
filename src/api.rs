//! Request/response boundary for JSON hosts.
//!
//! ```json
//! { "costs": [[4, 6], [5, 3]], "supply": [20, 30], "demand": [25, 25], "method": "vogel" }
//! ```
//!
//! yields
//!
//! ```json
//! { "solution": [[20, 0], [5, 25]], "total_cost": 180 }
//! ```
//!
//! `method` may be omitted, in which case `minimum_cost` is used.

use serde::{Deserialize, Serialize};

use crate::ibfs::Heuristic;
use crate::minimize::ConstrainedMinimizer;
use crate::problem::{TransportError, TransportProblem};
use crate::transport::TransportOptimizer;

/// Optimization request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeRequest {
    /// m×n unit costs.
    pub costs: Vec<Vec<f64>>,
    /// Supply per origin (length m).
    pub supply: Vec<f64>,
    /// Demand per destination (length n).
    pub demand: Vec<f64>,
    /// Heuristic identifier; `None` selects the default heuristic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

impl OptimizeRequest {
    /// Heuristic named by `method`.
    pub fn heuristic(&self) -> Result<Heuristic, TransportError> {
        match &self.method {
            Some(name) => name.parse(),
            None => Ok(Heuristic::default()),
        }
    }

    /// Validated problem built from this request.
    pub fn problem(&self) -> Result<TransportProblem, TransportError> {
        TransportProblem::new(self.costs.clone(), self.supply.clone(), self.demand.clone())
    }
}

/// Optimization response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeResponse {
    /// Refined m×n plan.
    pub solution: Vec<Vec<f64>>,
    /// Objective value of the refined plan.
    pub total_cost: f64,
}

/// Answers `request` with the default optimizer.
pub fn optimize(request: &OptimizeRequest) -> Result<OptimizeResponse, TransportError> {
    optimize_with(&TransportOptimizer::default(), request)
}

/// Answers `request` with a caller-supplied optimizer.
pub fn optimize_with<M: ConstrainedMinimizer>(
    optimizer: &TransportOptimizer<M>,
    request: &OptimizeRequest,
) -> Result<OptimizeResponse, TransportError> {
    let heuristic = request.heuristic()?;
    let problem = request.problem()?;
    let solution = optimizer.solve(&problem, heuristic)?;
    Ok(OptimizeResponse {
        solution: solution.to_rows(),
        total_cost: solution.total_cost,
    })
}
