//! Builder trait and heuristic selector.

use std::fmt;
use std::str::FromStr;

use super::min_cost::MinimumCost;
use super::northwest::NorthwestCorner;
use super::vogel::Vogel;
use crate::problem::{Allocation, TransportProblem, TransportError};

/// Constructs an initial shipment plan for a transportation problem.
///
/// Implementations must not mutate the problem; any working copies of
/// supply and demand live only for the duration of [`build`](Self::build).
/// For balanced problems the returned plan must satisfy every row and
/// column total.
///
/// # Examples
///
/// ```
/// use u_transport::ibfs::{IbfsBuilder, NorthwestCorner};
/// use u_transport::problem::TransportProblem;
///
/// let problem = TransportProblem::new(
///     vec![vec![4.0, 6.0], vec![5.0, 3.0]],
///     vec![20.0, 30.0],
///     vec![25.0, 25.0],
/// )
/// .unwrap();
/// let plan = NorthwestCorner.build(&problem);
/// assert_eq!(plan.to_rows(), vec![vec![20.0, 0.0], vec![5.0, 25.0]]);
/// ```
pub trait IbfsBuilder: Send + Sync {
    /// Identifier of this heuristic.
    fn name(&self) -> &str;

    /// Builds a plan for `problem`.
    fn build(&self, problem: &TransportProblem) -> Allocation;
}

/// The built-in starting heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Heuristic {
    /// Fill the top-left remaining cell.
    NorthwestCorner,
    /// Fill the globally cheapest feasible cell.
    #[default]
    MinimumCost,
    /// Vogel's Approximation Method (penalty driven).
    Vogel,
}

impl Heuristic {
    /// All heuristics, in declaration order.
    pub const ALL: [Heuristic; 3] = [
        Heuristic::NorthwestCorner,
        Heuristic::MinimumCost,
        Heuristic::Vogel,
    ];

    /// Wire identifier (`northwest_corner`, `minimum_cost`, `vogel`).
    pub fn name(self) -> &'static str {
        match self {
            Heuristic::NorthwestCorner => "northwest_corner",
            Heuristic::MinimumCost => "minimum_cost",
            Heuristic::Vogel => "vogel",
        }
    }

    /// The builder implementing this heuristic.
    pub fn builder(self) -> &'static dyn IbfsBuilder {
        match self {
            Heuristic::NorthwestCorner => &NorthwestCorner,
            Heuristic::MinimumCost => &MinimumCost,
            Heuristic::Vogel => &Vogel,
        }
    }

    /// Builds the initial plan with this heuristic.
    pub fn build(self, problem: &TransportProblem) -> Allocation {
        self.builder().build(problem)
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Heuristic {
    type Err = TransportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Heuristic::ALL
            .into_iter()
            .find(|h| h.name() == s)
            .ok_or_else(|| TransportError::UnknownMethod(s.to_string()))
    }
}
