//! Minimum Cost (least cost) method.

use log::trace;

use super::types::IbfsBuilder;
use crate::problem::{Allocation, TransportProblem};

/// Repeatedly fills the cheapest cell whose origin still has supply and
/// whose destination still has demand.
///
/// Cells are scanned row-major; among equal costs the first cell found
/// wins (lowest row, then lowest column). Every step exhausts at least one
/// origin or destination, so the loop runs at most `m + n` times.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimumCost;

impl IbfsBuilder for MinimumCost {
    fn name(&self) -> &str {
        "minimum_cost"
    }

    fn build(&self, problem: &TransportProblem) -> Allocation {
        let mut supply = problem.supply().to_vec();
        let mut demand = problem.demand().to_vec();
        let mut allocation = Allocation::zeros(supply.len(), demand.len());

        while let Some((i, j)) = cheapest_feasible_cell(problem, &supply, &demand) {
            let quantity = supply[i].min(demand[j]);
            allocation.set(i, j, quantity);
            supply[i] -= quantity;
            demand[j] -= quantity;
            trace!(
                "minimum cost: ship {quantity} via ({i}, {j}) at unit cost {}",
                problem.cost(i, j)
            );
        }

        allocation
    }
}

/// Row-major scan for the cheapest cell with positive supply and demand.
fn cheapest_feasible_cell(
    problem: &TransportProblem,
    supply: &[f64],
    demand: &[f64],
) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize, f64)> = None;
    for (i, _) in supply.iter().enumerate().filter(|&(_, &s)| s > 0.0) {
        for (j, _) in demand.iter().enumerate().filter(|&(_, &d)| d > 0.0) {
            let cost = problem.cost(i, j);
            if best.is_none_or(|(_, _, c)| cost < c) {
                best = Some((i, j, cost));
            }
        }
    }
    best.map(|(i, j, _)| (i, j))
}
