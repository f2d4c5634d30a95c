//! Vogel's Approximation Method (VAM).
//!
//! # Algorithm
//!
//! 1. Stop when all supply or all demand is exhausted
//! 2. For each open row and column, compute its penalty: the gap between
//!    the two cheapest feasible costs, or the single cost when only one
//!    feasible cell remains
//! 3. Pick the line with the largest penalty (rows win ties, then the
//!    lowest index)
//! 4. Ship as much as possible through the cheapest feasible cell of that
//!    line (lowest opposing index on ties)
//!
//! # Reference
//!
//! Reinfeld, N. V. & Vogel, W. R. (1958), *Mathematical Programming*.

use log::trace;

use super::types::IbfsBuilder;
use crate::problem::{Allocation, TransportProblem};

/// Penalty-driven construction heuristic.
///
/// Usually produces a starting plan much closer to optimal than
/// [`NorthwestCorner`](super::NorthwestCorner) or
/// [`MinimumCost`](super::MinimumCost), at the price of recomputing all
/// penalties after every shipment.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vogel;

/// A row or column selected for the next shipment.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Line {
    Row(usize),
    Column(usize),
}

impl IbfsBuilder for Vogel {
    fn name(&self) -> &str {
        "vogel"
    }

    fn build(&self, problem: &TransportProblem) -> Allocation {
        let mut supply = problem.supply().to_vec();
        let mut demand = problem.demand().to_vec();
        let mut allocation = Allocation::zeros(supply.len(), demand.len());

        loop {
            if supply.iter().all(|&s| s == 0.0) || demand.iter().all(|&d| d == 0.0) {
                break;
            }
            let Some(line) = select_line(problem, &supply, &demand) else {
                break;
            };
            let Some((i, j)) = cheapest_cell_on(line, problem, &supply, &demand) else {
                break;
            };

            let quantity = supply[i].min(demand[j]);
            allocation.set(i, j, quantity);
            supply[i] -= quantity;
            demand[j] -= quantity;
            trace!("vogel: {line:?} -> ship {quantity} via ({i}, {j})");
        }

        allocation
    }
}

/// Gap between the two smallest values, or the value itself when only one
/// is given. `None` for an empty input.
fn penalty(costs: impl Iterator<Item = f64>) -> Option<f64> {
    let mut smallest = f64::INFINITY;
    let mut second = f64::INFINITY;
    let mut count = 0usize;
    for c in costs {
        count += 1;
        if c < smallest {
            second = smallest;
            smallest = c;
        } else if c < second {
            second = c;
        }
    }
    match count {
        0 => None,
        1 => Some(smallest),
        _ => Some(second - smallest),
    }
}

fn row_penalty(problem: &TransportProblem, i: usize, demand: &[f64]) -> Option<f64> {
    let row = problem.cost_row(i);
    penalty(
        demand
            .iter()
            .zip(row)
            .filter(|&(&d, _)| d > 0.0)
            .map(|(_, &c)| c),
    )
}

fn column_penalty(problem: &TransportProblem, j: usize, supply: &[f64]) -> Option<f64> {
    penalty(
        supply
            .iter()
            .enumerate()
            .filter(|&(_, &s)| s > 0.0)
            .map(|(i, _)| problem.cost(i, j)),
    )
}

/// Largest penalty among the given lines; the first one wins ties.
fn max_penalty(penalties: impl Iterator<Item = (usize, Option<f64>)>) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (k, p) in penalties {
        if let Some(p) = p {
            if best.is_none_or(|(_, b)| p > b) {
                best = Some((k, p));
            }
        }
    }
    best
}

fn select_line(problem: &TransportProblem, supply: &[f64], demand: &[f64]) -> Option<Line> {
    let row = max_penalty(
        (0..supply.len())
            .filter(|&i| supply[i] > 0.0)
            .map(|i| (i, row_penalty(problem, i, demand))),
    );
    let column = max_penalty(
        (0..demand.len())
            .filter(|&j| demand[j] > 0.0)
            .map(|j| (j, column_penalty(problem, j, supply))),
    );

    match (row, column) {
        (Some((i, rp)), Some((_, cp))) if rp >= cp => Some(Line::Row(i)),
        (_, Some((j, _))) => Some(Line::Column(j)),
        (Some((i, _)), None) => Some(Line::Row(i)),
        (None, None) => None,
    }
}

/// Cheapest feasible cell on the selected line, scanning the opposing
/// index upward.
fn cheapest_cell_on(
    line: Line,
    problem: &TransportProblem,
    supply: &[f64],
    demand: &[f64],
) -> Option<(usize, usize)> {
    let candidates: Vec<(usize, usize)> = match line {
        Line::Row(i) => (0..demand.len())
            .filter(|&j| demand[j] > 0.0)
            .map(|j| (i, j))
            .collect(),
        Line::Column(j) => (0..supply.len())
            .filter(|&i| supply[i] > 0.0)
            .map(|i| (i, j))
            .collect(),
    };

    let mut best: Option<(usize, usize, f64)> = None;
    for (i, j) in candidates {
        let cost = problem.cost(i, j);
        if best.is_none_or(|(_, _, c)| cost < c) {
            best = Some((i, j, cost));
        }
    }
    best.map(|(i, j, _)| (i, j))
}
