//! Instance generators shared by the heuristic property tests.

use proptest::prelude::*;

use crate::problem::TransportProblem;

/// Balanced instances built from a random integer flow matrix: its row sums
/// become the supply and its column sums the demand. Costs come from a
/// small range so that ties are common.
pub(crate) fn balanced_problem(
    max_rows: usize,
    max_cols: usize,
) -> impl Strategy<Value = TransportProblem> {
    (1..=max_rows, 1..=max_cols)
        .prop_flat_map(|(m, n)| {
            (
                prop::collection::vec(prop::collection::vec(0u32..6, n), m),
                prop::collection::vec(prop::collection::vec(0u32..8, n), m),
            )
        })
        .prop_map(|(costs, flows)| {
            let n = flows[0].len();
            let supply = flows
                .iter()
                .map(|row| row.iter().map(|&f| f64::from(f)).sum())
                .collect();
            let demand = (0..n)
                .map(|j| flows.iter().map(|row| f64::from(row[j])).sum())
                .collect();
            let costs = costs
                .into_iter()
                .map(|row| row.into_iter().map(f64::from).collect())
                .collect();
            TransportProblem::new(costs, supply, demand).unwrap()
        })
}
