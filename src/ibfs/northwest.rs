//! Northwest Corner rule.

use log::trace;

use super::types::IbfsBuilder;
use crate::problem::{Allocation, TransportProblem};

/// Fills the top-left remaining cell until supply or demand runs out.
///
/// Costs are ignored. The cursor moves down when the current origin is
/// exhausted and right when the current destination is satisfied (both in
/// the same step when they run out together).
#[derive(Debug, Clone, Copy, Default)]
pub struct NorthwestCorner;

impl IbfsBuilder for NorthwestCorner {
    fn name(&self) -> &str {
        "northwest_corner"
    }

    fn build(&self, problem: &TransportProblem) -> Allocation {
        let mut supply = problem.supply().to_vec();
        let mut demand = problem.demand().to_vec();
        let (m, n) = (supply.len(), demand.len());
        let mut allocation = Allocation::zeros(m, n);

        let (mut i, mut j) = (0, 0);
        while i < m && j < n {
            let quantity = supply[i].min(demand[j]);
            allocation.set(i, j, quantity);
            supply[i] -= quantity;
            demand[j] -= quantity;
            trace!("northwest corner: ship {quantity} via ({i}, {j})");

            let row_done = supply[i] == 0.0;
            let col_done = demand[j] == 0.0;
            if row_done {
                i += 1;
            }
            if col_done {
                j += 1;
            }
        }

        allocation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_by_two() {
        let problem = TransportProblem::new(
            vec![vec![4.0, 6.0], vec![5.0, 3.0]],
            vec![20.0, 30.0],
            vec![25.0, 25.0],
        )
        .unwrap();
        let a = NorthwestCorner.build(&problem);
        assert_eq!(a.to_rows(), vec![vec![20.0, 0.0], vec![5.0, 25.0]]);
        assert!((a.total_cost(&problem) - 180.0).abs() < 1e-12);
    }

    #[test]
    fn test_staircase_ignores_costs() {
        let problem = TransportProblem::new(
            vec![vec![9.0; 4]; 3],
            vec![7.0, 9.0, 18.0],
            vec![5.0, 8.0, 7.0, 14.0],
        )
        .unwrap();
        let a = NorthwestCorner.build(&problem);
        assert_eq!(
            a.to_rows(),
            vec![
                vec![5.0, 2.0, 0.0, 0.0],
                vec![0.0, 6.0, 3.0, 0.0],
                vec![0.0, 0.0, 4.0, 14.0],
            ]
        );
    }

    #[test]
    fn test_simultaneous_exhaustion_advances_both() {
        let problem = TransportProblem::new(
            vec![vec![1.0; 3]; 3],
            vec![5.0, 5.0, 5.0],
            vec![5.0, 5.0, 5.0],
        )
        .unwrap();
        let a = NorthwestCorner.build(&problem);
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 5.0 } else { 0.0 };
                assert_eq!(a.get(i, j), expected);
            }
        }
    }

    #[test]
    fn test_zero_supply_row_is_skipped() {
        let problem = TransportProblem::new(
            vec![vec![1.0, 1.0]; 3],
            vec![0.0, 4.0, 6.0],
            vec![5.0, 5.0],
        )
        .unwrap();
        let a = NorthwestCorner.build(&problem);
        assert_eq!(a.row_sums(), vec![0.0, 4.0, 6.0]);
        assert_eq!(a.column_sums(), vec![5.0, 5.0]);
    }

    #[test]
    fn test_caller_data_untouched() {
        let problem = TransportProblem::new(vec![vec![1.0]], vec![3.0], vec![3.0]).unwrap();
        let before = problem.clone();
        let _ = NorthwestCorner.build(&problem);
        assert_eq!(problem, before);
    }
}
