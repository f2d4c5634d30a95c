//! Validated problem input.

use super::error::TransportError;

/// A balanced (or caller-checked) transportation problem.
///
/// Holds the m×n cost matrix, the m origin capacities and the n destination
/// requirements. Values are validated once on construction and are
/// immutable afterwards; every solver works on its own copies.
///
/// # Examples
///
/// ```
/// use u_transport::problem::TransportProblem;
///
/// let problem = TransportProblem::new(
///     vec![vec![4.0, 6.0], vec![5.0, 3.0]],
///     vec![20.0, 30.0],
///     vec![25.0, 25.0],
/// )
/// .unwrap();
/// assert_eq!(problem.rows(), 2);
/// assert_eq!(problem.cols(), 2);
/// assert_eq!(problem.imbalance(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TransportProblem {
    costs: Vec<f64>,
    supply: Vec<f64>,
    demand: Vec<f64>,
}

impl TransportProblem {
    /// Creates a problem from a row-major cost matrix and the supply/demand
    /// vectors.
    ///
    /// Fails with [`TransportError::Empty`], [`TransportError::DimensionMismatch`]
    /// or [`TransportError::InvalidValue`]. Balance is not checked here; see
    /// [`check_balanced`](Self::check_balanced).
    pub fn new(
        costs: Vec<Vec<f64>>,
        supply: Vec<f64>,
        demand: Vec<f64>,
    ) -> Result<Self, TransportError> {
        let m = supply.len();
        let n = demand.len();
        if m == 0 || n == 0 {
            return Err(TransportError::Empty);
        }
        if costs.len() != m {
            return Err(TransportError::DimensionMismatch {
                what: "cost rows".into(),
                expected: m,
                actual: costs.len(),
            });
        }

        let mut flat = Vec::with_capacity(m * n);
        for (i, row) in costs.iter().enumerate() {
            if row.len() != n {
                return Err(TransportError::DimensionMismatch {
                    what: format!("cost row {i}"),
                    expected: n,
                    actual: row.len(),
                });
            }
            for (j, &c) in row.iter().enumerate() {
                check_value(c, || format!("cost[{i}][{j}]"))?;
                flat.push(c);
            }
        }
        for (i, &s) in supply.iter().enumerate() {
            check_value(s, || format!("supply[{i}]"))?;
        }
        for (j, &d) in demand.iter().enumerate() {
            check_value(d, || format!("demand[{j}]"))?;
        }

        Ok(Self {
            costs: flat,
            supply,
            demand,
        })
    }

    /// Number of origins (m).
    pub fn rows(&self) -> usize {
        self.supply.len()
    }

    /// Number of destinations (n).
    pub fn cols(&self) -> usize {
        self.demand.len()
    }

    /// Unit shipping cost from origin `i` to destination `j`.
    pub fn cost(&self, i: usize, j: usize) -> f64 {
        self.costs[i * self.cols() + j]
    }

    /// The cost matrix, flattened row-major.
    pub fn costs(&self) -> &[f64] {
        &self.costs
    }

    /// One row of the cost matrix.
    pub fn cost_row(&self, i: usize) -> &[f64] {
        let n = self.cols();
        &self.costs[i * n..(i + 1) * n]
    }

    /// Origin capacities.
    pub fn supply(&self) -> &[f64] {
        &self.supply
    }

    /// Destination requirements.
    pub fn demand(&self) -> &[f64] {
        &self.demand
    }

    pub fn total_supply(&self) -> f64 {
        self.supply.iter().sum()
    }

    pub fn total_demand(&self) -> f64 {
        self.demand.iter().sum()
    }

    /// Σsupply − Σdemand.
    pub fn imbalance(&self) -> f64 {
        self.total_supply() - self.total_demand()
    }

    /// Returns [`TransportError::Unbalanced`] when the totals differ by more
    /// than `tolerance` relative to the larger total (absolute below 1).
    pub fn check_balanced(&self, tolerance: f64) -> Result<(), TransportError> {
        let supply = self.total_supply();
        let demand = self.total_demand();
        let scale = supply.max(demand).max(1.0);
        if (supply - demand).abs() > tolerance * scale {
            return Err(TransportError::Unbalanced { supply, demand });
        }
        Ok(())
    }
}

fn check_value(value: f64, what: impl FnOnce() -> String) -> Result<(), TransportError> {
    if !value.is_finite() || value < 0.0 {
        return Err(TransportError::InvalidValue {
            what: what(),
            value,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TransportProblem {
        TransportProblem::new(
            vec![vec![4.0, 6.0, 8.0], vec![5.0, 3.0, 7.0]],
            vec![20.0, 30.0],
            vec![10.0, 25.0, 15.0],
        )
        .unwrap()
    }

    #[test]
    fn test_accessors() {
        let p = sample();
        assert_eq!(p.rows(), 2);
        assert_eq!(p.cols(), 3);
        assert_eq!(p.cost(1, 2), 7.0);
        assert_eq!(p.cost_row(0), &[4.0, 6.0, 8.0]);
        assert_eq!(p.costs().len(), 6);
        assert!((p.total_supply() - 50.0).abs() < 1e-12);
        assert!((p.total_demand() - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_rejected() {
        let err = TransportProblem::new(vec![], vec![], vec![1.0]).unwrap_err();
        assert_eq!(err, TransportError::Empty);
    }

    #[test]
    fn test_row_count_mismatch() {
        let err = TransportProblem::new(vec![vec![1.0]], vec![1.0, 2.0], vec![3.0]).unwrap_err();
        assert!(matches!(
            err,
            TransportError::DimensionMismatch {
                expected: 2,
                actual: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_column_count_mismatch() {
        let err = TransportProblem::new(
            vec![vec![1.0, 2.0], vec![1.0]],
            vec![1.0, 1.0],
            vec![1.0, 1.0],
        )
        .unwrap_err();
        match err {
            TransportError::DimensionMismatch { what, .. } => assert_eq!(what, "cost row 1"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_negative_and_nan_rejected() {
        let err = TransportProblem::new(vec![vec![-1.0]], vec![1.0], vec![1.0]).unwrap_err();
        assert!(matches!(err, TransportError::InvalidValue { .. }));

        let err = TransportProblem::new(vec![vec![1.0]], vec![f64::NAN], vec![1.0]).unwrap_err();
        assert!(matches!(err, TransportError::InvalidValue { .. }));

        let err = TransportProblem::new(vec![vec![1.0]], vec![1.0], vec![-0.5]).unwrap_err();
        match err {
            TransportError::InvalidValue { what, .. } => assert_eq!(what, "demand[0]"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_balance_check() {
        assert!(sample().check_balanced(1e-9).is_ok());

        let p = TransportProblem::new(vec![vec![1.0, 1.0]], vec![10.0], vec![4.0, 5.0]).unwrap();
        assert!((p.imbalance() - 1.0).abs() < 1e-12);
        assert_eq!(
            p.check_balanced(1e-9),
            Err(TransportError::Unbalanced {
                supply: 10.0,
                demand: 9.0
            })
        );
        assert!(p.check_balanced(0.2).is_ok());
    }
}
