//! Shipment matrix.

use super::error::TransportError;
use super::types::TransportProblem;

/// An m×n shipment plan: `get(i, j)` units travel from origin `i` to
/// destination `j`.
///
/// Stored row-major, which is also the order used when the plan is
/// flattened into a vector of unknowns for refinement.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl Allocation {
    /// An all-zero plan.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            values: vec![0.0; rows * cols],
        }
    }

    /// Wraps a row-major vector of length `rows * cols`.
    pub fn from_flat(rows: usize, cols: usize, values: Vec<f64>) -> Result<Self, TransportError> {
        if values.len() != rows * cols {
            return Err(TransportError::DimensionMismatch {
                what: "flattened allocation".into(),
                expected: rows * cols,
                actual: values.len(),
            });
        }
        Ok(Self { rows, cols, values })
    }

    /// Builds a plan from nested rows; all rows must have equal length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, TransportError> {
        let m = rows.len();
        let n = rows.first().map_or(0, Vec::len);
        let mut values = Vec::with_capacity(m * n);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(TransportError::DimensionMismatch {
                    what: format!("allocation row {i}"),
                    expected: n,
                    actual: row.len(),
                });
            }
            values.extend(row);
        }
        Ok(Self {
            rows: m,
            cols: n,
            values,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.cols + j]
    }

    pub fn set(&mut self, i: usize, j: usize, quantity: f64) {
        self.values[i * self.cols + j] = quantity;
    }

    /// Row-major view of all cells.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }

    /// Nested row representation, as exchanged over the JSON boundary.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.values.chunks(self.cols).map(<[f64]>::to_vec).collect()
    }

    /// Quantity shipped out of each origin.
    pub fn row_sums(&self) -> Vec<f64> {
        (0..self.rows)
            .map(|i| self.values[i * self.cols..(i + 1) * self.cols].iter().sum())
            .collect()
    }

    /// Quantity delivered to each destination.
    pub fn column_sums(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.cols];
        for (k, &v) in self.values.iter().enumerate() {
            sums[k % self.cols] += v;
        }
        sums
    }

    /// Σ allocation[i][j] × cost[i][j].
    pub fn total_cost(&self, problem: &TransportProblem) -> f64 {
        self.values
            .iter()
            .zip(problem.costs())
            .map(|(x, c)| x * c)
            .sum()
    }

    /// Number of cells carrying a positive quantity.
    pub fn occupied_cells(&self) -> usize {
        self.values.iter().filter(|&&v| v > 0.0).count()
    }

    /// Largest deviation from the problem's row/column totals or from
    /// non-negativity.
    pub fn max_violation(&self, problem: &TransportProblem) -> f64 {
        let rows = self
            .row_sums()
            .iter()
            .zip(problem.supply())
            .map(|(r, s)| (r - s).abs())
            .fold(0.0, f64::max);
        let cols = self
            .column_sums()
            .iter()
            .zip(problem.demand())
            .map(|(c, d)| (c - d).abs())
            .fold(0.0, f64::max);
        let negative = self.values.iter().map(|&v| (-v).max(0.0)).fold(0.0, f64::max);
        rows.max(cols).max(negative)
    }

    /// Whether the plan matches the problem's shape and satisfies every
    /// constraint within `tolerance`.
    pub fn is_feasible(&self, problem: &TransportProblem, tolerance: f64) -> bool {
        self.rows == problem.rows()
            && self.cols == problem.cols()
            && self.max_violation(problem) <= tolerance
    }
}
