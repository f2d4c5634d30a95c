//! Error type shared by every fallible operation in the crate.

use thiserror::Error;

/// Errors returned when building or solving a transportation problem.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransportError {
    /// The problem has no origins or no destinations.
    #[error("problem must have at least one origin and one destination")]
    Empty,

    /// Matrix and vector shapes disagree.
    #[error("dimension mismatch in {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Which part of the input is malformed.
        what: String,
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// A cost, supply or demand value is negative or not finite.
    #[error("invalid {what} value {value}: must be finite and non-negative")]
    InvalidValue {
        /// Location of the offending value, e.g. `cost[1][2]`.
        what: String,
        /// The rejected value.
        value: f64,
    },

    /// Total supply differs from total demand.
    #[error("unbalanced problem: total supply {supply} != total demand {demand}")]
    Unbalanced {
        /// Sum of the supply vector.
        supply: f64,
        /// Sum of the demand vector.
        demand: f64,
    },

    /// The requested starting heuristic is not one of the known identifiers.
    #[error("unknown method {0:?}: expected northwest_corner, minimum_cost or vogel")]
    UnknownMethod(String),

    /// A solver configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
