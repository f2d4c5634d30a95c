//! Initial basic feasible solution (IBFS) heuristics.
//!
//! Three classical greedy constructions, each producing a plan that
//! satisfies every supply and demand total of a balanced problem:
//!
//! - [`NorthwestCorner`]: ignores costs, fills the top-left remaining cell
//! - [`MinimumCost`]: fills the globally cheapest feasible cell
//! - [`Vogel`]: fills the cheapest cell of the line with the largest
//!   opportunity-cost penalty
//!
//! [`Heuristic`] selects one of them by identifier; [`IbfsBuilder`] is the
//! seam for custom constructions.
//!
//! All greedy choices scan in row-major order and keep the first candidate
//! on ties, so results are deterministic.
//!
//! # References
//!
//! - Charnes & Cooper (1954), "The Stepping Stone Method of Explaining
//!   Linear Programming Calculations in Transportation Problems"
//! - Reinfeld & Vogel (1958), *Mathematical Programming*

mod min_cost;
mod northwest;
#[cfg(test)]
mod test_support;
mod types;
mod vogel;

pub use min_cost::MinimumCost;
pub use northwest::NorthwestCorner;
pub use types::{Heuristic, IbfsBuilder};
pub use vogel::Vogel;
