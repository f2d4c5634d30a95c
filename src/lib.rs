//! Transportation problem solver.
//!
//! Ships goods from origins with fixed supply to destinations with fixed
//! demand at minimum total cost, in two phases:
//!
//! - **Initial solution**: one of three classical heuristics builds a
//!   feasible plan: Northwest Corner, Minimum Cost or Vogel's
//!   Approximation Method ([`ibfs`]).
//! - **Refinement**: the plan is handed to a constrained minimizer that
//!   lowers its cost while keeping every row and column total
//!   ([`refine`], [`minimize`]).
//!
//! [`transport::TransportOptimizer`] ties the two together.
//!
//! # Example
//!
//! ```
//! use u_transport::ibfs::Heuristic;
//! use u_transport::problem::TransportProblem;
//! use u_transport::transport::TransportOptimizer;
//!
//! let problem = TransportProblem::new(
//!     vec![vec![4.0, 1.0, 3.0], vec![1.0, 5.0, 2.0], vec![3.0, 2.0, 6.0]],
//!     vec![10.0, 10.0, 10.0],
//!     vec![10.0, 10.0, 10.0],
//! )
//! .unwrap();
//!
//! let solution = TransportOptimizer::default()
//!     .solve(&problem, Heuristic::MinimumCost)
//!     .unwrap();
//! assert!((solution.initial_cost - 80.0).abs() < 1e-9);
//! assert!((solution.total_cost - 60.0).abs() < 1e-6);
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` on [`ibfs::Heuristic`] and the
//!   JSON request/response types in `api`.
//! - `parallel`: rayon-backed [`transport::TransportOptimizer::solve_batch`].
//! - `wasm`: a `wasm-bindgen` export of `api::optimize`.

pub mod ibfs;
pub mod minimize;
pub mod problem;
pub mod refine;
pub mod transport;

#[cfg(feature = "serde")]
pub mod api;

#[cfg(feature = "wasm")]
pub mod wasm;
