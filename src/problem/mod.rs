//! Problem data: costs, capacities, requirements and shipment plans.
//!
//! # Key Types
//!
//! - [`TransportProblem`]: validated m×n cost matrix with supply and demand
//! - [`Allocation`]: m×n shipment plan with feasibility and cost helpers
//! - [`TransportError`]: every error the crate can return

mod allocation;
mod error;
mod types;

pub use allocation::Allocation;
pub use error::TransportError;
pub use types::TransportProblem;
