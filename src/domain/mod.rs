//! Domain layer: the obligation model and every pure validation rule.
//!
//! Nothing in this layer performs I/O or holds async state; both parties (and
//! the commit authority) run the same code over the same canonical bytes.

pub mod contract;
pub mod hashes;
pub mod model;
pub mod policy;
pub mod state_machine;

pub use model::*;
