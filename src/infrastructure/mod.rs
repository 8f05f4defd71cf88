//! Infrastructure layer: the collaborator seams the protocol consumes, plus
//! in-process implementations of each.

pub mod config;
pub mod identity;
pub mod ledger;
pub mod signing;
pub mod storage;
pub mod transport;
