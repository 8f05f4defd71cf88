//! Foundation layer: shared primitives grouped for the layered architecture.

pub mod constants;
pub mod error;
pub mod time;
pub mod types;

pub use constants::*;
pub use error::*;
pub use time::*;
pub use types::*;
