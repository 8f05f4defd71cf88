#![allow(dead_code)]

pub mod constants;

pub use builders::*;
pub use constants::*;
pub use harness::*;
