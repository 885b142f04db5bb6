//! # Domain Module
//!
//! Core domain types for the sonification pipeline.

pub mod entities;
pub mod errors;
pub mod ledger;
pub mod units;

pub use entities::*;
pub use errors::*;
pub use ledger::*;
pub use units::*;
