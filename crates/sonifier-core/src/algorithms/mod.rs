//! # Algorithms Module
//!
//! Pure transaction-to-music mapping functions.

pub mod mapping;

pub use mapping::*;
