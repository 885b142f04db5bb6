//! # Application Module
//!
//! Services orchestrating the domain, algorithms, and outbound ports.

pub mod emitter;
pub mod poller;

pub use emitter::Emitter;
pub use poller::{BlockPoller, PollerState};
