//! # Adapters Module
//!
//! Production implementations of the outbound ports.

pub mod eth_rpc;
pub mod osc;

pub use eth_rpc::HttpChainRpc;
pub use osc::{encode_message, OscArg, OscSink, NOTE_ADDRESS, TX_INFO_ADDRESS};
