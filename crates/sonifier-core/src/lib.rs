//! # Sonifier Core
//!
//! The blockchain sonification pipeline: poll an Ethereum node for newly
//! confirmed blocks, map each qualifying transaction to musical parameters,
//! and emit them as OSC control messages in on-chain order.
//!
//! ## Pipeline
//!
//! ```text
//! BlockPoller ──height/blocks──→ ChainRpc (HTTP JSON-RPC)
//!      │
//!      │ filter (value threshold) + dedup (SeenLedger)
//!      ↓
//! ParameterMapper (pure: note, velocity, instrument, duration)
//!      │
//!      ↓
//! Emitter ──/eth/note, /eth/tx_info──→ ControlSink (OSC over UDP)
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! sonifier-core/
//! ├── domain/          # Block, Transaction, NoteEvent, SeenLedger, errors, units
//! ├── algorithms/      # Pure transaction-to-music mapping functions
//! ├── ports/           # Outbound traits (ChainRpc, ControlSink) + test mocks
//! ├── application/     # BlockPoller service and pacing Emitter
//! ├── adapters/        # HTTP JSON-RPC client, OSC/UDP sink
//! └── config.rs        # SonifierConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::{HttpChainRpc, OscSink};
pub use algorithms::{
    instrument_for, map_duration, map_gas_to_velocity, map_value_to_note, INSTRUMENT_CONTRACT,
    INSTRUMENT_TRANSFER,
};
pub use application::{BlockPoller, Emitter, PollerState};
pub use config::SonifierConfig;
pub use domain::{
    wei_to_eth, wei_to_gwei, Block, NoteEvent, SeenLedger, SonifierError, Transaction, TxDisplay,
    CONTRACT_CREATION_MARKER,
};
pub use ports::{ChainRpc, ControlSink, MockChainRpc, RecordingSink, SentMessage};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
